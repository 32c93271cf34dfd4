// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # ADQL Function Registry
//!
//! This crate provides the registry of user-defined functions a service
//! declares in addition to the ADQL builtin ones.
//!
//! ## Features
//!
//! - Builds validated [`FunctionDef`]s from configuration declarations
//! - Rejects names reserved by ADQL and duplicate name/arity pairs
//! - Case-insensitive lookup by name and arity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use adql_sql_function_registry::{FunctionRegistry, UdfDeclaration};
//!
//! let registry = FunctionRegistry::from_declarations(&[
//!     UdfDeclaration::new("foo(a VARCHAR, b INT)").with_translation("left($$1, $$2)"),
//! ])?;
//! let foo = registry.lookup("foo", 2);
//! ```

pub mod builtin;
pub mod declaration;
pub mod registry;

// Re-exports from ir for convenience
pub use adql_sql_ir::{DataType, DefinitionError, DefinitionResult, FunctionDef, FunctionParameter};

pub use declaration::UdfDeclaration;
pub use registry::FunctionRegistry;
