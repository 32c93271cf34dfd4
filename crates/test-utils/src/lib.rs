// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for adql-sql
//!
//! This crate provides common testing components including:
//! - Mock dialects with a configurable quoting policy
//! - Table metadata fixtures and linked query builders
//! - Translation-specific assertions

pub mod assertions;
pub mod fixtures;
pub mod mock_dialect;

// Re-exports for convenience
pub use assertions::SqlAssertions;
pub use fixtures::TreeFixtures;
pub use mock_dialect::{ListingDialect, MockDialect};
