// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Errors raised while constructing tree nodes and function definitions
//!
//! These are structural failures: they happen before any translation starts,
//! so the translator can assume every attached [`crate::FunctionDef`] and
//! every [`crate::NumericConstant`] is well formed.

use serde::Serialize;

/// Result type alias for definition-time operations
pub type DefinitionResult<T> = Result<T, DefinitionError>;

/// Malformed input detected while building a node or a function definition
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum DefinitionError {
    /// The function signature does not follow `name(param TYPE, ...) -> TYPE`
    #[error("Invalid function signature '{signature}': {reason}")]
    InvalidSignature { signature: String, reason: String },

    /// A parameter or return type is not an ADQL type
    #[error("Unknown type '{type_name}' in function signature '{signature}'")]
    UnknownType { signature: String, type_name: String },

    /// Two parameters of the same function share a name
    #[error("Duplicate parameter '{parameter}' in function '{function}'")]
    DuplicateParameter { function: String, parameter: String },

    /// A template placeholder cannot be read as a positional index
    #[error("Invalid placeholder '{placeholder}' in template '{template}'")]
    InvalidPlaceholder { template: String, placeholder: String },

    /// A template placeholder points past the declared parameters
    #[error(
        "Template of function '{function}' references parameter {index} but only {parameters} parameter(s) are declared"
    )]
    PlaceholderOutOfRange {
        function: String,
        index: usize,
        parameters: usize,
    },

    /// A numeric literal cannot be read as a decimal or hexadecimal number
    #[error("Invalid numeric literal '{0}'")]
    InvalidNumber(String),

    /// A user-defined function reuses the name of an ADQL function
    #[error("Function name '{0}' is reserved by ADQL")]
    ReservedName(String),

    /// Two user-defined functions share a name and an arity
    #[error("Function '{name}' with {arity} parameter(s) is already declared")]
    DuplicateFunction { name: String, arity: usize },
}
