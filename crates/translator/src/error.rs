// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for translation, geometry conversion and configuration

use adql_sql_ir::DefinitionError;
use serde::Serialize;

/// Result type alias for translation operations
pub type TranslationResult<T> = Result<T, TranslationError>;

/// Result type alias for geometry conversions
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur while rendering a query tree as SQL
///
/// Any of these aborts the whole translation: no partial SQL is returned.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum TranslationError {
    /// The dialect has no SQL form for this function
    #[error("Function '{function}' is not supported by the {dialect} dialect")]
    UnsupportedFunction { function: String, dialect: String },

    /// A function call has the wrong number of arguments
    #[error("Function '{function}' expects {expected} argument(s), found {found}")]
    ArgumentCount {
        function: String,
        expected: String,
        found: usize,
    },

    /// A translation template references an argument the call does not have
    #[error(
        "Translation of function '{function}' references argument {index} but only {provided} argument(s) were given"
    )]
    MissingTemplateArgument {
        function: String,
        index: usize,
        provided: usize,
    },

    /// A type has no equivalent in the dialect
    #[error("Type '{data_type}' has no equivalent in the {dialect} dialect")]
    UnsupportedType { data_type: String, dialect: String },

    /// The tree violates a structural assumption
    #[error("Malformed query tree: {message}")]
    MalformedTree { message: String },
}

impl TranslationError {
    pub fn unsupported_function(function: impl Into<String>, dialect: impl Into<String>) -> Self {
        TranslationError::UnsupportedFunction {
            function: function.into(),
            dialect: dialect.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        TranslationError::MalformedTree {
            message: message.into(),
        }
    }

    /// Name of the offending function, for function-related errors
    pub fn function(&self) -> Option<&str> {
        match self {
            TranslationError::UnsupportedFunction { function, .. }
            | TranslationError::ArgumentCount { function, .. }
            | TranslationError::MissingTemplateArgument { function, .. } => Some(function),
            TranslationError::UnsupportedType { .. } | TranslationError::MalformedTree { .. } => {
                None
            }
        }
    }
}

/// Errors raised while converting geometries to or from the DB encoding
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum GeometryError {
    #[error("Geometry conversion not supported by the {dialect} dialect: {message}")]
    Unsupported { dialect: String, message: String },

    #[error("Invalid geometry value '{value}': {reason}")]
    InvalidValue { value: String, reason: String },
}

/// Errors raised while loading a translator configuration
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum ConfigError {
    #[error("Failed to read configuration '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse configuration '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Invalid function declaration: {0}")]
    Definition(#[from] DefinitionError),
}
