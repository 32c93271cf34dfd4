// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Translator configuration
//!
//! A configuration selects the target dialect and declares the user-defined
//! functions of the service.
//!
//! ## Example
//!
//! ```yaml
//! dialect: postgresql
//! udfs:
//!   - signature: "gavo_match(pattern VARCHAR, string VARCHAR) -> INTEGER"
//!     translation: "CASE WHEN $$2 ~ $$1 THEN 1 ELSE 0 END"
//!   - signature: "ivo_nocasematch(value VARCHAR, pattern VARCHAR) -> INTEGER"
//! ```
//!
//! The same structure is accepted as JSON; [`TranslatorConfig::load`] picks
//! the format from the file extension.

use std::path::Path;
use std::sync::Arc;

use adql_sql_function_registry::{FunctionRegistry, UdfDeclaration};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::SqlTranslator;
use crate::dialect::{AnsiDialect, PostgreSqlDialect, SqlDialect};
use crate::error::ConfigError;

/// Bundled dialects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    Ansi,
    #[default]
    Postgresql,
}

/// Translator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub dialect: DialectKind,

    #[serde(default)]
    pub udfs: Vec<UdfDeclaration>,
}

impl TranslatorConfig {
    /// Load a YAML (`.yaml`, `.yml`) or JSON (`.json`) configuration file
    ///
    /// Every declared function is validated: a configuration with one invalid
    /// declaration fails to load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: shown.clone(),
            message: err.to_string(),
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let config = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::Parse {
                path: shown.clone(),
                message: "unsupported extension, expected .yaml, .yml or .json".to_string(),
            }),
        }
        .map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: shown.clone(),
                message,
            },
            other => other,
        })?;

        info!(
            path = %shown,
            dialect = ?config.dialect,
            udfs = config.udfs.len(),
            "Loaded translator configuration"
        );
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content).map_err(|err| ConfigError::Parse {
            path: "<yaml>".to_string(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content).map_err(|err| ConfigError::Parse {
            path: "<json>".to_string(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every function declaration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_registry().map(|_| ())
    }

    /// Instantiate the configured dialect
    pub fn build_dialect(&self) -> Box<dyn SqlDialect> {
        match self.dialect {
            DialectKind::Ansi => Box::new(AnsiDialect::new()),
            DialectKind::Postgresql => Box::new(PostgreSqlDialect::new()),
        }
    }

    /// Registry of the declared functions
    pub fn build_registry(&self) -> Result<FunctionRegistry, ConfigError> {
        Ok(FunctionRegistry::from_declarations(&self.udfs)?)
    }

    /// Translator for the configured dialect, resolving the declared functions
    pub fn build_translator(&self) -> Result<SqlTranslator<Box<dyn SqlDialect>>, ConfigError> {
        let registry = self.build_registry()?;
        Ok(SqlTranslator::new(self.build_dialect()).with_registry(Arc::new(registry)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adql_sql_ir::DefinitionError;

    #[test]
    fn test_defaults() {
        let config = TranslatorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.dialect, DialectKind::Postgresql);
        assert!(config.udfs.is_empty());
        assert_eq!(config.build_dialect().name(), "PostgreSQL");
    }

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
dialect: ansi
udfs:
  - signature: "foo(a VARCHAR, b INT) -> VARCHAR"
    translation: "left($$1, $$2)"
"#;
        let config = TranslatorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.dialect, DialectKind::Ansi);

        let translator = config.build_translator().unwrap();
        assert_eq!(translator.dialect().name(), "ANSI");
        assert!(translator.registry().unwrap().lookup("foo", 2).is_some());
    }

    #[test]
    fn test_json_config() {
        let json = r#"{"dialect": "postgresql", "udfs": [{"signature": "bar()"}]}"#;
        let config = TranslatorConfig::from_json_str(json).unwrap();
        assert_eq!(config.udfs.len(), 1);
    }

    #[test]
    fn test_invalid_udf_rejected() {
        let yaml = r#"
udfs:
  - signature: "foo(a INT)"
    translation: "f($$1, $$2)"
"#;
        let err = TranslatorConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Definition(DefinitionError::PlaceholderOutOfRange { .. })
        ));
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        assert!(matches!(
            TranslatorConfig::from_yaml_str("dialect: oracle"),
            Err(ConfigError::Parse { .. })
        ));
    }
}
