// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use serde::{Deserialize, Serialize};

use crate::{DefinitionResult, FunctionDef};

/// A user-defined function as declared in configuration
///
/// ```yaml
/// - signature: "foo(str VARCHAR, len INT) -> VARCHAR"
///   translation: "left($$1, $$2)"
///   description: "first characters of a string"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdfDeclaration {
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UdfDeclaration {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            translation: None,
            description: None,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse the signature and bind the translation template
    pub fn to_definition(&self) -> DefinitionResult<FunctionDef> {
        let mut definition = FunctionDef::parse(&self.signature)?;
        if let Some(template) = &self.translation {
            definition = definition.with_translation(template)?;
        }
        if let Some(description) = &self.description {
            definition = definition.with_description(description.clone());
        }
        Ok(definition)
    }
}
