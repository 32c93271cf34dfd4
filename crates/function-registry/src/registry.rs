// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use crate::{DefinitionError, DefinitionResult, FunctionDef, UdfDeclaration, builtin};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of user-defined functions
///
/// Functions are keyed by lower-cased name; several definitions may share a
/// name as long as their arities differ.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Vec<Arc<FunctionDef>>>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configuration declarations
    ///
    /// Fails on the first invalid declaration; nothing is registered in that
    /// case.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let declarations = vec![UdfDeclaration::new("foo(a VARCHAR, b INT)")
    ///     .with_translation("left($$1, $$2)")];
    /// let registry = FunctionRegistry::from_declarations(&declarations)?;
    /// assert!(registry.lookup("FOO", 2).is_some());
    /// ```
    pub fn from_declarations(declarations: &[UdfDeclaration]) -> DefinitionResult<Self> {
        let mut registry = Self::new();
        for declaration in declarations {
            registry.register(declaration.to_definition()?)?;
        }
        Ok(registry)
    }

    /// Register a definition
    ///
    /// # Errors
    ///
    /// - `ReservedName` if the name is an ADQL builtin function
    /// - `DuplicateFunction` if a function with the same name and arity exists
    pub fn register(&mut self, definition: FunctionDef) -> DefinitionResult<Arc<FunctionDef>> {
        if builtin::adql::is_reserved(&definition.name) {
            return Err(DefinitionError::ReservedName(definition.name));
        }

        let overloads = self
            .functions
            .entry(definition.name.to_ascii_lowercase())
            .or_default();

        let arity = definition.arity();
        if overloads.iter().any(|f| f.arity() == arity) {
            return Err(DefinitionError::DuplicateFunction {
                name: definition.name,
                arity,
            });
        }

        debug!(
            function = %definition.name,
            arity,
            templated = definition.translation.is_some(),
            "Registered user-defined function"
        );

        let definition = Arc::new(definition);
        overloads.push(Arc::clone(&definition));
        Ok(definition)
    }

    /// Lookup a definition by name (case-insensitive) and arity
    pub fn lookup(&self, name: &str, arity: usize) -> Option<Arc<FunctionDef>> {
        self.get_functions(name)
            .iter()
            .find(|f| f.arity() == arity)
            .cloned()
    }

    /// All definitions sharing a name (case-insensitive)
    pub fn get_functions(&self, name: &str) -> &[Arc<FunctionDef>] {
        self.functions
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check if a function with this name exists, whatever its arity
    pub fn has_function(&self, name: &str) -> bool {
        !self.get_functions(name).is_empty()
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.functions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterate over every definition, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<FunctionDef>> {
        self.functions.values().flatten()
    }
}
