// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! User-defined function calls
//!
//! A call renders through the translation template of its definition when
//! there is one: each `$$n` placeholder is replaced by the n-th translated
//! argument, the rest of the template is copied as is. Without a template the
//! call keeps the ADQL form `name(arg1, arg2)`.

use std::sync::Arc;

use adql_sql_ir::{FunctionDef, UserFunction};
use tracing::trace;

use super::SqlTranslator;
use super::expr::literal_call;
use crate::dialect::SqlDialect;
use crate::error::{TranslationError, TranslationResult};

impl<D: SqlDialect> SqlTranslator<D> {
    /// Translate a user-defined function call
    ///
    /// The definition bound to the call wins; otherwise the registry, if any,
    /// is searched by name and argument count.
    pub fn translate_user_function(&self, udf: &UserFunction) -> TranslationResult<String> {
        let args = self.translate_operands(&udf.args)?;

        let definition: Option<Arc<FunctionDef>> = udf.definition.clone().or_else(|| {
            self.registry
                .as_ref()
                .and_then(|registry| registry.lookup(&udf.name, udf.args.len()))
        });

        let Some(template) = definition.as_ref().and_then(|def| def.translation.as_ref()) else {
            return Ok(literal_call(&udf.name, &args));
        };

        trace!(
            function = %udf.name,
            template = template.source(),
            args = args.len(),
            "Substituting translation template"
        );

        template.render(|index| {
            args.get(index - 1)
                .cloned()
                .ok_or_else(|| TranslationError::MissingTemplateArgument {
                    function: udf.name.clone(),
                    index,
                    provided: args.len(),
                })
        })
    }
}
