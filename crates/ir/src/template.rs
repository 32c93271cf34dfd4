// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # SQL translation templates
//!
//! A user-defined function may declare how it is written in SQL with a
//! template such as `left($$1, $$2)`. Each placeholder is the marker `$$`
//! followed by the 1-based position of an argument.
//!
//! ## Tokenizing
//!
//! Templates are tokenized once, when the function definition is built, into
//! a sequence of [`TemplateSegment`]s. After a marker the tokenizer always
//! consumes the *longest* run of digits, so `$$10` is argument ten and never
//! argument one followed by a literal `0`:
//!
//! ```text
//! ($$1+$$10)*$$11  =>  Text("(") Arg(1) Text("+") Arg(10) Text(")*") Arg(11)
//! ```
//!
//! A marker that is not followed by a digit is plain text. `$$0` is rejected.

use serde::{Deserialize, Serialize};

use crate::error::{DefinitionError, DefinitionResult};

/// Marker that starts a placeholder
pub const PLACEHOLDER_MARKER: &str = "$$";

/// A piece of a tokenized template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Text copied verbatim
    Text(String),
    /// Placeholder for the argument at this 1-based position
    Argument(usize),
}

/// A tokenized SQL translation template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationTemplate {
    source: String,
    segments: Vec<TemplateSegment>,
}

impl TranslationTemplate {
    /// Tokenize a template
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::InvalidPlaceholder` for `$$0` or for an index
    /// too large to be represented.
    pub fn parse(source: &str) -> DefinitionResult<Self> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = source;

        while let Some(pos) = rest.find(PLACEHOLDER_MARKER) {
            let after = &rest[pos + PLACEHOLDER_MARKER.len()..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();

            if digits == 0 {
                // Not a placeholder: keep one '$' and rescan from the next
                // character, so that `$$$1` still yields argument 1.
                text.push_str(&rest[..=pos]);
                rest = &rest[pos + 1..];
                continue;
            }

            let placeholder = &rest[pos..pos + PLACEHOLDER_MARKER.len() + digits];
            let index = after[..digits]
                .parse::<usize>()
                .ok()
                .filter(|index| *index > 0)
                .ok_or_else(|| DefinitionError::InvalidPlaceholder {
                    template: source.to_string(),
                    placeholder: placeholder.to_string(),
                })?;

            text.push_str(&rest[..pos]);
            if !text.is_empty() {
                segments.push(TemplateSegment::Text(std::mem::take(&mut text)));
            }
            segments.push(TemplateSegment::Argument(index));
            rest = &after[digits..];
        }

        text.push_str(rest);
        if !text.is_empty() {
            segments.push(TemplateSegment::Text(text));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// The template as written
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The tokenized template
    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// Highest argument position referenced, if any
    pub fn max_index(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                TemplateSegment::Argument(index) => Some(*index),
                TemplateSegment::Text(_) => None,
            })
            .max()
    }

    /// Fill the template
    ///
    /// `argument` is called with the 1-based position of every placeholder, in
    /// template order; its first error stops the rendering.
    pub fn render<F, E>(&self, mut argument: F) -> Result<String, E>
    where
        F: FnMut(usize) -> Result<String, E>,
    {
        let mut output = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                TemplateSegment::Text(text) => output.push_str(text),
                TemplateSegment::Argument(index) => output.push_str(&argument(*index)?),
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(index: usize) -> TemplateSegment {
        TemplateSegment::Argument(index)
    }

    fn text(value: &str) -> TemplateSegment {
        TemplateSegment::Text(value.to_string())
    }

    #[test]
    fn test_plain_text() {
        let template = TranslationTemplate::parse("random()").unwrap();
        assert_eq!(template.segments(), &[text("random()")]);
        assert_eq!(template.max_index(), None);
    }

    #[test]
    fn test_empty_template() {
        let template = TranslationTemplate::parse("").unwrap();
        assert!(template.segments().is_empty());
    }

    #[test]
    fn test_simple_placeholders() {
        let template = TranslationTemplate::parse("left($$1, $$2)").unwrap();
        assert_eq!(
            template.segments(),
            &[text("left("), arg(1), text(", "), arg(2), text(")")]
        );
        assert_eq!(template.max_index(), Some(2));
    }

    #[test]
    fn test_longest_digit_run() {
        let template = TranslationTemplate::parse("$$1$$10$$11").unwrap();
        assert_eq!(template.segments(), &[arg(1), arg(10), arg(11)]);
    }

    #[test]
    fn test_large_indices() {
        let template = TranslationTemplate::parse("f($$123, $$12, $$1)").unwrap();
        assert_eq!(
            template.segments(),
            &[
                text("f("),
                arg(123),
                text(", "),
                arg(12),
                text(", "),
                arg(1),
                text(")")
            ]
        );
    }

    #[test]
    fn test_marker_without_digits_is_text() {
        let template = TranslationTemplate::parse("cost in $$ and $").unwrap();
        assert_eq!(template.segments(), &[text("cost in $$ and $")]);
    }

    #[test]
    fn test_extra_dollar_before_placeholder() {
        let template = TranslationTemplate::parse("$$$1").unwrap();
        assert_eq!(template.segments(), &[text("$"), arg(1)]);
    }

    #[test]
    fn test_zero_index_rejected() {
        let err = TranslationTemplate::parse("f($$0)").unwrap_err();
        assert_eq!(
            err,
            DefinitionError::InvalidPlaceholder {
                template: "f($$0)".to_string(),
                placeholder: "$$0".to_string(),
            }
        );
    }

    #[test]
    fn test_overflowing_index_rejected() {
        let result = TranslationTemplate::parse("$$99999999999999999999999999");
        assert!(matches!(
            result,
            Err(DefinitionError::InvalidPlaceholder { .. })
        ));
    }

    #[test]
    fn test_render_positional() {
        let template =
            TranslationTemplate::parse("($$1+$$2+$$3)*($$4+$$5+$$6+$$7+$$8+$$9)/($$10*$$11)")
                .unwrap();
        let rendered: Result<String, ()> = template.render(|index| Ok(index.to_string()));
        assert_eq!(rendered.unwrap(), "(1+2+3)*(4+5+6+7+8+9)/(10*11)");
    }

    #[test]
    fn test_render_stops_on_error() {
        let template = TranslationTemplate::parse("$$1 $$2").unwrap();
        let rendered: Result<String, String> = template.render(|index| {
            if index == 2 {
                Err("missing".to_string())
            } else {
                Ok("x".to_string())
            }
        });
        assert_eq!(rendered.unwrap_err(), "missing");
    }

    #[test]
    fn test_source_kept() {
        let template = TranslationTemplate::parse("$$1 || ' world :)'").unwrap();
        assert_eq!(template.source(), "$$1 || ' world :)'");
    }
}
