// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # User-defined function definitions
//!
//! A [`FunctionDef`] is read from a signature string:
//!
//! ```text
//! foo(truc VARCHAR, bidule INT) -> SMALLINT
//! gavo_match(pattern VARCHAR(20), string VARCHAR)
//! ```
//!
//! The return type is optional (`UNKNOWN` when omitted). A definition may then
//! be given an SQL translation template with [`FunctionDef::with_translation`];
//! the template is checked against the declared parameters at that point, so a
//! definition attached to a call node is always consistent.

use nom::{
    IResult,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, char, digit1, multispace0, multispace1},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{DefinitionError, DefinitionResult};
use crate::metadata::DataType;
use crate::template::TranslationTemplate;

/// Function parameter definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    /// Parameter name
    pub name: String,
    /// Parameter data type
    pub data_type: DataType,
}

/// Definition of a user-defined function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name, as declared
    pub name: String,
    /// Ordered parameters
    pub parameters: Vec<FunctionParameter>,
    /// Return type
    pub return_type: DataType,
    /// SQL translation template
    pub translation: Option<TranslationTemplate>,
    /// Human readable description
    pub description: Option<String>,
}

/// A type as written in a signature: name and optional length
type RawType<'a> = (&'a str, Option<usize>);

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alpha1,
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn type_spec(input: &str) -> IResult<&str, RawType<'_>> {
    pair(
        identifier,
        opt(preceded(
            multispace0,
            delimited(
                pair(char('('), multispace0),
                map_res(digit1, str::parse::<usize>),
                pair(multispace0, char(')')),
            ),
        )),
    )(input)
}

fn parameter(input: &str) -> IResult<&str, (&str, RawType<'_>)> {
    separated_pair(identifier, multispace1, type_spec)(input)
}

type RawSignature<'a> = (&'a str, Vec<(&'a str, RawType<'a>)>, Option<RawType<'a>>);

fn signature(input: &str) -> IResult<&str, RawSignature<'_>> {
    let (input, (_, name, _, _, _)) =
        tuple((multispace0, identifier, multispace0, char('('), multispace0))(input)?;
    let (input, parameters) = separated_list0(
        tuple((multispace0, char(','), multispace0)),
        parameter,
    )(input)?;
    let (input, _) = tuple((multispace0, char(')'), multispace0))(input)?;
    let (input, return_type) = terminated(
        opt(preceded(pair(tag("->"), multispace0), type_spec)),
        multispace0,
    )(input)?;
    Ok((input, (name, parameters, return_type)))
}

impl FunctionDef {
    /// Create a definition without parameters
    pub fn new(name: impl Into<String>, return_type: DataType) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
            translation: None,
            description: None,
        }
    }

    /// Parse a signature such as `foo(a VARCHAR, b INT) -> SMALLINT`
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` if the text does not follow the grammar
    /// - `UnknownType` if a type is not an ADQL type
    /// - `DuplicateParameter` if two parameters share a name
    pub fn parse(text: &str) -> DefinitionResult<Self> {
        let (_, (name, raw_parameters, raw_return)) = all_consuming(signature)(text)
            .map_err(|err| DefinitionError::InvalidSignature {
                signature: text.to_string(),
                reason: match err {
                    nom::Err::Error(e) | nom::Err::Failure(e) if e.input.is_empty() => {
                        "unexpected end of signature".to_string()
                    }
                    nom::Err::Error(e) | nom::Err::Failure(e) => {
                        format!("unexpected input at '{}'", e.input)
                    }
                    nom::Err::Incomplete(_) => "incomplete signature".to_string(),
                },
            })?;

        let resolve = |(type_name, length): RawType<'_>| {
            DataType::from_adql_name(type_name, length).ok_or_else(|| {
                DefinitionError::UnknownType {
                    signature: text.to_string(),
                    type_name: type_name.to_string(),
                }
            })
        };

        let mut seen = HashSet::new();
        let mut parameters = Vec::with_capacity(raw_parameters.len());
        for (param_name, raw_type) in raw_parameters {
            if !seen.insert(param_name.to_ascii_lowercase()) {
                return Err(DefinitionError::DuplicateParameter {
                    function: name.to_string(),
                    parameter: param_name.to_string(),
                });
            }
            parameters.push(FunctionParameter {
                name: param_name.to_string(),
                data_type: resolve(raw_type)?,
            });
        }

        let return_type = match raw_return {
            Some(raw_type) => resolve(raw_type)?,
            None => DataType::Unknown,
        };

        Ok(Self {
            name: name.to_string(),
            parameters,
            return_type,
            translation: None,
            description: None,
        })
    }

    /// Builder method: add parameters
    pub fn with_parameters(mut self, parameters: Vec<FunctionParameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Builder method: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method: attach an SQL translation template
    ///
    /// # Errors
    ///
    /// Fails if the template is malformed or references a parameter position
    /// beyond the declared parameters.
    pub fn with_translation(mut self, template: &str) -> DefinitionResult<Self> {
        let template = TranslationTemplate::parse(template)?;
        if let Some(index) = template.max_index() {
            if index > self.parameters.len() {
                return Err(DefinitionError::PlaceholderOutOfRange {
                    function: self.name.clone(),
                    index,
                    parameters: self.parameters.len(),
                });
            }
        }
        self.translation = Some(template);
        Ok(self)
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Whether this definition applies to a call with this name and arity
    pub fn matches_call(&self, name: &str, arity: usize) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.arity() == arity
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.name, p.data_type))
            .collect();
        write!(
            f,
            "{}({}) -> {}",
            self.name,
            params.join(", "),
            self.return_type
        )
    }
}
