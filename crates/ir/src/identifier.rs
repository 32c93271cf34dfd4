// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Identifiers
//!
//! ADQL identifiers are case-insensitive unless written between double quotes.
//! [`Identifier`] keeps the written text together with that marker, so the
//! translator can reproduce (or fold) the original case.

use serde::{Deserialize, Serialize};

/// An identifier as written in the ADQL query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// Identifier text, without the surrounding double quotes
    pub name: String,
    /// Whether the identifier was written double-quoted
    pub case_sensitive: bool,
}

impl Identifier {
    /// A regular (case-insensitive) identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            case_sensitive: false,
        }
    }

    /// A double-quoted (case-sensitive) identifier
    pub fn quoted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            case_sensitive: true,
        }
    }

    /// Case-insensitive comparison unless either side is case-sensitive
    pub fn matches(&self, other: &str) -> bool {
        if self.case_sensitive {
            self.name == other
        } else {
            self.name.eq_ignore_ascii_case(other)
        }
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::new(name)
    }
}

/// The kind of object an identifier names
///
/// Dialects declare per kind whether their identifiers are case-sensitive by
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierField {
    Catalog,
    Schema,
    Table,
    Column,
    Alias,
    Correlation,
}
