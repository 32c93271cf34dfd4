// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Translation-specific test helpers and custom assertions

use adql_sql_translator::{TranslationError, TranslationResult};

/// Custom assertion helpers for translation testing
pub struct SqlAssertions;

impl SqlAssertions {
    /// Assert that a translation succeeded with exactly the given SQL
    pub fn assert_sql(result: TranslationResult<String>, expected: &str) {
        match result {
            Ok(sql) => assert_eq!(
                sql, expected,
                "SQL mismatch\n--- found ---\n{}\n--- expected ---\n{}",
                sql, expected
            ),
            Err(err) => panic!("Expected SQL '{}', translation failed: {}", expected, err),
        }
    }

    /// Assert that a translation failed because `function` is not supported
    pub fn assert_unsupported(result: TranslationResult<String>, function: &str) {
        match result {
            Err(TranslationError::UnsupportedFunction { function: found, .. }) => {
                assert_eq!(found, function, "Unsupported function mismatch");
            }
            Err(other) => panic!("Expected UnsupportedFunction, found error: {}", other),
            Ok(sql) => panic!("Expected UnsupportedFunction, translated to: {}", sql),
        }
    }

    /// Assert that a translation failed on a malformed tree
    pub fn assert_malformed(result: TranslationResult<String>) {
        match result {
            Err(TranslationError::MalformedTree { .. }) => {}
            Err(other) => panic!("Expected MalformedTree, found error: {}", other),
            Ok(sql) => panic!("Expected MalformedTree, translated to: {}", sql),
        }
    }
}

/// Split SQL into its clause lines (`SELECT ...`, `FROM ...`, ...)
pub fn clause_lines(sql: &str) -> Vec<&str> {
    sql.lines().collect()
}
