// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin function names
//!
//! Names the query language defines itself; user-defined functions may not
//! reuse them.

pub mod adql;
