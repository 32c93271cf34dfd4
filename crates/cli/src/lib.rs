// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # ADQL SQL - CLI
//!
//! Reads a checked query tree serialized as JSON and prints its SQL.
//!
//! ```bash
//! adql2sql query.json
//! adql2sql --config service.yaml --dialect ansi < query.json
//! ```

use std::io::Read;
use std::path::PathBuf;

use adql_sql_ir::Query;
use adql_sql_translator::{DialectKind, TranslatorConfig};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "adql2sql")]
#[command(author, version, about = "Translate ADQL query trees to SQL")]
pub struct Args {
    /// Query tree (JSON); reads stdin when omitted or `-`
    pub query: Option<PathBuf>,

    /// Translator configuration (.yaml, .yml or .json)
    #[arg(short, long, env = "ADQL2SQL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target dialect, overriding the configuration
    #[arg(short, long, value_enum)]
    pub dialect: Option<CliDialect>,

    /// Enable debug logging when RUST_LOG is not set
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliDialect {
    Ansi,
    Postgresql,
}

impl From<CliDialect> for DialectKind {
    fn from(dialect: CliDialect) -> Self {
        match dialect {
            CliDialect::Ansi => DialectKind::Ansi,
            CliDialect::Postgresql => DialectKind::Postgresql,
        }
    }
}

/// Configuration from the file named by the arguments, with overrides applied
pub fn load_config(args: &Args) -> Result<TranslatorConfig> {
    let mut config = match &args.config {
        Some(path) => TranslatorConfig::load(path)
            .with_context(|| format!("Cannot use configuration {}", path.display()))?,
        None => TranslatorConfig::default(),
    };
    if let Some(dialect) = args.dialect {
        config.dialect = dialect.into();
    }
    Ok(config)
}

/// Read the serialized query tree from a file or stdin
pub fn read_query(path: Option<&PathBuf>) -> Result<Query> {
    let json = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read query tree {}", path.display()))?,
        _ => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("Cannot read query tree from stdin")?;
            json
        }
    };
    parse_query(&json)
}

pub fn parse_query(json: &str) -> Result<Query> {
    serde_json::from_str(json).context("Invalid query tree")
}

/// Translate the query named by the arguments
pub fn run(args: &Args) -> Result<String> {
    let config = load_config(args)?;
    let translator = config.build_translator()?;
    info!(dialect = ?config.dialect, udfs = config.udfs.len(), "Translator ready");

    let query = read_query(args.query.as_ref())?;
    let sql = translator.translate_query(&query)?;
    debug!(bytes = sql.len(), "Translated query");
    Ok(sql)
}
