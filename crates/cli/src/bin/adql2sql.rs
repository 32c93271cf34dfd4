// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use adql_sql_cli::{Args, run};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = match std::env::var_os(EnvFilter::DEFAULT_ENV) {
        None if args.verbose => EnvFilter::new("debug"),
        _ => EnvFilter::from_default_env(),
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sql = run(&args)?;
    println!("{sql}");
    Ok(())
}
