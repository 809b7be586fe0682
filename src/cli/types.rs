//! CLI type definitions
//!
//! This module contains the clap structure that defines the CLI interface.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "orgaudit")]
#[command(
    about = "orgaudit - Organization compensation and reporting-depth report",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Employee records file (header line plus one delimited line per employee)
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Additional YAML configuration file
    #[arg(short, long, env = "ORGAUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Field delimiter, overriding the configured one
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Build the hierarchy on one thread so report order follows input order
    #[arg(long)]
    pub sequential: bool,
}
