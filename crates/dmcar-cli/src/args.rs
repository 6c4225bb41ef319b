//! Command-line argument definitions for the DMCAR CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the input format,
//! configuration file selection, and logging verbosity.

use clap::Parser;

use dmcar::InputFormat;

/// Command-line arguments for the DMCAR diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input DMCAR table (CSV or JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output Mermaid file
    #[arg(short, long, default_value = "out.mmd")]
    pub output: String,

    /// Input format (csv, json); inferred from the input extension if omitted
    #[arg(short, long)]
    pub format: Option<InputFormat>,

    /// Path to write the relationship-to-domain attribution (JSON)
    #[arg(short, long)]
    pub domains: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
