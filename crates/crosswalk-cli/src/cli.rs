//! CLI argument definitions for the crosswalk compiler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "crosswalk",
    version,
    about = "Compile XML tag/attribute crosswalks into XSLT dereferencing stylesheets",
    long_about = "Compile XML tag/attribute crosswalks into XSLT 1.0 stylesheets.\n\n\
                  Each mapping file (TOML or JSON) yields one stylesheet that extracts\n\
                  the record selected by the `targetId` parameter and rewrites it into\n\
                  the target vocabulary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile mapping files into stylesheets.
    Compile(CompileArgs),

    /// List the builtin namespace prefixes.
    Namespaces,
}

#[derive(Parser)]
pub struct CompileArgs {
    /// Mapping files (.toml or .json) or directories containing them.
    #[arg(value_name = "MAPPING", required = true)]
    pub mappings: Vec<PathBuf>,

    /// Output directory for stylesheets (default: next to each mapping).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Generate and report without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
