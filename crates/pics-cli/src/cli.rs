//! CLI argument definitions for the conformance resolver.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use pics_cli::sheet::DEFAULT_OUTPUT_COLUMN;

#[derive(Parser)]
#[command(
    name = "pics-conformance",
    version,
    about = "Resolve PICS conformance text to canonical variable expressions",
    long_about = "Reduce conformance text scraped from certification test plans\n\
                  (e.g. \"EEM.S: (IMPE & CUME)\" or \"[PIN | RID]\") to expressions\n\
                  over registered PICS variables, using exported feature and\n\
                  server/client lookup sheets."
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
    /// Resolve the conformance column of one or more exported sheets.
    Resolve(ResolveArgs),

    /// Resolve a single conformance string and show which rule matched.
    Explain(ExplainArgs),

    /// List feature catalog records registered under a PICS name.
    Lookup(LookupArgs),
}

/// Lookup feeds and rule configuration shared by the resolving commands.
#[derive(Args)]
pub struct LookupSources {
    /// Rule configuration (JSON, or TOML with a .toml extension).
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: PathBuf,

    /// Feature sheet export with "PICS name" and "Variable" columns.
    #[arg(long = "features", value_name = "CSV")]
    pub features: PathBuf,

    /// Server/client sheet export with a "Variable" column.
    #[arg(long = "scopes", value_name = "CSV")]
    pub scopes: PathBuf,
}

#[derive(Parser)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub sources: LookupSources,

    /// Sheet exports to resolve.
    #[arg(value_name = "SHEET", required = true)]
    pub sheets: Vec<PathBuf>,

    /// Column holding the raw conformance text (overrides the rule configuration).
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    /// Column receiving the resolved expression.
    #[arg(long = "output-column", value_name = "NAME", default_value = DEFAULT_OUTPUT_COLUMN)]
    pub output_column: String,

    /// Directory for resolved sheets (default: next to each input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Worker threads (default: available parallelism).
    #[arg(long = "jobs", short = 'j', value_name = "N")]
    pub jobs: Option<NonZeroUsize>,

    /// Resolve and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub sources: LookupSources,

    /// Raw conformance text, e.g. "EEM.S: (IMPE & CUME)".
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Variable of the row the text belongs to (scopes same-named features).
    #[arg(long = "context", value_name = "VARIABLE", default_value = "")]
    pub context: String,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Feature sheet export with "PICS name" and "Variable" columns.
    #[arg(long = "features", value_name = "CSV")]
    pub features: PathBuf,

    /// PICS name to look up.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Only records registered under this scope (e.g. "OCC.S").
    #[arg(long = "scope", value_name = "PREFIX")]
    pub scope: Option<String>,
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
