//! CLI argument definitions for the rule generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rulegen",
    version,
    about = "Derive validation rules from a database schema snapshot",
    long_about = "Derive declarative field-validation rules from a database schema snapshot.\n\n\
                  Nullability, lengths, unique indexes, and foreign keys become rule tokens\n\
                  (nullable, max, unique, exists) so they never have to be written by hand."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the schema snapshot JSON file.
    #[arg(
        long = "schema",
        short = 's',
        value_name = "FILE",
        default_value = "schema.json",
        global = true
    )]
    pub schema: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Generate rules for one table (optionally a single column).
    Table(TableArgs),

    /// Generate rules for a model declared in the snapshot, including its
    /// base rules and many-to-many relations.
    Model(ModelArgs),

    /// Generate rules for every table in the snapshot.
    All(AllArgs),

    /// List the snapshot's tables.
    Tables,
}

#[derive(Parser)]
pub struct TableArgs {
    /// Table for which to generate rules.
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Restrict output to a single column.
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: Option<String>,

    /// JSON file of override rules (column name to pipe-delimited rules).
    #[arg(long = "overrides", value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Record id that unique rules should skip (edit-form validation).
    #[arg(long = "exclude-id", value_name = "ID")]
    pub exclude_id: Option<String>,

    /// Column holding the excluded id.
    #[arg(long = "id-column", value_name = "COLUMN", default_value = "id")]
    pub id_column: String,

    /// Output rendering.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: RenderFormatArg,
}

#[derive(Parser)]
pub struct ModelArgs {
    /// Model for which to generate rules.
    #[arg(value_name = "MODEL")]
    pub model: String,

    /// Restrict output to a single column.
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: Option<String>,

    /// JSON file of override rules (column name to pipe-delimited rules).
    #[arg(long = "overrides", value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// Record id that unique rules should skip (edit-form validation).
    #[arg(long = "exclude-id", value_name = "ID")]
    pub exclude_id: Option<String>,

    /// Column holding the excluded id.
    #[arg(long = "id-column", value_name = "COLUMN", default_value = "id")]
    pub id_column: String,

    /// Output rendering.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: RenderFormatArg,
}

#[derive(Parser)]
pub struct AllArgs {
    /// Write the rules as a versioned JSON report to this path.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output rendering.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: RenderFormatArg,
}

/// CLI rendering choices for generated rules.
#[derive(Clone, Copy, ValueEnum)]
pub enum RenderFormatArg {
    Table,
    Json,
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
