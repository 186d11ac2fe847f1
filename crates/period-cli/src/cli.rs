//! CLI argument definitions for the period tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use period_core::NormalisationMode;

#[derive(Parser)]
#[command(
    name = "period",
    version,
    about = "Inspect and compute with ISO 8601 periods",
    long_about = "Parse, normalise and compute with ISO 8601 periods such as P1Y2M3DT4H5M6S.\n\n\
                  Fields hold one decimal place. Results are printed as a field table\n\
                  followed by the canonical text."
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
    /// Parse a period and show its fields.
    Parse(ParseArgs),

    /// Normalise a period, carrying between units.
    Normalise(NormaliseArgs),

    /// Add two periods.
    Add(PairArgs),

    /// Subtract the second period from the first.
    Subtract(PairArgs),

    /// Multiply a period by a ratio (`1/3`) or a decimal factor (`0.5`).
    Scale(ScaleArgs),

    /// Show the approximate elapsed time of a period.
    Duration(PeriodArgs),

    /// Add a period to a date (`2024-01-31`) or date-time (`2024-01-31T10:00:00`).
    AddTo(AddToArgs),

    /// The period between two dates or date-times.
    Between(BetweenArgs),

    /// Show the 14-byte binary encoding of a period.
    Encode(PeriodArgs),
}

#[derive(Args)]
pub struct PeriodArgs {
    /// ISO 8601 period, for example P3Y6M4DT12H30M5S.
    #[arg(value_name = "PERIOD", allow_hyphen_values = true)]
    pub period: String,
}

#[derive(Args)]
pub struct ParseArgs {
    /// ISO 8601 period, for example P3Y6M4DT12H30M5S.
    #[arg(value_name = "PERIOD", allow_hyphen_values = true)]
    pub period: String,

    /// How much normalisation to apply while parsing.
    #[arg(long = "mode", value_enum, default_value = "normalised")]
    pub mode: ModeArg,
}

#[derive(Args)]
pub struct NormaliseArgs {
    /// ISO 8601 period, read verbatim before normalising.
    #[arg(value_name = "PERIOD", allow_hyphen_values = true)]
    pub period: String,

    /// Also carry hours into days and days into months (30.4375-day months).
    #[arg(long = "imprecise")]
    pub imprecise: bool,
}

#[derive(Args)]
pub struct PairArgs {
    /// Left-hand period.
    #[arg(value_name = "LHS", allow_hyphen_values = true)]
    pub lhs: String,

    /// Right-hand period.
    #[arg(value_name = "RHS", allow_hyphen_values = true)]
    pub rhs: String,
}

#[derive(Args)]
pub struct ScaleArgs {
    /// ISO 8601 period to scale.
    #[arg(value_name = "PERIOD", allow_hyphen_values = true)]
    pub period: String,

    /// Ratio `N/D` or decimal factor.
    #[arg(value_name = "FACTOR", allow_hyphen_values = true)]
    pub factor: String,
}

#[derive(Args)]
pub struct AddToArgs {
    /// ISO 8601 period to add.
    #[arg(value_name = "PERIOD", allow_hyphen_values = true)]
    pub period: String,

    /// Date or date-time to add it to.
    #[arg(value_name = "INSTANT")]
    pub instant: String,
}

#[derive(Args)]
pub struct BetweenArgs {
    /// Start date or date-time.
    #[arg(value_name = "START")]
    pub start: String,

    /// End date or date-time.
    #[arg(value_name = "END")]
    pub end: String,
}

/// CLI normalisation mode choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Verbatim,
    Constrained,
    Normalised,
    Imprecise,
}

impl From<ModeArg> for NormalisationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Verbatim => NormalisationMode::Verbatim,
            ModeArg::Constrained => NormalisationMode::Constrained,
            ModeArg::Normalised => NormalisationMode::Normalised,
            ModeArg::Imprecise => NormalisationMode::Imprecise,
        }
    }
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
