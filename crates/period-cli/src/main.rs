//! `period`: inspect and compute with ISO 8601 periods.

use clap::{ColorChoice, Parser};
use period_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_add, run_add_to, run_between, run_duration, run_encode, run_normalise, run_parse,
    run_scale, run_subtract,
};
use crate::summary::{print_add_to, print_duration, print_encoding, print_period};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Parse(args) => report(run_parse(args), print_period),
        Command::Normalise(args) => report(run_normalise(args), print_period),
        Command::Add(args) => report(run_add(args), print_period),
        Command::Subtract(args) => report(run_subtract(args), print_period),
        Command::Scale(args) => report(run_scale(args), print_period),
        Command::Duration(args) => report(run_duration(args), print_duration),
        Command::AddTo(args) => report(run_add_to(args), print_add_to),
        Command::Between(args) => report(run_between(args), print_period),
        Command::Encode(args) => report(run_encode(args), print_encoding),
    };
    std::process::exit(exit_code);
}

/// Print a command's result, or its error chain, and return the exit code.
fn report<T>(result: anyhow::Result<T>, print: impl FnOnce(&T)) -> i32 {
    match result {
        Ok(value) => {
            print(&value);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
