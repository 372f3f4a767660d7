//! Exercise name mapper CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod logging;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    build_mapper, run_check, run_lexicon_check, run_mapping, run_popularity, run_resolve,
    run_suggest,
};
use crate::logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = run(&cli);
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    // Lexicon check does not need the stores.
    if let Command::Lexicon(_) = &cli.command {
        return match run_lexicon_check(cli) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        };
    }
    let mapper = match build_mapper(cli) {
        Ok(mapper) => mapper,
        Err(error) => {
            eprintln!("error: {error:#}");
            return 1;
        }
    };
    let outcome = match &cli.command {
        Command::Resolve(args) => run_resolve(&mapper, args).map(|()| 0),
        Command::Suggest(args) => run_suggest(&mapper, args).map(|()| 0),
        Command::Check(args) => {
            run_check(&mapper, args).map(|report| i32::from(!report.can_proceed))
        }
        Command::Mapping(command) => run_mapping(&mapper, command).map(|()| 0),
        Command::Popularity(command) => run_popularity(&mapper, command).map(|()| 0),
        Command::Lexicon(_) => unreachable!("handled above"),
    };
    match outcome {
        Ok(code) => code,
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
