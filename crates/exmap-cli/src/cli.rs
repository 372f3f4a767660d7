//! CLI argument definitions for the exercise mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "exmap",
    version,
    about = "Exercise name mapper - resolve free-text exercise names to Garmin exercises",
    long_about = "Resolve free-text (often OCR-derived) exercise names to Garmin catalog\n\
                  exercises with a confidence score and review status.\n\n\
                  Resolution consults, in order: personal mappings, crowd popularity,\n\
                  manual overrides, fuzzy catalog matching, and the canonical dictionary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Dictionary directory overriding the built-in lexicon.
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for the user-mapping and popularity stores
    /// (default: in-memory only).
    #[arg(long = "state-dir", value_name = "DIR", global = true)]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a single exercise name.
    Resolve(ResolveArgs),

    /// Show review-time alternatives for an exercise name.
    Suggest(SuggestArgs),

    /// Resolve every exercise in a workout file and report status.
    Check(CheckArgs),

    /// Maintain personal mappings.
    #[command(subcommand)]
    Mapping(MappingCommand),

    /// Inspect or contribute to the crowd popularity table.
    #[command(subcommand)]
    Popularity(PopularityCommand),

    /// Validate the lexicon dictionaries.
    #[command(subcommand)]
    Lexicon(LexiconCommand),
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// Exercise name to resolve.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Upstream name hint scored alongside the input.
    #[arg(long = "hint", value_name = "NAME")]
    pub hint: Option<String>,

    /// Emit the result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct SuggestArgs {
    /// Exercise name to suggest alternatives for.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Also list catalog entries of the detected movement category.
    #[arg(long = "by-type")]
    pub by_type: bool,

    /// Emit the result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Workout file with one exercise name per line ('#' comments
    /// and blank lines are skipped).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Emit the report as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum MappingCommand {
    /// Save a personal mapping (also counts as a popularity choice).
    Add {
        /// Exercise name as it appears in workouts.
        #[arg(value_name = "NAME")]
        name: String,
        /// Garmin exercise name to map it to.
        #[arg(value_name = "GARMIN_NAME")]
        garmin_name: String,
    },

    /// Remove a personal mapping.
    Remove {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// List all personal mappings.
    List,

    /// Remove every personal mapping.
    Clear,
}

#[derive(Subcommand)]
pub enum PopularityCommand {
    /// Record one mapping choice without saving a personal mapping.
    Record {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "GARMIN_NAME")]
        garmin_name: String,
    },

    /// Show recorded choices for one exercise name.
    Show {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Show aggregate counters over the whole popularity table.
    Stats,

    /// Reset the popularity table (admin operation).
    Clear,
}

#[derive(Subcommand)]
pub enum LexiconCommand {
    /// Load the dictionaries and report their sizes; fails on any
    /// malformed file.
    Check,
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
