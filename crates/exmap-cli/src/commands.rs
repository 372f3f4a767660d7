use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info};

use exmap_lexicon::Lexicon;
use exmap_match::{BatchItem, ExerciseMapper, ResolverConfig};
use exmap_model::BatchReport;
use exmap_store::{PopularityStore, UserMappingStore};

use crate::cli::{CheckArgs, Cli, MappingCommand, PopularityCommand, ResolveArgs, SuggestArgs};
use crate::summary::{
    print_batch_report, print_match_result, print_popularity_entries, print_popularity_stats,
    print_suggestions, print_user_mappings,
};

const USER_MAPPINGS_FILE: &str = "user_mappings.json";
const POPULARITY_FILE: &str = "popularity.json";

/// Build the mapper from the global CLI flags.
///
/// Without `--state-dir` the stores are in-memory and nothing written
/// during the run survives it.
pub fn build_mapper(cli: &Cli) -> Result<ExerciseMapper> {
    let lexicon = load_lexicon(cli)?;
    let (user, popularity) = match &cli.state_dir {
        Some(dir) => {
            let user = UserMappingStore::open(dir.join(USER_MAPPINGS_FILE))
                .with_context(|| format!("open user mappings in {}", dir.display()))?;
            let popularity = PopularityStore::open(dir.join(POPULARITY_FILE))
                .with_context(|| format!("open popularity table in {}", dir.display()))?;
            (user, popularity)
        }
        None => {
            debug!("no state directory given; using in-memory stores");
            (UserMappingStore::ephemeral(), PopularityStore::ephemeral())
        }
    };
    Ok(ExerciseMapper::new(
        lexicon,
        user,
        popularity,
        ResolverConfig::default(),
    ))
}

fn load_lexicon(cli: &Cli) -> Result<Lexicon> {
    match &cli.data_dir {
        Some(dir) => Lexicon::load_dir(dir)
            .with_context(|| format!("load dictionaries from {}", dir.display())),
        None => Lexicon::builtin().context("load built-in dictionaries"),
    }
}

pub fn run_resolve(mapper: &ExerciseMapper, args: &ResolveArgs) -> Result<()> {
    let result = mapper.resolve(&args.name, args.hint.as_deref());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_match_result(&result);
    }
    Ok(())
}

pub fn run_suggest(mapper: &ExerciseMapper, args: &SuggestArgs) -> Result<()> {
    let result = mapper.suggest(&args.name, args.by_type);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_suggestions(&result);
    }
    Ok(())
}

/// Resolve every exercise in a workout file. The report's
/// `can_proceed` flag drives the process exit code.
pub fn run_check(mapper: &ExerciseMapper, args: &CheckArgs) -> Result<BatchReport> {
    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("read workout file {}", args.file.display()))?;
    let items = parse_workout_lines(&content);
    info!(file = %args.file.display(), exercises = items.len(), "checking workout file");
    let report = mapper.validate_batch(&items);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_batch_report(&report);
    }
    Ok(report)
}

pub fn run_mapping(mapper: &ExerciseMapper, command: &MappingCommand) -> Result<()> {
    match command {
        MappingCommand::Add { name, garmin_name } => {
            mapper
                .add_user_mapping(name, garmin_name)
                .with_context(|| format!("save mapping for '{name}'"))?;
            println!("Saved mapping: {name} -> {garmin_name}");
        }
        MappingCommand::Remove { name } => {
            match mapper
                .remove_user_mapping(name)
                .with_context(|| format!("remove mapping for '{name}'"))?
            {
                Some(previous) => println!("Removed mapping: {name} -> {previous}"),
                None => println!("No mapping found for '{name}'"),
            }
        }
        MappingCommand::List => {
            print_user_mappings(&mapper.list_user_mappings());
        }
        MappingCommand::Clear => {
            let removed = mapper.clear_user_mappings().context("clear mappings")?;
            println!("Removed {removed} mapping(s)");
        }
    }
    Ok(())
}

pub fn run_popularity(mapper: &ExerciseMapper, command: &PopularityCommand) -> Result<()> {
    match command {
        PopularityCommand::Record { name, garmin_name } => {
            let count = mapper
                .record_popularity(name, garmin_name)
                .with_context(|| format!("record choice for '{name}'"))?;
            println!("Recorded: {name} -> {garmin_name} (chosen {count} time(s))");
        }
        PopularityCommand::Show { name } => {
            let entries = mapper.popularity_for(name);
            if entries.is_empty() {
                println!("No recorded choices for '{name}'");
            } else {
                print_popularity_entries(&entries);
            }
        }
        PopularityCommand::Stats => {
            print_popularity_stats(&mapper.popularity_stats());
        }
        PopularityCommand::Clear => {
            let removed = mapper.clear_popularity().context("clear popularity table")?;
            println!("Removed {removed} popularity record(s)");
        }
    }
    Ok(())
}

/// One exercise per line; blank lines and '#' comments are skipped.
fn parse_workout_lines(content: &str) -> Vec<BatchItem> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(BatchItem::new)
        .collect()
}

/// Load every dictionary and report sizes. Any malformed file is a
/// hard error, same as it would be at resolution time.
pub fn run_lexicon_check(cli: &Cli) -> Result<()> {
    let lexicon = load_lexicon(cli)?;
    match &cli.data_dir {
        Some(dir) => println!("Dictionaries loaded from {}", dir.display()),
        None => println!("Built-in dictionaries loaded"),
    }
    println!("  canonical exercises: {}", lexicon.canonical.len());
    println!("  catalog entries:     {}", lexicon.catalog.len());
    println!("  manual overrides:    {}", lexicon.overrides.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn workout_lines_skip_comments_and_blanks() {
        let items = parse_workout_lines("Burpees x10\n\n# warm-up\n  Air Squats  \n");
        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Burpees x10", "Air Squats"]);
    }

    #[test]
    fn state_dir_survives_a_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "exmap",
            "--state-dir",
            dir.path().to_str().unwrap(),
            "mapping",
            "list",
        ]);

        let mapper = build_mapper(&cli).unwrap();
        mapper
            .add_user_mapping("BB Thrusters", "Barbell Thruster")
            .unwrap();
        drop(mapper);

        let reopened = build_mapper(&cli).unwrap();
        let result = reopened.resolve("BB Thrusters", None);
        assert_eq!(result.final_name, "Barbell Thruster");
        assert_eq!(result.score, 1.0);
    }
}

