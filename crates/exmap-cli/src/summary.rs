//! Table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use exmap_model::{
    BatchReport, MatchResult, MatchStatus, PopularEntry, PopularityStats, SuggestedExercise,
    SuggestionResult,
};

pub fn print_match_result(result: &MatchResult) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("Input"), Cell::new(&result.input)]);
    table.add_row(vec![header_cell("Key"), Cell::new(result.key.as_str())]);
    table.add_row(vec![
        header_cell("Garmin name"),
        Cell::new(&result.final_name).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![header_cell("Score"), score_cell(result.score)]);
    table.add_row(vec![header_cell("Status"), status_cell(result.status)]);
    table.add_row(vec![header_cell("Source"), Cell::new(result.source.as_str())]);
    println!("{table}");
    if let Some(warning) = &result.warning {
        eprintln!("warning: {warning}");
    }
}

pub fn print_suggestions(result: &SuggestionResult) {
    println!("Input: {}", result.input);
    match &result.best_match {
        Some(best) => {
            println!(
                "Best match: {} (score {:.2}, chosen {} time(s))",
                best.name, best.score, best.popularity
            );
        }
        None => println!("Best match: none"),
    }
    if result.needs_user_search {
        println!("No close match found; a manual catalog search is recommended.");
    }
    print_suggestion_table("Similar exercises", &result.similar_exercises);
    if let Some(category) = &result.category {
        print_suggestion_table(
            &format!("Other {category} exercises"),
            &result.exercises_by_type,
        );
    }
}

fn print_suggestion_table(title: &str, suggestions: &[SuggestedExercise]) {
    if suggestions.is_empty() {
        return;
    }
    println!();
    println!("{title}:");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Garmin name"),
        header_cell("Score"),
        header_cell("Chosen"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for suggestion in suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.name),
            score_cell(suggestion.score),
            popularity_cell(suggestion.popularity),
        ]);
    }
    println!("{table}");
}

pub fn print_batch_report(report: &BatchReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Garmin name"),
        header_cell("Score"),
        header_cell("Status"),
        header_cell("Source"),
    ]);
    apply_report_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for result in report.iter() {
        table.add_row(vec![
            Cell::new(&result.input),
            Cell::new(&result.final_name),
            score_cell(result.score),
            status_cell(result.status),
            Cell::new(result.source.as_str()),
        ]);
    }
    println!("{table}");
    println!(
        "Total: {}  valid: {}  needs review: {}  unmapped: {}",
        report.total,
        report.valid.len(),
        report.needs_review.len(),
        report.unmapped.len()
    );
    if report.can_proceed {
        println!("All exercises resolved; the workout can be uploaded.");
    } else {
        eprintln!("Some exercises are unmapped; resolve them before uploading.");
    }
}

pub fn print_user_mappings(mappings: &[(exmap_model::NormalizedKey, String)]) {
    if mappings.is_empty() {
        println!("No personal mappings saved");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Exercise"), header_cell("Garmin name")]);
    apply_table_style(&mut table);
    for (key, target) in mappings {
        table.add_row(vec![Cell::new(key.as_str()), Cell::new(target)]);
    }
    println!("{table}");
}

pub fn print_popularity_entries(entries: &[PopularEntry]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Exercise"),
        header_cell("Garmin name"),
        header_cell("Chosen"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.exercise.as_str()),
            Cell::new(&entry.garmin_name),
            popularity_cell(entry.count),
        ]);
    }
    println!("{table}");
}

pub fn print_popularity_stats(stats: &PopularityStats) {
    println!("Total choices:     {}", stats.total_choices);
    println!("Unique exercises:  {}", stats.unique_exercises);
    println!("Unique mappings:   {}", stats.unique_mappings);
    if !stats.most_popular.is_empty() {
        println!();
        println!("Most popular:");
        print_popularity_entries(&stats.most_popular);
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: MatchStatus) -> Cell {
    match status {
        MatchStatus::Valid => Cell::new(status.as_str())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        MatchStatus::NeedsReview => Cell::new(status.as_str())
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        MatchStatus::Unmapped => Cell::new(status.as_str())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn score_cell(score: f64) -> Cell {
    Cell::new(format!("{score:.2}"))
}

fn popularity_cell(count: u64) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        Cell::new("-").add_attribute(Attribute::Dim)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
