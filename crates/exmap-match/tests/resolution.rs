use exmap_match::{BatchItem, ExerciseMapper};
use exmap_model::{MatchSource, MatchStatus};

fn mapper() -> ExerciseMapper {
    ExerciseMapper::in_memory().unwrap()
}

#[test]
fn abbreviated_name_hits_the_catalog_exactly() {
    let result = mapper().resolve("DB Bench Press", None);
    assert_eq!(result.key.as_str(), "dumbbell bench press");
    assert_eq!(result.final_name, "Dumbbell Bench Press");
    assert_eq!(result.status, MatchStatus::Valid);
    assert_eq!(result.score, 1.0);
    assert!(result.warning.is_none());
}

#[test]
fn unknown_name_falls_back_with_a_warning() {
    let mapper = mapper();
    let result = mapper.resolve("UNKNOWN EXERCISE XYZ", None);
    assert_eq!(result.status, MatchStatus::Unmapped);
    assert_eq!(result.source, MatchSource::Fallback);
    assert_eq!(result.final_name, "Unknown Exercise Xyz");
    assert!(result.is_fallback());
    assert!(result.warning.is_some());

    let suggestion = mapper.suggest("UNKNOWN EXERCISE XYZ", false);
    assert!(suggestion.needs_user_search);
}

#[test]
fn canonical_synonyms_resolve_valid() {
    let mapper = mapper();
    for (synonym, expected) in [
        ("Military Press", "Barbell Overhead Press"),
        ("Pendlay Row", "Barbell Row"),
        ("Skipping", "Jump Rope"),
    ] {
        let result = mapper.resolve(synonym, None);
        assert_eq!(result.final_name, expected, "synonym {synonym}");
        assert_eq!(result.status, MatchStatus::Valid, "synonym {synonym}");
        assert_eq!(result.source, MatchSource::Canonical, "synonym {synonym}");
    }
}

#[test]
fn user_mapping_beats_every_other_signal() {
    let mapper = mapper();
    // Stack the deck against the user: a popular choice and an exact
    // catalog name both point elsewhere.
    for _ in 0..10 {
        mapper.record_popularity("goblet squat", "Air Squat").unwrap();
    }
    mapper.add_user_mapping("Goblet Squat", "Kettlebell Floor to Shelf").unwrap();

    let result = mapper.resolve("goblet squats", None);
    assert_eq!(result.final_name, "Kettlebell Floor to Shelf");
    assert_eq!(result.source, MatchSource::User);
    assert_eq!(result.score, 1.0);
}

#[test]
fn popular_choice_wins_over_fuzzy_when_similar_enough() {
    let mapper = mapper();
    mapper.record_popularity("squats", "Air Squat").unwrap();
    mapper.record_popularity("squats", "Air Squat").unwrap();

    let result = mapper.resolve("Squats", None);
    assert_eq!(result.final_name, "Air Squat");
    assert_eq!(result.source, MatchSource::Popular);
}

#[test]
fn crowd_mapping_onto_a_shorter_name_still_fires() {
    let mapper = mapper();
    // The chosen name is a single token buried inside a much longer
    // key; the fuzzy score is poor but the overlap is total.
    for _ in 0..20 {
        mapper.record_popularity("bulgarian lunge thing", "Lunge").unwrap();
    }

    let result = mapper.resolve("Bulgarian Lunge Thing", None);
    assert_eq!(result.final_name, "Lunge");
    assert_eq!(result.source, MatchSource::Popular);
}

#[test]
fn dissimilar_popular_entry_is_rejected() {
    let mapper = mapper();
    // A corrupted entry captured under a near-collision key.
    mapper.record_popularity("burpees", "Barbell Overhead Press").unwrap();

    let result = mapper.resolve("Burpees", None);
    assert_ne!(result.source, MatchSource::Popular);
    assert_eq!(result.final_name, "Burpee");
}

#[test]
fn manual_override_catches_tricky_phrases() {
    let result = mapper().resolve("KB Bottoms Up Press", None);
    assert_eq!(result.final_name, "Kettlebell Floor to Shelf");
    assert_eq!(result.source, MatchSource::Manual);
    assert_eq!(result.status, MatchStatus::Valid);
}

#[test]
fn superset_notation_is_ignored() {
    let result = mapper().resolve("A1: Wall Balls x15", None);
    assert_eq!(result.final_name, "Wall Ball");
    assert_eq!(result.status, MatchStatus::Valid);
}

#[test]
fn typo_still_reaches_the_catalog() {
    let result = mapper().resolve("Dumbell Bench Press", None);
    assert_eq!(result.final_name, "Dumbbell Bench Press");
    assert!(result.score > 0.88, "typo scored {}", result.score);
}

#[test]
fn hint_is_scored_against_the_catalog() {
    let result = mapper().resolve("weird ocr garbage zzz", Some("Dumbbell Bench Press"));
    assert_eq!(result.final_name, "Dumbbell Bench Press");
    assert_eq!(result.score, 1.0);
    assert_eq!(result.status, MatchStatus::Valid);
}

#[test]
fn add_user_mapping_feeds_the_popularity_table() {
    let mapper = mapper();
    mapper.add_user_mapping("trx rows", "TRX Inverted Row").unwrap();

    let entries = mapper.popularity_for("trx rows");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].garmin_name, "TRX Inverted Row");
    assert_eq!(entries[0].count, 1);
}

#[test]
fn record_popularity_counts_exactly() {
    let mapper = mapper();
    for _ in 0..5 {
        mapper.record_popularity("rdl", "Romanian Deadlift").unwrap();
    }
    let entries = mapper.popularity_for("RDLs");
    assert_eq!(entries[0].count, 5);
}

#[test]
fn user_mapping_lifecycle() {
    let mapper = mapper();
    mapper.add_user_mapping("ski", "Ski Erg").unwrap();
    assert_eq!(mapper.list_user_mappings().len(), 1);

    let removed = mapper.remove_user_mapping("SKI").unwrap();
    assert_eq!(removed.as_deref(), Some("Ski Erg"));
    assert!(mapper.list_user_mappings().is_empty());

    mapper.add_user_mapping("a", "Air Squat").unwrap();
    mapper.add_user_mapping("b", "Burpee").unwrap();
    assert_eq!(mapper.clear_user_mappings().unwrap(), 2);
}

#[test]
fn batch_validation_blocks_on_unmapped() {
    let mapper = mapper();
    let report = mapper.validate_batch(&[
        BatchItem::new("KB Swings"),
        BatchItem::new("UNKNOWN EXERCISE XYZ"),
    ]);
    assert_eq!(report.total, 2);
    assert!(!report.can_proceed);
    assert_eq!(report.unmapped[0].input, "UNKNOWN EXERCISE XYZ");
}

#[test]
fn resolve_is_total_on_degenerate_input() {
    let mapper = mapper();
    for raw in ["", "   ", "x10", "!!!"] {
        let result = mapper.resolve(raw, None);
        assert_eq!(result.input, raw);
        // Never panics; fallback or some low-confidence match.
        assert!(result.score >= 0.0 && result.score <= 1.0);
    }
}
