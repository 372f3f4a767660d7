use exmap_model::{
    CanonicalExercise, MatchResult, MatchSource, MatchStatus, MatchThresholds, NormalizedKey,
};

#[test]
fn match_result_serializes_round_trip() {
    let result = MatchResult {
        input: "DB Bench Press".to_string(),
        key: NormalizedKey::new("dumbbell bench press"),
        final_name: "Dumbbell Bench Press".to_string(),
        score: 0.97,
        status: MatchStatus::Valid,
        source: MatchSource::Fuzzy,
        warning: None,
    };
    let json = serde_json::to_string(&result).expect("serialize result");
    assert!(json.contains("\"status\":\"valid\""));
    assert!(json.contains("\"source\":\"fuzzy\""));
    let round: MatchResult = serde_json::from_str(&json).expect("deserialize result");
    assert_eq!(round, result);
}

#[test]
fn normalized_key_is_a_transparent_string() {
    let key = NormalizedKey::new("goblet squat");
    let json = serde_json::to_string(&key).expect("serialize key");
    assert_eq!(json, "\"goblet squat\"");
    assert_eq!(key.tokens().collect::<Vec<_>>(), vec!["goblet", "squat"]);
}

#[test]
fn canonical_exercise_builder_collects_synonyms() {
    let exercise = CanonicalExercise::new("bench press", "press")
        .with_synonyms(["flat bench", "chest press"])
        .with_equipment(["barbell", "dumbbell"]);
    assert!(exercise.synonyms.contains("flat bench"));
    assert!(exercise.equipment.contains("dumbbell"));
    assert_eq!(exercise.category, "press");
}

#[test]
fn custom_thresholds_shift_the_valid_bar() {
    let thresholds = MatchThresholds::new(0.95, 0.5).expect("valid thresholds");
    assert_eq!(thresholds.classify(0.9), MatchStatus::NeedsReview);
    assert_eq!(thresholds.classify(0.95), MatchStatus::Valid);
    assert_eq!(thresholds.classify(0.49), MatchStatus::Unmapped);
}
