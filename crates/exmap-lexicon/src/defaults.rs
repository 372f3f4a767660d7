//! Built-in dictionaries: canonical exercises, the Garmin catalog, and
//! manual override mappings. These ship with the crate so the pipeline
//! works with no data files; loaders may replace any of them.

use exmap_model::{CanonicalExercise, GarminCatalogEntry};

/// Canonical exercise dictionary with the synonyms commonly seen in
/// OCR-extracted workout plans.
pub fn builtin_canonical() -> Vec<CanonicalExercise> {
    fn entry(
        name: &str,
        synonyms: &[&str],
        category: &str,
        equipment: &[&str],
    ) -> CanonicalExercise {
        CanonicalExercise::new(name, category)
            .with_synonyms(synonyms.iter().copied())
            .with_equipment(equipment.iter().copied())
    }

    vec![
        entry("Push Up", &["press up"], "PUSH_UP", &["bodyweight"]),
        entry(
            "Barbell Bench Press",
            &["bench press", "bench", "flat bench press", "flat bench"],
            "BENCH_PRESS",
            &["barbell"],
        ),
        entry(
            "Incline Barbell Bench Press",
            &["incline bench", "incline press"],
            "BENCH_PRESS",
            &["barbell"],
        ),
        entry(
            "Dumbbell Bench Press",
            &["dumbbell bench"],
            "BENCH_PRESS",
            &["dumbbell"],
        ),
        entry(
            "Barbell Back Squat",
            &["squat", "back squat"],
            "SQUAT",
            &["barbell"],
        ),
        entry("Barbell Front Squat", &[], "SQUAT", &["barbell"]),
        entry(
            "Air Squat",
            &["bodyweight squat"],
            "SQUAT",
            &["bodyweight"],
        ),
        entry("Goblet Squat", &[], "SQUAT", &["kettlebell", "dumbbell"]),
        entry(
            "Barbell Deadlift",
            &["deadlift", "conventional deadlift"],
            "DEADLIFT",
            &["barbell"],
        ),
        entry(
            "Romanian Deadlift",
            &["romanian dl", "stiff leg deadlift"],
            "DEADLIFT",
            &["barbell"],
        ),
        entry(
            "Barbell Overhead Press",
            &["shoulder press", "military press", "strict press", "standing press"],
            "BENCH_PRESS",
            &["barbell"],
        ),
        entry(
            "Dumbbell Overhead Press",
            &["dumbbell shoulder press"],
            "BENCH_PRESS",
            &["dumbbell"],
        ),
        entry(
            "Barbell Row",
            &["row", "bent over row", "pendlay row"],
            "ROW",
            &["barbell"],
        ),
        entry("Dumbbell Row", &["one arm row"], "ROW", &["dumbbell"]),
        entry("Cable Row", &["seated row"], "ROW", &["cable"]),
        entry("Pull Up", &[], "PULL_UP", &["bodyweight"]),
        entry("Chin Up", &[], "PULL_UP", &["bodyweight"]),
        entry(
            "Lat Pulldown",
            &["pulldown", "pull down"],
            "PULL_UP",
            &["cable"],
        ),
        entry("Hip Thrust", &[], "HIP_SWING", &["barbell"]),
        entry("Glute Bridge", &["bridge"], "HIP_SWING", &["bodyweight"]),
        entry("Bicep Curl", &["curl"], "CURL", &["barbell"]),
        entry("Hammer Curl", &[], "CURL", &["dumbbell"]),
        entry(
            "Tricep Pushdown",
            &["pushdown", "rope pushdown"],
            "BENCH_PRESS",
            &["cable"],
        ),
        entry("Skull Crusher", &[], "BENCH_PRESS", &["barbell"]),
        entry("Dip", &[], "BENCH_PRESS", &["bodyweight"]),
        entry("Lunge", &[], "LUNGE", &["bodyweight"]),
        entry("Walking Lunge", &[], "LUNGE", &["bodyweight"]),
        entry("Reverse Lunge", &[], "LUNGE", &["bodyweight"]),
        entry(
            "Bulgarian Split Squat",
            &[],
            "LUNGE",
            &["dumbbell", "bodyweight"],
        ),
        entry("Plank", &[], "PLANK", &["bodyweight"]),
        entry("Crunch", &[], "CORE", &["bodyweight"]),
        entry("Sit Up", &[], "CORE", &["bodyweight"]),
        entry("Leg Raise", &[], "CORE", &["bodyweight"]),
        entry("Russian Twist", &[], "CORE", &["bodyweight"]),
        entry("Wall Ball", &[], "TOTAL_BODY", &["medicine ball"]),
        entry("Burpee", &[], "TOTAL_BODY", &["bodyweight"]),
        entry("Box Jump", &[], "PLYO", &["box"]),
        entry("Kettlebell Swing", &[], "HIP_SWING", &["kettlebell"]),
        entry("Thruster", &[], "TOTAL_BODY", &["barbell"]),
        entry("Toe Bar", &["toes to bar"], "CORE", &["bodyweight"]),
        entry("Double Under", &[], "CARDIO", &["jump rope"]),
        entry("Running", &["run", "jog", "jogging", "sprint"], "CARDIO", &[]),
        entry("Rowing", &[], "CARDIO", &["rower"]),
        entry("Cycling", &["bike"], "CARDIO", &["bike"]),
        entry("Assault Bike", &["airdyne"], "CARDIO", &["bike"]),
        entry("Ski Erg", &[], "CARDIO", &["ski erg"]),
        entry("Jump Rope", &["skipping"], "CARDIO", &["jump rope"]),
    ]
}

/// Device exercise names the fuzzy matcher scans. Mirrors the name set
/// a Garmin strength workout accepts.
pub fn builtin_catalog() -> Vec<GarminCatalogEntry> {
    BUILTIN_CATALOG_NAMES
        .iter()
        .map(|name| GarminCatalogEntry::new(*name))
        .collect()
}

const BUILTIN_CATALOG_NAMES: &[&str] = &[
    "30-degree Lat Pull-down",
    "Ab Wheel Rollout",
    "Air Squat",
    "Alternating Dumbbell Curl",
    "Assault Bike",
    "Bar Good Morning",
    "Barbell Back Squat",
    "Barbell Bench Press",
    "Barbell Deadlift",
    "Barbell Front Squat",
    "Barbell Overhead Press",
    "Barbell Row",
    "Bench Dip",
    "Bicep Curl",
    "Box Jump",
    "Bulgarian Split Squat",
    "Burpee",
    "Cable Row",
    "Chin Up",
    "Crunch",
    "Cycling",
    "Decline Barbell Bench Press",
    "Dip",
    "Double Under",
    "Dumbbell Bench Press",
    "Dumbbell Bicep Curl",
    "Dumbbell Bulgarian Split Squat",
    "Dumbbell Front Squat",
    "Dumbbell Overhead Press",
    "Dumbbell Power Clean and Jerk",
    "Dumbbell Push Press",
    "Dumbbell Row",
    "Farmer's Carry",
    "Foam Rolling",
    "Glute Bridge",
    "Goblet Squat",
    "Hammer Curl",
    "Hand Release Push Up",
    "Hang Clean",
    "Hip Thrust",
    "Incline Barbell Bench Press",
    "Incline Dumbbell Bench Press",
    "Jump Rope",
    "Kettlebell Floor to Shelf",
    "Kettlebell Swing",
    "Knees to Elbow",
    "Lat Pulldown",
    "Leg Raise",
    "Lunge",
    "Medicine Ball Slam",
    "Muscle Up",
    "Pike Push-up",
    "Plank",
    "Power Clean",
    "Preacher Curl",
    "Pull Up",
    "Push Up",
    "Reverse Lunge",
    "Romanian Deadlift",
    "Rowing",
    "Running",
    "Russian Twist",
    "Side Plank",
    "Sit Up",
    "Skull Crusher",
    "Ski Erg",
    "Ski Moguls",
    "Sled Backward Drag",
    "Sled Push",
    "Stretching",
    "Thruster",
    "Toes to Bar",
    "TRX Inverted Row",
    "Tricep Extension",
    "Tricep Pushdown",
    "Walking Lunge",
    "Wall Ball",
];

/// Manual mapping table for names the fuzzy matcher gets wrong, keyed
/// by raw phrase (normalized at load time). Matched exactly first,
/// then by longest contained key.
pub fn builtin_overrides() -> Vec<(&'static str, &'static str)> {
    vec![
        ("cable band straight arm pull down", "30-degree Lat Pull-down"),
        ("straight arm pull down", "30-degree Lat Pull-down"),
        ("kb rdl into goblet squat", "Goblet Squat"),
        ("rdl into goblet squat", "Goblet Squat"),
        ("goblet squat", "Goblet Squat"),
        ("kb bottoms up press", "Kettlebell Floor to Shelf"),
        ("bottoms up press", "Kettlebell Floor to Shelf"),
        ("db incline bench press", "Incline Dumbbell Bench Press"),
        ("incline bench press", "Incline Dumbbell Bench Press"),
        ("single arm push jerk", "Dumbbell Power Clean and Jerk"),
        ("bulgarian split squat", "Dumbbell Bulgarian Split Squat"),
        ("incline back extension goodmornings", "Bar Good Morning"),
        ("back extension goodmornings", "Bar Good Morning"),
        ("goodmornings", "Bar Good Morning"),
        ("trx rows", "TRX Inverted Row"),
        ("kneeling medball slams", "Medicine Ball Slam"),
        ("medball slams", "Medicine Ball Slam"),
        ("ski", "Ski Moguls"),
        ("plank into pike", "Pike Push-up"),
        ("kb alternating plank drag", "Plank"),
        ("alternating plank drag", "Plank"),
        ("plank drag", "Plank"),
        ("backward sled drag", "Sled Backward Drag"),
        ("sled drag", "Sled Backward Drag"),
        ("backward drag", "Sled Backward Drag"),
        ("burpee max broad jumps", "Burpee"),
        ("burpee broad jump", "Burpee"),
        ("farmers carry", "Farmer's Carry"),
        ("sled push", "Sled Push"),
        ("hand release push ups", "Hand Release Push Up"),
        ("db push press", "Dumbbell Push Press"),
        ("push press", "Dumbbell Push Press"),
        ("dual kb front squat", "Dumbbell Front Squat"),
        ("kb front squat", "Dumbbell Front Squat"),
        ("front squat", "Dumbbell Front Squat"),
    ]
}

/// Token keyword to Garmin category table, most entries taken from the
/// strength workout category guide.
pub const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("squat", "SQUAT"),
    ("lunge", "LUNGE"),
    ("deadlift", "DEADLIFT"),
    ("morning", "LEG_CURL"),
    ("clean", "OLYMPIC_LIFT"),
    ("jerk", "OLYMPIC_LIFT"),
    ("snatch", "OLYMPIC_LIFT"),
    ("slam", "PLYO"),
    ("jump", "PLYO"),
    ("press", "BENCH_PRESS"),
    ("push", "PUSH_UP"),
    ("pushdown", "BENCH_PRESS"),
    ("pull", "PULL_UP"),
    ("pulldown", "PULL_UP"),
    ("chin", "PULL_UP"),
    ("row", "ROW"),
    ("rowing", "CARDIO"),
    ("swing", "HIP_SWING"),
    ("thrust", "HIP_SWING"),
    ("plank", "PLANK"),
    ("burpee", "TOTAL_BODY"),
    ("thruster", "TOTAL_BODY"),
    ("carry", "CARRY"),
    ("sled", "SLED"),
    ("drag", "SLED"),
    ("ski", "CARDIO"),
    ("erg", "CARDIO"),
    ("run", "CARDIO"),
    ("running", "CARDIO"),
    ("bike", "CARDIO"),
    ("cycling", "CARDIO"),
    ("curl", "CURL"),
];
