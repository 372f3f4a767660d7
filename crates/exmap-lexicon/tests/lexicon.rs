use std::fs;

use exmap_lexicon::Lexicon;
use proptest::prelude::*;
use tempfile::tempdir;

#[test]
fn builtin_lexicon_loads() {
    let lexicon = Lexicon::builtin().unwrap();
    assert!(!lexicon.canonical.is_empty());
    assert!(!lexicon.catalog.is_empty());
    assert!(!lexicon.overrides.is_empty());
}

#[test]
fn catalog_entries_resolve_through_the_normalizer() {
    let lexicon = Lexicon::builtin().unwrap();
    for name in lexicon.catalog.names() {
        let key = lexicon.normalizer.normalize(name);
        assert!(
            lexicon.catalog.contains(&key),
            "catalog name {name:?} does not round-trip through its own key"
        );
    }
}

#[test]
fn override_targets_exist_in_the_catalog() {
    let lexicon = Lexicon::builtin().unwrap();
    for (key, target) in lexicon.overrides.iter() {
        let target_key = lexicon.normalizer.normalize(target);
        assert!(
            lexicon.catalog.contains(&target_key),
            "override {key} points at {target:?}, which is not a catalog name"
        );
    }
}

#[test]
fn data_dir_overrides_builtin_catalog() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("garmin_catalog.txt"),
        "Push Up\nGoblet Squat\n",
    )
    .unwrap();
    let lexicon = Lexicon::load_dir(dir.path()).unwrap();
    assert_eq!(lexicon.catalog.len(), 2);
    // Other dictionaries still come from the defaults.
    assert!(!lexicon.canonical.is_empty());
}

#[test]
fn malformed_data_dir_fails_the_load() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("canonical_exercises.json"), "[{]").unwrap();
    assert!(Lexicon::load_dir(dir.path()).is_err());
}

proptest! {
    // Normalization must be a fixpoint: feeding a key back through the
    // normalizer may not change it, otherwise stored mappings keyed by
    // normalized names would silently miss.
    #[test]
    fn normalize_is_idempotent(raw in "[A-Za-z0-9 :/_,'()-]{0,40}") {
        let lexicon = Lexicon::builtin().unwrap();
        let once = lexicon.normalizer.normalize(&raw);
        let twice = lexicon.normalizer.normalize(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_key_is_nonempty_for_nonblank_input(raw in "[A-Za-z][A-Za-z0-9 ]{0,30}") {
        let lexicon = Lexicon::builtin().unwrap();
        let key = lexicon.normalizer.normalize(&raw);
        prop_assert!(!key.is_empty());
    }
}
