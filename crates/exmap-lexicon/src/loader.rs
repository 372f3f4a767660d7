//! Optional dictionary files layered over the built-in defaults.
//!
//! A data directory may carry any of:
//!   canonical_exercises.json  - array of canonical exercises
//!   garmin_catalog.txt        - one catalog name per line
//!   manual_overrides.json     - map of raw phrase to catalog name
//!   normalizer_rules.json     - abbreviation/stopword/plural tables
//!
//! Absent files fall back to the defaults; a present but malformed
//! file is fatal, since shipping a broken dictionary is a deployment
//! error rather than a per-request condition.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use exmap_model::{CanonicalExercise, GarminCatalogEntry};
use tracing::debug;

use crate::error::{LexiconError, Result};
use crate::rules::RulesFile;

pub const CANONICAL_FILE: &str = "canonical_exercises.json";
pub const CATALOG_FILE: &str = "garmin_catalog.txt";
pub const OVERRIDES_FILE: &str = "manual_overrides.json";
pub const RULES_FILE: &str = "normalizer_rules.json";

pub fn load_canonical(dir: &Path) -> Result<Option<Vec<CanonicalExercise>>> {
    let path = dir.join(CANONICAL_FILE);
    let Some(text) = read_optional(&path)? else {
        return Ok(None);
    };
    let entries: Vec<CanonicalExercise> =
        serde_json::from_str(&text).map_err(|source| LexiconError::Json {
            path: path.clone(),
            source,
        })?;
    debug!(path = %path.display(), count = entries.len(), "loaded canonical exercises");
    Ok(Some(entries))
}

pub fn load_catalog(dir: &Path) -> Result<Option<Vec<GarminCatalogEntry>>> {
    let path = dir.join(CATALOG_FILE);
    let Some(text) = read_optional(&path)? else {
        return Ok(None);
    };
    let entries: Vec<GarminCatalogEntry> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(GarminCatalogEntry::new)
        .collect();
    debug!(path = %path.display(), count = entries.len(), "loaded catalog names");
    Ok(Some(entries))
}

pub fn load_overrides(dir: &Path) -> Result<Option<Vec<(String, String)>>> {
    let path = dir.join(OVERRIDES_FILE);
    let Some(text) = read_optional(&path)? else {
        return Ok(None);
    };
    let map: BTreeMap<String, String> =
        serde_json::from_str(&text).map_err(|source| LexiconError::Json {
            path: path.clone(),
            source,
        })?;
    debug!(path = %path.display(), count = map.len(), "loaded manual overrides");
    Ok(Some(map.into_iter().collect()))
}

pub fn load_rules(dir: &Path) -> Result<Option<RulesFile>> {
    let path = dir.join(RULES_FILE);
    let Some(text) = read_optional(&path)? else {
        return Ok(None);
    };
    let file: RulesFile = serde_json::from_str(&text).map_err(|source| LexiconError::Json {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "loaded normalizer rules");
    Ok(Some(file))
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absent_files_fall_back() {
        let dir = tempdir().unwrap();
        assert!(load_canonical(dir.path()).unwrap().is_none());
        assert!(load_catalog(dir.path()).unwrap().is_none());
        assert!(load_overrides(dir.path()).unwrap().is_none());
        assert!(load_rules(dir.path()).unwrap().is_none());
    }

    #[test]
    fn catalog_file_skips_blank_and_comment_lines() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CATALOG_FILE),
            "# device names\nPush Up\n\n  Goblet Squat  \n",
        )
        .unwrap();
        let entries = load_catalog(dir.path()).unwrap().unwrap();
        let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["Push Up", "Goblet Squat"]);
    }

    #[test]
    fn malformed_json_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(OVERRIDES_FILE), "{not json").unwrap();
        let result = load_overrides(dir.path());
        assert!(matches!(result, Err(LexiconError::Json { .. })));
    }
}
