//! Keyword-based category detection for normalized exercise keys.

use std::collections::BTreeMap;

use exmap_model::NormalizedKey;

use crate::defaults::CATEGORY_KEYWORDS;

/// Token keyword to category table. Detection picks the category of
/// the LAST matching token in the key, so "dumbbell bench press"
/// resolves on "press" rather than an earlier equipment token.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    by_keyword: BTreeMap<String, String>,
}

impl CategoryTable {
    pub fn builtin() -> Self {
        Self::new(
            CATEGORY_KEYWORDS
                .iter()
                .map(|(keyword, category)| ((*keyword).to_string(), (*category).to_string())),
        )
    }

    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            by_keyword: entries.into_iter().collect(),
        }
    }

    /// Category of the last token in `key` present in the table.
    pub fn detect(&self, key: &NormalizedKey) -> Option<&str> {
        key.as_str()
            .split_whitespace()
            .rev()
            .find_map(|token| self.by_keyword.get(token))
            .map(String::as_str)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_matching_token_wins() {
        let table = CategoryTable::builtin();
        assert_eq!(
            table.detect(&NormalizedKey::new("dumbbell bench press")),
            Some("BENCH_PRESS")
        );
        assert_eq!(
            table.detect(&NormalizedKey::new("bulgarian split squat")),
            Some("SQUAT")
        );
        assert_eq!(
            table.detect(&NormalizedKey::new("sled push")),
            Some("PUSH_UP")
        );
    }

    #[test]
    fn unknown_tokens_yield_no_category() {
        let table = CategoryTable::builtin();
        assert_eq!(table.detect(&NormalizedKey::new("mystery movement")), None);
    }
}
