//! Normalization rule tables: abbreviations, stopwords, plural rules.
//!
//! Rules are validated at construction so that the normalizer is
//! idempotent by construction: abbreviation expansions must not contain
//! further abbreviation keys, and stopwords must not double as keys.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, Result};

/// A suffix-rewrite rule used to singularize plural tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralRule {
    /// Token suffix to match (e.g., "ies").
    pub suffix: String,
    /// Replacement for the suffix (e.g., "y").
    pub replacement: String,
    /// Minimum token length for the rule to apply.
    pub min_len: usize,
}

impl PluralRule {
    fn new(suffix: &str, replacement: &str, min_len: usize) -> Self {
        Self {
            suffix: suffix.to_string(),
            replacement: replacement.to_string(),
            min_len,
        }
    }
}

/// On-disk shape of the rules dictionary. All sections are optional;
/// absent sections fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
    #[serde(default)]
    pub stopwords: Vec<String>,
    #[serde(default)]
    pub plural_rules: Vec<PluralRule>,
}

/// Validated rule tables backing the normalizer.
#[derive(Debug, Clone)]
pub struct NormalizerRules {
    /// Abbreviation key token sequences with their expansions, ordered
    /// longest key first so "alt db" wins over "db".
    abbreviations: Vec<(Vec<String>, Vec<String>)>,
    stopwords: BTreeSet<String>,
    plural_rules: Vec<PluralRule>,
}

impl NormalizerRules {
    /// Built-in rule tables covering the common gym shorthand.
    pub fn builtin() -> Self {
        let mut abbreviations = BTreeMap::new();
        for (key, expansion) in BUILTIN_ABBREVIATIONS {
            abbreviations.insert((*key).to_string(), (*expansion).to_string());
        }
        let stopwords = BUILTIN_STOPWORDS.iter().map(|s| (*s).to_string()).collect();
        Self::from_parts(abbreviations, stopwords, builtin_plural_rules())
            .unwrap_or_else(|error| unreachable!("built-in rules are valid: {error}"))
    }

    /// Build rules from a parsed dictionary, filling absent sections
    /// from the built-in defaults.
    pub fn from_file(file: RulesFile) -> Result<Self> {
        let builtin = Self::builtin();
        let abbreviations = if file.abbreviations.is_empty() {
            builtin
                .abbreviations
                .iter()
                .map(|(key, expansion)| (key.join(" "), expansion.join(" ")))
                .collect()
        } else {
            file.abbreviations
        };
        let stopwords: Vec<String> = if file.stopwords.is_empty() {
            builtin.stopwords.iter().cloned().collect()
        } else {
            file.stopwords
        };
        let plural_rules = if file.plural_rules.is_empty() {
            builtin.plural_rules
        } else {
            file.plural_rules
        };
        Self::from_parts(
            abbreviations,
            stopwords.into_iter().collect(),
            plural_rules,
        )
    }

    fn from_parts(
        abbreviations: BTreeMap<String, String>,
        stopwords: BTreeSet<String>,
        plural_rules: Vec<PluralRule>,
    ) -> Result<Self> {
        let keys: BTreeSet<&str> = abbreviations.keys().map(String::as_str).collect();

        for (key, expansion) in &abbreviations {
            if key.trim().is_empty() || expansion.trim().is_empty() {
                return Err(LexiconError::InvalidAbbreviation {
                    key: key.clone(),
                    message: "key and expansion must be non-empty".to_string(),
                });
            }
            // Expansions must be fixpoints of expansion, otherwise a
            // second normalization pass would produce a different key.
            for token in expansion.split_whitespace() {
                if keys.contains(token) {
                    return Err(LexiconError::InvalidAbbreviation {
                        key: key.clone(),
                        message: format!("expansion token '{token}' is itself an abbreviation"),
                    });
                }
            }
        }
        for stopword in &stopwords {
            if keys.contains(stopword.as_str()) {
                return Err(LexiconError::InvalidAbbreviation {
                    key: stopword.clone(),
                    message: "stopword collides with an abbreviation key".to_string(),
                });
            }
        }
        for rule in &plural_rules {
            if rule.suffix.is_empty() {
                return Err(LexiconError::InvalidPluralRule {
                    suffix: rule.suffix.clone(),
                    message: "suffix must be non-empty".to_string(),
                });
            }
            if rule.replacement.ends_with('s') && !rule.replacement.ends_with("ss") {
                return Err(LexiconError::InvalidPluralRule {
                    suffix: rule.suffix.clone(),
                    message: "replacement would re-trigger singularization".to_string(),
                });
            }
        }

        let mut keyed: Vec<(Vec<String>, Vec<String>)> = abbreviations
            .into_iter()
            .map(|(key, expansion)| {
                (
                    key.split_whitespace().map(str::to_string).collect(),
                    expansion.split_whitespace().map(str::to_string).collect(),
                )
            })
            .collect();
        // Longest key sequence first so multi-token shorthand is not
        // shadowed by one of its own tokens.
        keyed.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let rules = Self {
            abbreviations: keyed,
            stopwords,
            plural_rules,
        };
        // Expansion output must survive the rest of the pipeline
        // unchanged, otherwise re-normalizing a key would alter it.
        for (key, expansion) in &rules.abbreviations {
            for token in expansion {
                if rules.is_stopword(token) || rules.singularize(token) != *token {
                    return Err(LexiconError::InvalidAbbreviation {
                        key: key.join(" "),
                        message: format!("expansion token '{token}' is not normalization-stable"),
                    });
                }
            }
        }
        Ok(rules)
    }

    pub(crate) fn abbreviations(&self) -> &[(Vec<String>, Vec<String>)] {
        &self.abbreviations
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Singularize a token via the rule table, falling through
    /// unchanged when no rule matches. Tokens with digits pass through
    /// untouched so plan notation never mutates into a different
    /// token shape.
    pub fn singularize(&self, token: &str) -> String {
        if !token.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return token.to_string();
        }
        for rule in &self.plural_rules {
            if token.len() >= rule.min_len && token.ends_with(rule.suffix.as_str()) {
                let stem = &token[..token.len() - rule.suffix.len()];
                return format!("{stem}{}", rule.replacement);
            }
        }
        // Generic trailing-s strip, guarded against mass nouns and
        // tokens where the 's' is part of the stem.
        if token.len() >= 4
            && token.ends_with('s')
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
        {
            return token[..token.len() - 1].to_string();
        }
        token.to_string()
    }
}

impl Default for NormalizerRules {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN_ABBREVIATIONS: &[(&str, &str)] = &[
    ("db", "dumbbell"),
    ("bb", "barbell"),
    ("kb", "kettlebell"),
    ("wb", "wall ball"),
    ("oh", "overhead"),
    ("ohp", "overhead press"),
    ("pu", "push up"),
    ("pushup", "push up"),
    ("pressup", "push up"),
    ("pullup", "pull up"),
    ("chinup", "chin up"),
    ("situp", "sit up"),
    ("medball", "medicine ball"),
    ("skierg", "ski erg"),
    ("alt", "alternating"),
    ("rdl", "romanian deadlift"),
    ("sldl", "romanian deadlift"),
    ("bss", "bulgarian split squat"),
    ("t2b", "toe bar"),
    ("ttb", "toe bar"),
    ("k2e", "knee elbow"),
    ("dbs", "dumbbell"),
    ("kbs", "kettlebell"),
    ("du", "double under"),
    ("dus", "double under"),
    // Too short for the generic trailing-s strip.
    ("ups", "up"),
];

const BUILTIN_STOPWORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "each", "for", "from", "in", "into", "of", "on", "or", "per",
    "s", "the", "to", "with",
];

fn builtin_plural_rules() -> Vec<PluralRule> {
    vec![
        PluralRule::new("ies", "y", 4),
        PluralRule::new("sses", "ss", 5),
        PluralRule::new("ches", "ch", 5),
        PluralRule::new("shes", "sh", 5),
        PluralRule::new("xes", "x", 4),
        PluralRule::new("zes", "z", 4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_are_valid() {
        let rules = NormalizerRules::builtin();
        assert!(rules.is_stopword("the"));
        assert!(!rules.is_stopword("squat"));
    }

    #[test]
    fn singularize_follows_rule_table() {
        let rules = NormalizerRules::builtin();
        assert_eq!(rules.singularize("crunches"), "crunch");
        assert_eq!(rules.singularize("flies"), "fly");
        assert_eq!(rules.singularize("lunges"), "lunge");
        assert_eq!(rules.singularize("press"), "press");
        assert_eq!(rules.singularize("abs"), "abs");
        assert_eq!(rules.singularize("burpees"), "burpee");
    }

    #[test]
    fn singularize_is_idempotent() {
        let rules = NormalizerRules::builtin();
        for token in ["crunches", "flies", "lunges", "press", "rows", "glasses"] {
            let once = rules.singularize(token);
            assert_eq!(rules.singularize(&once), once, "token {token}");
        }
    }

    #[test]
    fn rejects_expansion_containing_a_key() {
        let mut abbreviations = BTreeMap::new();
        abbreviations.insert("db".to_string(), "dumbbell".to_string());
        abbreviations.insert("dbl".to_string(), "double db".to_string());
        let result = NormalizerRules::from_file(RulesFile {
            abbreviations,
            ..RulesFile::default()
        });
        assert!(matches!(
            result,
            Err(LexiconError::InvalidAbbreviation { .. })
        ));
    }
}
