//! Match candidates, results, and confidence classification.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::key::NormalizedKey;

/// Which resolver rule produced a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// A per-user saved mapping.
    User,
    /// The crowd-sourced popularity table.
    Popular,
    /// The hardcoded manual override table.
    Manual,
    /// Fuzzy match against the Garmin catalog.
    Fuzzy,
    /// Classification through the canonical exercise dictionary.
    Canonical,
    /// Title-cased input, used when nothing else matched.
    Fallback,
}

impl MatchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Popular => "popular",
            Self::Manual => "manual",
            Self::Fuzzy => "fuzzy",
            Self::Canonical => "canonical",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status derived from a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Below the review floor; the fallback name was used.
    Unmapped,
    /// Between the review floor and the valid bar; a human should confirm.
    NeedsReview,
    /// At or above the valid bar; usable without review.
    Valid,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::NeedsReview => "needs_review",
            Self::Unmapped => "unmapped",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score boundaries between the review statuses.
///
/// - At or above `valid`: [`MatchStatus::Valid`]
/// - At or above `needs_review` but below `valid`: [`MatchStatus::NeedsReview`]
/// - Below `needs_review`: [`MatchStatus::Unmapped`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    /// Minimum score for a mapping to be trusted without review (default: 0.88).
    pub valid: f64,
    /// Minimum score for a mapping to be worth reviewing (default: 0.40).
    pub needs_review: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            valid: 0.88,
            needs_review: 0.40,
        }
    }
}

impl MatchThresholds {
    /// Create thresholds, rejecting inverted or out-of-range bounds.
    pub fn new(valid: f64, needs_review: f64) -> Result<Self, ModelError> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !in_range(valid) || !in_range(needs_review) || needs_review > valid {
            return Err(ModelError::InvalidThresholds {
                valid,
                needs_review,
            });
        }
        Ok(Self {
            valid,
            needs_review,
        })
    }

    /// Classify a confidence score into a review status.
    pub fn classify(&self, score: f64) -> MatchStatus {
        if score >= self.valid {
            MatchStatus::Valid
        } else if score >= self.needs_review {
            MatchStatus::NeedsReview
        } else {
            MatchStatus::Unmapped
        }
    }
}

/// A scored candidate produced during resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Candidate Garmin name.
    pub name: String,
    /// Similarity confidence in [0, 1].
    pub score: f64,
    /// True when the normalized query equals the normalized candidate.
    pub is_exact: bool,
    /// Which rule produced this candidate.
    pub source: MatchSource,
}

/// Final outcome of resolving one exercise name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Raw input name as supplied by the caller.
    pub input: String,
    /// Normalized key the input resolved under.
    pub key: NormalizedKey,
    /// Chosen Garmin name (or the title-cased fallback).
    pub final_name: String,
    /// Confidence in [0, 1].
    pub score: f64,
    /// Review status derived from the score.
    pub status: MatchStatus,
    /// Which rule produced the final name.
    pub source: MatchSource,
    /// Warning attached when the fallback path synthesized the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl MatchResult {
    /// True when the final name was synthesized rather than matched.
    pub fn is_fallback(&self) -> bool {
        self.source == MatchSource::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        let thresholds = MatchThresholds::default();
        assert_eq!(thresholds.classify(0.88), MatchStatus::Valid);
        assert_eq!(thresholds.classify(0.879_999), MatchStatus::NeedsReview);
        assert_eq!(thresholds.classify(0.40), MatchStatus::NeedsReview);
        assert_eq!(thresholds.classify(0.399_999), MatchStatus::Unmapped);
        assert_eq!(thresholds.classify(1.0), MatchStatus::Valid);
        assert_eq!(thresholds.classify(0.0), MatchStatus::Unmapped);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        assert!(MatchThresholds::new(0.4, 0.88).is_err());
        assert!(MatchThresholds::new(1.2, 0.4).is_err());
        assert!(MatchThresholds::new(0.88, 0.4).is_ok());
    }
}
