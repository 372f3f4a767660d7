//! Review-time suggestion structures.

use serde::{Deserialize, Serialize};

/// A catalog entry offered as an alternative, with crowd context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedExercise {
    /// Garmin catalog name.
    pub name: String,
    /// Similarity to the query in [0, 1].
    pub score: f64,
    /// How many users have chosen this mapping for the query.
    pub popularity: u64,
}

impl SuggestedExercise {
    pub fn is_popular(&self) -> bool {
        self.popularity > 0
    }
}

/// Alternatives view for human review of a single exercise name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    /// Raw input name.
    pub input: String,
    /// Highest-confidence match, if any candidate scored at all.
    pub best_match: Option<SuggestedExercise>,
    /// Top-K catalog entries by popularity, then score.
    pub similar_exercises: Vec<SuggestedExercise>,
    /// Catalog entries sharing the detected movement category.
    pub exercises_by_type: Vec<SuggestedExercise>,
    /// Detected movement category, when a keyword matched.
    pub category: Option<String>,
    /// True when no candidate reached the review floor; the caller
    /// should hand the search over to the user.
    pub needs_user_search: bool,
}
