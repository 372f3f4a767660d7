//! Whole-workout validation report.

use serde::{Deserialize, Serialize};

use crate::matching::{MatchResult, MatchStatus};

/// Outcome of resolving every exercise in a workout.
///
/// Results are partitioned by review status; `unmapped` entries block
/// export until the user maps them by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub valid: Vec<MatchResult>,
    pub needs_review: Vec<MatchResult>,
    pub unmapped: Vec<MatchResult>,
    /// False when any exercise is unmapped.
    pub can_proceed: bool,
}

impl BatchReport {
    pub fn from_results(results: Vec<MatchResult>) -> Self {
        let total = results.len();
        let mut valid = Vec::new();
        let mut needs_review = Vec::new();
        let mut unmapped = Vec::new();
        for result in results {
            match result.status {
                MatchStatus::Valid => valid.push(result),
                MatchStatus::NeedsReview => needs_review.push(result),
                MatchStatus::Unmapped => unmapped.push(result),
            }
        }
        let can_proceed = unmapped.is_empty();
        Self {
            total,
            valid,
            needs_review,
            unmapped,
            can_proceed,
        }
    }

    /// Iterate all results grouped by status. Input order is not
    /// preserved.
    pub fn iter(&self) -> impl Iterator<Item = &MatchResult> {
        self.valid
            .iter()
            .chain(self.needs_review.iter())
            .chain(self.unmapped.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::NormalizedKey;
    use crate::matching::MatchSource;

    fn result(name: &str, score: f64, status: MatchStatus) -> MatchResult {
        MatchResult {
            input: name.to_string(),
            key: NormalizedKey::new(name.to_lowercase()),
            final_name: name.to_string(),
            score,
            status,
            source: MatchSource::Fuzzy,
            warning: None,
        }
    }

    #[test]
    fn partitions_by_status_and_blocks_on_unmapped() {
        let report = BatchReport::from_results(vec![
            result("Bench Press", 0.95, MatchStatus::Valid),
            result("Mystery Move", 0.2, MatchStatus::Unmapped),
            result("Rows", 0.6, MatchStatus::NeedsReview),
        ]);
        assert_eq!(report.total, 3);
        assert_eq!(report.valid.len(), 1);
        assert_eq!(report.needs_review.len(), 1);
        assert_eq!(report.unmapped.len(), 1);
        assert!(!report.can_proceed);
    }

    #[test]
    fn proceeds_when_nothing_unmapped() {
        let report =
            BatchReport::from_results(vec![result("Bench Press", 0.95, MatchStatus::Valid)]);
        assert!(report.can_proceed);
    }
}
