//! Aggregate views over the crowd-sourced popularity table.

use serde::{Deserialize, Serialize};

use crate::key::NormalizedKey;

/// One (exercise, garmin name) pair with its recorded choice count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularEntry {
    pub exercise: NormalizedKey,
    pub garmin_name: String,
    pub count: u64,
}

/// Summary counters over the whole popularity table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PopularityStats {
    /// Sum of all recorded choices.
    pub total_choices: u64,
    /// Number of distinct normalized exercise keys.
    pub unique_exercises: usize,
    /// Number of distinct (exercise, garmin name) pairs.
    pub unique_mappings: usize,
    /// Globally most chosen mappings, count descending.
    pub most_popular: Vec<PopularEntry>,
}
