pub mod batch;
pub mod error;
pub mod exercise;
pub mod key;
pub mod matching;
pub mod popularity;
pub mod suggestion;

pub use batch::BatchReport;
pub use error::{ModelError, Result};
pub use exercise::{CanonicalExercise, GarminCatalogEntry};
pub use key::NormalizedKey;
pub use matching::{MatchCandidate, MatchResult, MatchSource, MatchStatus, MatchThresholds};
pub use popularity::{PopularEntry, PopularityStats};
pub use suggestion::{SuggestedExercise, SuggestionResult};
