//! Whole-workout validation: resolve every exercise and report
//! whether export can proceed.

use exmap_lexicon::Lexicon;
use exmap_model::BatchReport;
use exmap_store::{PopularityStore, UserMappingStore};
use tracing::{info, info_span};

use crate::resolver::Resolver;

/// An exercise to validate, optionally with an upstream name hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub name: String,
    pub hint: Option<String>,
}

impl BatchItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: None,
        }
    }

    pub fn with_hint(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: Some(hint.into()),
        }
    }
}

/// Resolve every item and partition the results by review status.
pub fn validate_batch(
    resolver: &Resolver,
    lexicon: &Lexicon,
    user: &UserMappingStore,
    popularity: &PopularityStore,
    items: &[BatchItem],
) -> BatchReport {
    let span = info_span!("batch", total = items.len());
    let _guard = span.enter();
    let results = items
        .iter()
        .map(|item| resolver.resolve(lexicon, user, popularity, &item.name, item.hint.as_deref()))
        .collect();
    let report = BatchReport::from_results(results);
    info!(
        total = report.total,
        valid = report.valid.len(),
        needs_review = report.needs_review.len(),
        unmapped = report.unmapped.len(),
        can_proceed = report.can_proceed,
        "workout validated"
    );
    report
}
