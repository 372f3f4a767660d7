//! The priority chain that turns a raw exercise name into a mapping.
//!
//! Rules are tried in strict order; the first rule that yields a
//! candidate clearing its own acceptance bar wins:
//!
//! 1. user mapping (always wins, confidence 1.0)
//! 2. crowd popularity (similarity-validated, count-boosted)
//! 3. manual override table
//! 4. fuzzy catalog match at the valid bar
//! 5. canonical dictionary classification
//! 6. best fuzzy result at the review floor
//!
//! When everything misses, the resolver synthesizes a title-cased
//! name, tags it `unmapped`, and attaches a warning.

use exmap_lexicon::Lexicon;
use exmap_model::{MatchCandidate, MatchResult, MatchSource, MatchThresholds, NormalizedKey};
use exmap_store::{PopularityStore, UserMappingStore};
use tracing::{debug, warn};

use crate::score::{Scorer, rank_order};

/// Tunables for the resolution chain.
#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    pub thresholds: MatchThresholds,
    /// Minimum base similarity between the input and a popular
    /// mapping's name; guards against entries captured under a
    /// near-collision key.
    pub popularity_similarity_floor: f64,
    /// Maximum confidence a popularity boost can add on top of the
    /// base similarity.
    pub popularity_boost_cap: f64,
    /// Choice count at which the boost reaches half its cap.
    pub popularity_half_count: u64,
    /// Confidence assigned to an exact canonical-dictionary hit;
    /// below 1.0 because the catalog name is reached indirectly.
    pub canonical_confidence: f64,
    /// Discount applied to fuzzy scores against canonical names,
    /// relative to direct catalog scores.
    pub canonical_discount: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            thresholds: MatchThresholds::default(),
            popularity_similarity_floor: 0.40,
            popularity_boost_cap: 0.15,
            popularity_half_count: 3,
            canonical_confidence: 0.92,
            canonical_discount: 0.9,
        }
    }
}

/// Everything a rule may consult while resolving one name.
pub struct ResolveContext<'a> {
    pub raw: &'a str,
    pub key: &'a NormalizedKey,
    /// Normalized upstream hint, scored alongside the key.
    pub hint: Option<&'a NormalizedKey>,
    pub lexicon: &'a Lexicon,
    pub user: &'a UserMappingStore,
    pub popularity: &'a PopularityStore,
    pub config: &'a ResolverConfig,
    pub scorer: Scorer,
}

impl ResolveContext<'_> {
    /// Query keys to score candidates against: the normalized input
    /// plus the hint, when one was supplied.
    fn queries(&self) -> impl Iterator<Item = &NormalizedKey> {
        std::iter::once(self.key).chain(self.hint)
    }
}

/// One step of the priority chain. A rule returns `None` both when it
/// has no candidate and when its candidate misses the rule's own
/// acceptance bar.
pub trait ResolveRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<MatchCandidate>;
}

/// Rule 1: a saved user mapping is always the final answer.
pub struct UserMappingRule;

impl ResolveRule for UserMappingRule {
    fn name(&self) -> &'static str {
        "user"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<MatchCandidate> {
        ctx.user.get(ctx.key).map(|name| MatchCandidate {
            name,
            score: 1.0,
            is_exact: true,
            source: MatchSource::User,
        })
    }
}

/// Rule 2: the crowd's top choice, validated by similarity and boosted
/// by how often it was chosen.
pub struct PopularityRule;

impl ResolveRule for PopularityRule {
    fn name(&self) -> &'static str {
        "popular"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<MatchCandidate> {
        let top = ctx.popularity.top_choice(ctx.key)?;
        let candidate_key = ctx.lexicon.normalizer.normalize(&top.garmin_name);
        // Shared exact tokens also count toward similarity: the crowd
        // mapping "squat" -> "Air Squat" is legitimate even though the
        // strings themselves diverge.
        let base = ctx
            .scorer
            .score(ctx.key, &candidate_key)
            .max(token_overlap(ctx.key, &candidate_key));
        if base < ctx.config.popularity_similarity_floor {
            debug!(
                key = %ctx.key,
                choice = %top.garmin_name,
                base,
                "popular mapping rejected as near-collision"
            );
            return None;
        }
        let count = top.count as f64;
        let boost =
            ctx.config.popularity_boost_cap * count / (count + ctx.config.popularity_half_count as f64);
        Some(MatchCandidate {
            name: top.garmin_name,
            score: (base + boost).min(1.0),
            is_exact: candidate_key == *ctx.key,
            source: MatchSource::Popular,
        })
    }
}

/// Rule 3: the hardcoded override table, exact key first, then the
/// longest override key contained in the query.
pub struct ManualOverrideRule;

impl ResolveRule for ManualOverrideRule {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<MatchCandidate> {
        let overrides = &ctx.lexicon.overrides;
        let target = overrides
            .get(ctx.key)
            .or_else(|| overrides.longest_contained(ctx.key))?;
        Some(MatchCandidate {
            name: target.to_string(),
            score: 1.0,
            is_exact: overrides.get(ctx.key).is_some(),
            source: MatchSource::Manual,
        })
    }
}

/// Fraction of tokens shared between two keys, relative to the
/// smaller one. A short catalog name wholly contained in a long key
/// ("bulgarian lunge thing" vs "lunge") scores 1.0; keys with nothing
/// in common score 0.0 regardless of length.
fn token_overlap(a: &NormalizedKey, b: &NormalizedKey) -> f64 {
    let a_tokens: std::collections::BTreeSet<&str> = a.as_str().split_whitespace().collect();
    let b_tokens: std::collections::BTreeSet<&str> = b.as_str().split_whitespace().collect();
    let smaller = a_tokens.len().min(b_tokens.len());
    if smaller == 0 {
        return 0.0;
    }
    a_tokens.intersection(&b_tokens).count() as f64 / smaller as f64
}

/// Best catalog entry across all query keys, ranked with the
/// deterministic tie-break order. An exact key hit skips the scan.
pub(crate) fn best_catalog_candidate(ctx: &ResolveContext<'_>) -> Option<MatchCandidate> {
    for query in ctx.queries() {
        if let Some(entry) = ctx.lexicon.catalog.get(query) {
            return Some(MatchCandidate {
                name: entry.name.clone(),
                score: 1.0,
                is_exact: true,
                source: MatchSource::Fuzzy,
            });
        }
    }

    let mut best: Option<(f64, u64, &str)> = None;
    for (entry_key, entry) in ctx.lexicon.catalog.keyed_entries() {
        let score = ctx
            .queries()
            .map(|query| ctx.scorer.score(query, entry_key))
            .fold(0.0_f64, f64::max);
        let count = ctx.popularity.count(ctx.key, &entry.name);
        let ranked = (score, count, entry.name.as_str());
        if best.is_none_or(|current| rank_order(ranked, current).is_lt()) {
            best = Some(ranked);
        }
    }
    best.map(|(score, _, name)| MatchCandidate {
        name: name.to_string(),
        score,
        is_exact: false,
        source: MatchSource::Fuzzy,
    })
}

/// Best canonical exercise by fuzzy score, resolved to its catalog
/// display name and discounted relative to a direct catalog hit.
pub(crate) fn best_canonical_candidate(ctx: &ResolveContext<'_>) -> Option<MatchCandidate> {
    let mut best: Option<(f64, u64, &str)> = None;
    for entry in ctx.lexicon.canonical.all_entries() {
        let name_key = ctx.lexicon.normalizer.normalize(&entry.name);
        let score = ctx
            .queries()
            .map(|query| ctx.scorer.score(query, &name_key))
            .fold(0.0_f64, f64::max)
            * ctx.config.canonical_discount;
        let ranked = (score, 0, entry.name.as_str());
        if best.is_none_or(|current| rank_order(ranked, current).is_lt()) {
            best = Some(ranked);
        }
    }
    best.map(|(score, _, name)| MatchCandidate {
        name: catalog_display_name(ctx, name),
        score,
        is_exact: false,
        source: MatchSource::Canonical,
    })
}

/// Map a canonical name onto its catalog entry's display name when one
/// exists; otherwise the canonical name stands on its own.
fn catalog_display_name(ctx: &ResolveContext<'_>, canonical_name: &str) -> String {
    let key = ctx.lexicon.normalizer.normalize(canonical_name);
    ctx.lexicon
        .catalog
        .get(&key)
        .map_or_else(|| canonical_name.to_string(), |entry| entry.name.clone())
}

/// Rule 4: fuzzy catalog match, accepted only at the valid bar.
pub struct CatalogRule;

impl ResolveRule for CatalogRule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<MatchCandidate> {
        best_catalog_candidate(ctx).filter(|candidate| candidate.score >= ctx.config.thresholds.valid)
    }
}

/// Rule 5: exact hit in the canonical dictionary (name or synonym),
/// mapped through to the catalog display name.
pub struct CanonicalRule;

impl ResolveRule for CanonicalRule {
    fn name(&self) -> &'static str {
        "canonical"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<MatchCandidate> {
        let entry = ctx
            .queries()
            .find_map(|query| ctx.lexicon.canonical.lookup_canonical(query))?;
        Some(MatchCandidate {
            name: catalog_display_name(ctx, &entry.name),
            score: ctx.config.canonical_confidence,
            is_exact: false,
            source: MatchSource::Canonical,
        })
    }
}

/// Rule 6: whatever scored highest across the catalog and the
/// (discounted) canonical dictionary, accepted down to the review
/// floor. Catches the needs-review band the earlier bars rejected.
pub struct ReviewBandRule;

impl ResolveRule for ReviewBandRule {
    fn name(&self) -> &'static str {
        "review"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<MatchCandidate> {
        let catalog = best_catalog_candidate(ctx);
        let canonical = best_canonical_candidate(ctx);
        // max_by keeps the last maximum, so the catalog wins score ties.
        [canonical, catalog]
            .into_iter()
            .flatten()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .filter(|candidate| candidate.score >= ctx.config.thresholds.needs_review)
    }
}

/// The ordered chain plus the total fallback.
pub struct Resolver {
    config: ResolverConfig,
    rules: Vec<Box<dyn ResolveRule>>,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            rules: vec![
                Box::new(UserMappingRule),
                Box::new(PopularityRule),
                Box::new(ManualOverrideRule),
                Box::new(CatalogRule),
                Box::new(CanonicalRule),
                Box::new(ReviewBandRule),
            ],
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one raw name. Total: always returns a result, falling
    /// back to a title-cased synthesized name tagged `unmapped`.
    pub fn resolve(
        &self,
        lexicon: &Lexicon,
        user: &UserMappingStore,
        popularity: &PopularityStore,
        raw: &str,
        hint: Option<&str>,
    ) -> MatchResult {
        let key = lexicon.normalizer.normalize(raw);
        let hint_key = hint.map(|hint| lexicon.normalizer.normalize(hint));
        let ctx = ResolveContext {
            raw,
            key: &key,
            hint: hint_key.as_ref(),
            lexicon,
            user,
            popularity,
            config: &self.config,
            scorer: Scorer,
        };

        for rule in &self.rules {
            if let Some(candidate) = rule.try_resolve(&ctx) {
                debug!(
                    input = raw,
                    rule = rule.name(),
                    name = %candidate.name,
                    score = candidate.score,
                    "resolved"
                );
                return MatchResult {
                    input: raw.to_string(),
                    key,
                    final_name: candidate.name,
                    score: candidate.score,
                    status: self.config.thresholds.classify(candidate.score),
                    source: candidate.source,
                    warning: None,
                };
            }
        }

        let fallback = title_case(raw);
        warn!(input = raw, fallback = %fallback, "no mapping found, synthesizing name");
        MatchResult {
            input: raw.to_string(),
            key,
            final_name: fallback.clone(),
            score: 0.0,
            status: self.config.thresholds.classify(0.0),
            source: MatchSource::Fallback,
            warning: Some(format!(
                "no mapping found for '{raw}'; using generic name '{fallback}'"
            )),
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

/// Title-case a raw name for the fallback path, treating slashes as
/// word breaks.
pub(crate) fn title_case(raw: &str) -> String {
    raw.replace('/', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_handles_slashes_and_mixed_case() {
        assert_eq!(title_case("incline/decline BENCH"), "Incline Decline Bench");
        assert_eq!(title_case("  kb swing  "), "Kb Swing");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn default_config_matches_documented_thresholds() {
        let config = ResolverConfig::default();
        assert_eq!(config.thresholds.valid, 0.88);
        assert_eq!(config.thresholds.needs_review, 0.40);
        assert_eq!(config.popularity_similarity_floor, 0.40);
    }
}
