//! Fuzzy similarity scoring between normalized exercise keys.
//!
//! Uses Jaro-Winkler similarity as the base algorithm, taken over
//! both the raw key and a token-sorted rendering so word order does
//! not matter: "bench press dumbbell" and "dumbbell bench press"
//! score 1.0. The whole-string score is then weighted by a token
//! affinity term, because Jaro-Winkler over short multi-word strings
//! gives unrelated names a flattering floor.

use exmap_model::NormalizedKey;
use rapidfuzz::distance::jaro_winkler;

#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer;

impl Scorer {
    /// Similarity in [0, 1]. Equal keys and keys with equal token
    /// sets score exactly 1.0.
    pub fn score(&self, query: &NormalizedKey, candidate: &NormalizedKey) -> f64 {
        let query = query.as_str();
        let candidate = candidate.as_str();
        if query == candidate {
            return 1.0;
        }
        let sorted_query = token_sorted(query);
        let sorted_candidate = token_sorted(candidate);
        if sorted_query == sorted_candidate {
            // Same tokens in a different order.
            return 1.0;
        }
        let direct = jaro_winkler::similarity(query.chars(), candidate.chars());
        let order_free = jaro_winkler::similarity(sorted_query.chars(), sorted_candidate.chars());
        let affinity = token_affinity(query, candidate);
        // Squared so coincidental whole-string alignments between
        // unrelated names fall well below the review floor, while
        // near-typos (affinity close to 1) are barely touched.
        direct.max(order_free) * affinity * affinity
    }
}

fn token_sorted(key: &str) -> String {
    let mut tokens: Vec<&str> = key.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// How well the tokens of each side pair up with the other's, in
/// [0, 1]. Near 1.0 when every word has a close counterpart; low when
/// the words have nothing to do with each other, even if whole-string
/// Jaro-Winkler finds coincidental character alignments.
fn token_affinity(a: &str, b: &str) -> f64 {
    let a_tokens: Vec<&str> = a.split_whitespace().collect();
    let b_tokens: Vec<&str> = b.split_whitespace().collect();
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }
    (directed_affinity(&a_tokens, &b_tokens) + directed_affinity(&b_tokens, &a_tokens)) / 2.0
}

/// Mean over `from` tokens of the best per-token similarity in `to`.
fn directed_affinity(from: &[&str], to: &[&str]) -> f64 {
    let total: f64 = from
        .iter()
        .map(|token| {
            to.iter()
                .map(|other| jaro_winkler::similarity(token.chars(), other.chars()))
                .fold(0.0_f64, f64::max)
        })
        .sum();
    total / from.len() as f64
}

/// Deterministic ranking order for scored candidates: score
/// descending, then popularity count descending, then shorter name,
/// then lexical. Suggestion lists must be stable across calls.
pub fn rank_order(a: (f64, u64, &str), b: (f64, u64, &str)) -> std::cmp::Ordering {
    b.0.total_cmp(&a.0)
        .then_with(|| b.1.cmp(&a.1))
        .then_with(|| a.2.len().cmp(&b.2.len()))
        .then_with(|| a.2.cmp(b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> NormalizedKey {
        NormalizedKey::new(s)
    }

    fn score(a: &str, b: &str) -> f64 {
        Scorer.score(&key(a), &key(b))
    }

    #[test]
    fn equal_keys_score_one() {
        assert_eq!(score("goblet squat", "goblet squat"), 1.0);
    }

    #[test]
    fn token_order_does_not_matter() {
        assert_eq!(score("bench press dumbbell", "dumbbell bench press"), 1.0);
    }

    #[test]
    fn near_typos_score_high() {
        let near = score("dumbell bench press", "dumbbell bench press");
        assert!(near > 0.9, "near-typo scored {near}");
        let single = score("crunchs", "crunch");
        assert!(single > 0.88, "single-token typo scored {single}");
    }

    #[test]
    fn unrelated_names_stay_below_the_review_floor() {
        for candidate in [
            "barbell back squat",
            "reverse lunge",
            "wall ball",
            "tricep extension",
        ] {
            let s = score("unknown exercise xyz", candidate);
            assert!(s < 0.40, "{candidate:?} scored {s}");
        }
    }

    #[test]
    fn rank_order_is_deterministic() {
        let mut entries = vec![
            (0.9, 0, "Barbell Row"),
            (0.9, 2, "Cable Row"),
            (0.9, 0, "Row"),
            (0.95, 0, "Dumbbell Row"),
        ];
        entries.sort_by(|a, b| rank_order(*a, *b));
        let names: Vec<_> = entries.iter().map(|entry| entry.2).collect();
        assert_eq!(names, ["Dumbbell Row", "Cable Row", "Row", "Barbell Row"]);
    }
}
