//! Free-text exercise name normalization.
//!
//! The pipeline lowercases, strips workout-plan notation (superset
//! labels, rep counters, distances), expands shorthand, drops
//! stopwords, and singularizes tokens. The result is stable under
//! re-normalization, which lets normalized keys be used directly as
//! store keys.

use exmap_model::NormalizedKey;

use crate::rules::NormalizerRules;

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    rules: NormalizerRules,
}

impl Normalizer {
    pub fn new(rules: NormalizerRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &NormalizerRules {
        &self.rules
    }

    /// Normalize a raw exercise name into its canonical lookup key.
    ///
    /// Falls back to the case-folded trimmed input when every token is
    /// stripped, so the key is never empty for non-blank input.
    pub fn normalize(&self, raw: &str) -> NormalizedKey {
        let lowered = raw.to_lowercase();
        let mut tokens = tokenize(&lowered);

        strip_plan_notation(&mut tokens);
        // Singularize before expanding so plural shorthand ("pushups")
        // still hits its expansion key; expansions themselves are
        // validated to be stable under the remaining steps.
        let tokens: Vec<String> = tokens
            .iter()
            .map(|token| self.rules.singularize(token))
            .collect();
        let mut tokens = self.expand_abbreviations(tokens);
        tokens.retain(|token| !self.rules.is_stopword(token));
        // Label stripping runs last: earlier steps can remove tokens
        // ahead of a label, and a label that only becomes leading in
        // the output would change the key on re-normalization.
        strip_superset_labels(&mut tokens);

        if tokens.is_empty() {
            // All tokens were notation or stopwords; keep the folded
            // raw text so the caller still has a usable key.
            return NormalizedKey::new(lowered.trim());
        }
        NormalizedKey::new(tokens.join(" "))
    }

    fn expand_abbreviations(&self, tokens: Vec<String>) -> Vec<String> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut index = 0;
        while index < tokens.len() {
            let mut matched = false;
            for (key, expansion) in self.rules.abbreviations() {
                if tokens.len() - index >= key.len()
                    && tokens[index..index + key.len()]
                        .iter()
                        .zip(key)
                        .all(|(token, part)| token == part)
                {
                    out.extend(expansion.iter().cloned());
                    index += key.len();
                    matched = true;
                    break;
                }
            }
            if !matched {
                out.push(tokens[index].clone());
                index += 1;
            }
        }
        out
    }
}

/// Split on whitespace and separator punctuation, keeping only
/// alphanumeric token content.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop leading superset labels like "a1" or "b2", which annotate plan
/// ordering rather than the exercise itself.
fn strip_superset_labels(tokens: &mut Vec<String>) {
    while let Some(first) = tokens.first() {
        let mut chars = first.chars();
        let is_label = matches!(chars.next(), Some(ch) if ch.is_ascii_alphabetic())
            && first.len() >= 2
            && chars.all(|ch| ch.is_ascii_digit());
        if is_label {
            tokens.remove(0);
        } else {
            break;
        }
    }
}

/// Drop rep counters ("x10", "10x"), metric distances ("200m"), and
/// bare numbers.
fn strip_plan_notation(tokens: &mut Vec<String>) {
    tokens.retain(|token| {
        let is_counter = (token.starts_with('x')
            && token.len() > 1
            && token[1..].chars().all(|ch| ch.is_ascii_digit()))
            || (token.ends_with('x')
                && token.len() > 1
                && token[..token.len() - 1].chars().all(|ch| ch.is_ascii_digit()));
        let is_distance = token.ends_with('m')
            && token.len() > 1
            && token[..token.len() - 1].chars().all(|ch| ch.is_ascii_digit());
        let is_number = token.chars().all(|ch| ch.is_ascii_digit());
        !(is_counter || is_distance || is_number)
    });
}
