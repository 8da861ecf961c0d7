// Stylometry
// Function-word usage, repetition and a unigram perplexity proxy

use std::collections::{BTreeMap, HashSet};

use crate::services::text_processor::SentenceSequence;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LexicalProfile {
    pub function_word_ratio: f64,
    /// Share of vocabulary items occurring at least three times.
    pub repeat_ratio: f64,
    pub ngram_repeat_rate: f64,
    pub perplexity: f64,
    pub avg_word_length: f64,
}

pub fn compute(seq: &SentenceSequence, function_words: &HashSet<String>) -> LexicalProfile {
    let tokens: Vec<&str> = seq.words().map(|w| w.normalized.as_str()).collect();
    if tokens.is_empty() {
        return LexicalProfile::default();
    }
    let total = tokens.len() as f64;

    let mut freq: BTreeMap<&str, usize> = BTreeMap::new();
    for t in &tokens {
        *freq.entry(*t).or_insert(0) += 1;
    }

    let function_hits = tokens.iter().filter(|t| function_words.contains(**t)).count();
    let repeated_vocab = freq.values().filter(|&&c| c >= 3).count();
    let char_count: usize = seq.sentences().iter().map(|s| s.text.chars().count()).sum();
    let token_chars: usize = seq.words().map(|w| w.surface.chars().count()).sum();

    LexicalProfile {
        function_word_ratio: function_hits as f64 / total,
        repeat_ratio: repeated_vocab as f64 / freq.len() as f64,
        ngram_repeat_rate: ngram_repeat_rate(&tokens, 3),
        perplexity: estimate_perplexity(&freq, tokens.len(), char_count),
        avg_word_length: token_chars as f64 / total,
    }
}

/// Entropy-based perplexity proxy blended with a diversity/length baseline,
/// clamped to [20, 300]. Lower means more predictable text.
pub fn estimate_perplexity(freq: &BTreeMap<&str, usize>, total_tokens: usize, char_count: usize) -> f64 {
    if total_tokens == 0 {
        return 120.0;
    }
    let total = total_tokens as f64;
    let entropy = -freq
        .values()
        .map(|&c| {
            let p = c as f64 / total;
            p * (p + 1e-12).ln()
        })
        .sum::<f64>();

    let ppl_uni = entropy.exp();
    let ppl_scaled = 20.0 + ((ppl_uni - 1.0) * 22.5).min(280.0);
    let diversity = freq.len() as f64 / total;
    let baseline = 120.0 - diversity * 60.0 + char_count as f64 / 500.0;
    let val = 0.5 * ppl_scaled + 0.5 * baseline;
    (val.clamp(20.0, 300.0) * 100.0).round() / 100.0
}

/// Share of n-gram occurrences that repeat an earlier n-gram.
pub fn ngram_repeat_rate(tokens: &[&str], n: usize) -> f64 {
    if n == 0 || tokens.len() < n + 1 {
        return 0.0;
    }
    let mut counts: BTreeMap<&[&str], usize> = BTreeMap::new();
    let mut total = 0usize;
    for window in tokens.windows(n) {
        *counts.entry(window).or_insert(0) += 1;
        total += 1;
    }
    let repeats = counts.values().filter(|&&c| c >= 2).map(|&c| c - 1).sum::<usize>();
    repeats as f64 / total.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lexicon::{to_owned_list, FUNCTION_WORDS};
    use crate::services::text_processor::segment;

    fn function_words() -> HashSet<String> {
        to_owned_list(FUNCTION_WORDS).into_iter().collect()
    }

    #[test]
    fn test_ngram_repeat_rate() {
        let tokens = ["a", "b", "c", "a", "b", "c"];
        // windows: abc bca cab abc -> one repeat out of four
        assert!((ngram_repeat_rate(&tokens, 3) - 0.25).abs() < 1e-9);
        assert_eq!(ngram_repeat_rate(&["a", "b", "c"], 3), 0.0);
    }

    #[test]
    fn test_repetitive_text_scores_higher_repetition() {
        let fw = function_words();
        let varied = compute(
            &segment("Morning fog drifted over quiet harbors while gulls argued about bread.").unwrap(),
            &fw,
        );
        let looped = compute(
            &segment("The system is good. The system is good. The system is good.").unwrap(),
            &fw,
        );
        assert!(looped.repeat_ratio > varied.repeat_ratio);
        assert!(looped.ngram_repeat_rate > varied.ngram_repeat_rate);
        assert!(looped.perplexity < varied.perplexity);
    }

    #[test]
    fn test_function_word_ratio() {
        let profile = compute(&segment("The cat and the dog.").unwrap(), &function_words());
        assert!((profile.function_word_ratio - 0.6).abs() < 1e-9);
        assert!((profile.avg_word_length - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_perplexity_bounds() {
        let fw = function_words();
        for text in ["Hello", "word word word word word word", "A varied sentence with many different tokens inside."] {
            let p = compute(&segment(text).unwrap(), &fw).perplexity;
            assert!((20.0..=300.0).contains(&p), "{} -> {}", text, p);
        }
    }
}
