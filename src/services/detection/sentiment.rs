// Sentiment Classifier
// Lexicon polarity with sentence-scoped negation

use std::collections::HashSet;

use crate::models::Sentiment;
use crate::services::config_store::EngineConfig;
use crate::services::text_processor::{normalize_word, SentenceSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    /// Signed hit count after negation.
    pub score: i32,
    pub positive_hits: usize,
    pub negative_hits: usize,
}

/// Immutable polarity tables, built once from config and shared by all requests.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    negators: HashSet<String>,
    negation_window: usize,
}

impl SentimentLexicon {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            positive: normalized_set(&config.positive_lexicon),
            negative: normalized_set(&config.negative_lexicon),
            negators: normalized_set(&config.negators),
            negation_window: config.negation_window,
        }
    }

    /// +1, -1 or 0 for one normalized word. Falls back to the singular form.
    fn polarity(&self, word: &str) -> i32 {
        let lookup = |w: &str| {
            if self.positive.contains(w) {
                Some(1)
            } else if self.negative.contains(w) {
                Some(-1)
            } else {
                None
            }
        };
        lookup(word)
            .or_else(|| {
                word.strip_suffix('s')
                    .filter(|stem| !stem.is_empty())
                    .and_then(lookup)
            })
            .unwrap_or(0)
    }

    pub fn classify(&self, seq: &SentenceSequence) -> SentimentReport {
        let mut score = 0i32;
        let mut positive_hits = 0usize;
        let mut negative_hits = 0usize;

        for sentence in seq.sentences() {
            let words = &sentence.words;
            for (idx, word) in words.iter().enumerate() {
                let mut polarity = self.polarity(&word.normalized);
                if polarity == 0 {
                    continue;
                }
                let window_start = idx.saturating_sub(self.negation_window);
                if words[window_start..idx]
                    .iter()
                    .any(|w| self.negators.contains(&w.normalized))
                {
                    polarity = -polarity;
                }
                if polarity > 0 {
                    positive_hits += 1;
                } else {
                    negative_hits += 1;
                }
                score += polarity;
            }
        }

        SentimentReport {
            sentiment: Sentiment::from_score(score),
            score,
            positive_hits,
            negative_hits,
        }
    }
}

fn normalized_set(words: &[String]) -> HashSet<String> {
    words
        .iter()
        .map(|w| normalize_word(w.trim()))
        .filter(|w| !w.is_empty())
        .collect()
}
