// Vocabulary Diversity
// Distinct normalized words over total words

use std::collections::BTreeSet;

use crate::services::text_processor::SentenceSequence;

pub fn type_token_ratio<'a>(tokens: impl IntoIterator<Item = &'a str>) -> f64 {
    let mut distinct: BTreeSet<&str> = BTreeSet::new();
    let mut total = 0usize;
    for token in tokens {
        distinct.insert(token);
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    distinct.len() as f64 / total as f64
}

pub fn diversity(seq: &SentenceSequence) -> f64 {
    type_token_ratio(seq.words().map(|w| w.normalized.as_str()))
}
