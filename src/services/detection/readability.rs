// Readability Scorer
// Flesch reading ease over the segmented document

use crate::services::text_processor::SentenceSequence;

/// Flesch reading ease from raw counts, clamped to [0, 100].
pub fn flesch_reading_ease(words: usize, sentences: usize, syllables: u64) -> f64 {
    let words_f = words.max(1) as f64;
    let sentences_f = sentences.max(1) as f64;
    let raw = 206.835 - 1.015 * (words_f / sentences_f) - 84.6 * (syllables as f64 / words_f);
    raw.clamp(0.0, 100.0)
}

pub fn score(seq: &SentenceSequence) -> f64 {
    flesch_reading_ease(seq.word_count(), seq.sentence_count(), seq.syllable_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::text_processor::segment;

    #[test]
    fn test_single_word_is_finite() {
        let seq = segment("Hello").unwrap();
        let value = score(&seq);
        assert!(value.is_finite());
        // 206.835 - 1.015 - 84.6 * 2
        assert!((value - 36.62).abs() < 0.01, "{}", value);
    }

    #[test]
    fn test_simple_text_reads_easier_than_dense_text() {
        let simple = segment("The cat sat on the mat. The dog ran to the park.").unwrap();
        let dense = segment(
            "Institutional considerations necessitate comprehensive evaluation of organizational \
             infrastructure and administrative responsibilities across international jurisdictions.",
        )
        .unwrap();
        assert!(score(&simple) > score(&dense));
    }

    #[test]
    fn test_bounds_are_clamped() {
        assert_eq!(flesch_reading_ease(1, 1, 1), 100.0);
        assert_eq!(flesch_reading_ease(200, 1, 1000), 0.0);
        assert_eq!(flesch_reading_ease(0, 0, 0), 100.0);
    }
}
