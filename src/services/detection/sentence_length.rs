// Sentence Length Analyzer
// Mean words per sentence plus the spread used for burstiness

use crate::services::text_processor::SentenceSequence;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceLengthStats {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// std_dev / mean; None with fewer than two sentences.
    pub burstiness: Option<f64>,
    pub min: usize,
    pub max: usize,
}

pub fn avg_length(seq: &SentenceSequence) -> f64 {
    seq.word_count() as f64 / seq.sentence_count().max(1) as f64
}

pub fn stats(seq: &SentenceSequence) -> SentenceLengthStats {
    let lengths = seq.sentence_lengths();
    let n = lengths.len().max(1) as f64;
    let mean = avg_length(seq);
    let variance = lengths
        .iter()
        .map(|&len| {
            let d = len as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();
    let burstiness = if lengths.len() >= 2 && mean > 0.0 {
        Some(std_dev / mean)
    } else {
        None
    };

    SentenceLengthStats {
        mean,
        std_dev,
        burstiness,
        min: lengths.iter().copied().min().unwrap_or(0),
        max: lengths.iter().copied().max().unwrap_or(0),
    }
}
