// AI-Likelihood Scorer
// Two-model ensemble over the feature set: a weighted logistic stylometric
// model and a soft-threshold repetition model, blended into one probability.

use crate::models::{FeatureSet, FeatureWeights, ModelProbabilities};

const MIN_PROBABILITY: f64 = 0.02;
const MAX_PROBABILITY: f64 = 0.98;

// Normalization centers for the stylometric model. A feature at its center
// contributes nothing; each side saturates at +/-1.
const READABILITY_CENTER: f64 = 50.0;
const DIVERSITY_CENTER: f64 = 0.6;
const DIVERSITY_SPAN: f64 = 0.4;
const BURSTINESS_CENTER: f64 = 0.45;
const SENTENCE_LENGTH_CENTER: f64 = 12.0;
const FUNCTION_WORD_CENTER: f64 = 0.45;

#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodScore {
    pub probabilities: ModelProbabilities,
    pub ai_score: u8,
    pub human_score: u8,
    pub explanations: Vec<String>,
}

/// Sigmoid function: smooth transition around center
/// k controls steepness (smaller = steeper)
#[inline]
fn sigmoid(x: f64, center: f64, k: f64) -> f64 {
    1.0 / (1.0 + ((x - center) / k).exp())
}

/// Inverse sigmoid: 1 - sigmoid (for "greater than" thresholds)
#[inline]
fn sigmoid_inv(x: f64, center: f64, k: f64) -> f64 {
    1.0 - sigmoid(x, center, k)
}

#[inline]
fn from_logit(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}

fn normalized(value: f64, center: f64, span: f64) -> f64 {
    ((center - value) / span).clamp(-1.0, 1.0)
}

/// Weighted logistic over normalized stylometric features.
/// Positive inputs push toward "machine-like".
pub fn stylometric_probability(
    features: &FeatureSet,
    weights: &FeatureWeights,
    explanations: &mut Vec<String>,
) -> f64 {
    let signals = &features.signals;
    let inputs = [
        (
            "readability",
            features.readability,
            normalized(features.readability, READABILITY_CENTER, READABILITY_CENTER),
            weights.readability,
        ),
        (
            "diversity",
            features.vocab_diversity,
            normalized(features.vocab_diversity, DIVERSITY_CENTER, DIVERSITY_SPAN),
            weights.diversity,
        ),
        (
            "burstiness",
            signals.burstiness.unwrap_or(BURSTINESS_CENTER),
            signals
                .burstiness
                .map_or(0.0, |cv| normalized(cv, BURSTINESS_CENTER, BURSTINESS_CENTER)),
            weights.burstiness,
        ),
        (
            "avg_len",
            features.avg_sentence_length,
            -normalized(features.avg_sentence_length, SENTENCE_LENGTH_CENTER, SENTENCE_LENGTH_CENTER),
            weights.sentence_length,
        ),
        (
            "function_words",
            signals.function_word_ratio,
            normalized(signals.function_word_ratio, FUNCTION_WORD_CENTER, FUNCTION_WORD_CENTER),
            weights.function_words,
        ),
    ];

    let mut logit = weights.bias;
    for (name, raw, x, w) in inputs {
        let contrib = w * x;
        logit += contrib;
        if contrib.abs() > 0.15 {
            explanations.push(format!("{}={:.2} contrib={:+.2}", name, raw, contrib));
        }
    }
    from_logit(logit)
}

/// Soft-threshold model over type-token ratio, repeated vocabulary,
/// repeated 3-grams and the perplexity proxy.
pub fn repetition_probability(features: &FeatureSet, explanations: &mut Vec<String>) -> f64 {
    let signals = &features.signals;
    let mut logit = 0.0;

    // Low TTR raises, high TTR lowers
    let ttr = features.vocab_diversity;
    let ttr_contrib = sigmoid(ttr, 0.58, 0.08) * 1.2 + sigmoid_inv(ttr, 0.78, 0.06) * (-0.9);
    logit += ttr_contrib;
    if ttr_contrib.abs() > 0.3 {
        explanations.push(format!("ttr={:.3} contrib={:+.2}", ttr, ttr_contrib));
    }

    let rep = signals.repeat_ratio;
    let rep_contrib = sigmoid_inv(rep, 0.18, 0.06) * 1.0;
    logit += rep_contrib;
    if rep_contrib > 0.3 {
        explanations.push(format!("repeat={:.3} contrib={:+.2}", rep, rep_contrib));
    }

    let ngram = signals.ngram_repeat_rate;
    let ngram_contrib = sigmoid_inv(ngram, 0.10, 0.04) * 1.1;
    logit += ngram_contrib;
    if ngram_contrib > 0.3 {
        explanations.push(format!("ngram={:.3} contrib={:+.2}", ngram, ngram_contrib));
    }

    // Low perplexity raises, high perplexity lowers
    let ppl = signals.perplexity;
    let ppl_contrib = sigmoid(ppl, 85.0, 20.0) * 1.0 + sigmoid_inv(ppl, 200.0, 30.0) * (-0.6);
    logit += ppl_contrib;
    if ppl_contrib.abs() > 0.2 {
        explanations.push(format!("ppl={:.1} contrib={:+.2}", ppl, ppl_contrib));
    }

    from_logit(logit)
}

/// Integer (human, ai) percentages summing to 100.
pub fn to_scores(probability: f64) -> (u8, u8) {
    let ai = (probability.clamp(0.0, 1.0) * 100.0).round() as u8;
    (100 - ai, ai)
}

pub fn score(features: &FeatureSet, weights: &FeatureWeights) -> LikelihoodScore {
    let mut explanations = Vec::new();
    let stylometric = stylometric_probability(features, weights, &mut explanations);
    let repetition = repetition_probability(features, &mut explanations);

    let blend = weights.repetition_blend.clamp(0.0, 1.0);
    let combined = ((1.0 - blend) * stylometric + blend * repetition)
        .clamp(MIN_PROBABILITY, MAX_PROBABILITY);
    let (human_score, ai_score) = to_scores(combined);

    LikelihoodScore {
        probabilities: ModelProbabilities {
            stylometric,
            repetition,
            combined,
        },
        ai_score,
        human_score,
        explanations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sentiment, StylometrySignals};

    fn features(readability: f64, diversity: f64, burstiness: Option<f64>) -> FeatureSet {
        FeatureSet {
            readability,
            vocab_diversity: diversity,
            avg_sentence_length: 12.0,
            sentiment: Sentiment::Neutral,
            sentiment_score: 0,
            signals: StylometrySignals {
                word_count: 24,
                sentence_count: 2,
                burstiness,
                function_word_ratio: 0.45,
                perplexity: 140.0,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_scores_sum_to_100() {
        for p in [0.0, 0.02, 0.314, 0.5, 0.675, 0.98, 1.0] {
            let (human, ai) = to_scores(p);
            assert_eq!(human as u32 + ai as u32, 100);
        }
    }

    #[test]
    fn test_probability_is_clamped() {
        let mut weights = FeatureWeights::default();
        weights.repetition_blend = 0.0;
        weights.bias = 50.0;
        let s = score(&features(10.0, 0.3, Some(0.0)), &weights);
        assert_eq!(s.probabilities.combined, MAX_PROBABILITY);
        assert_eq!(s.ai_score, 98);

        weights.bias = -50.0;
        let s = score(&features(90.0, 1.0, Some(1.0)), &weights);
        assert_eq!(s.probabilities.combined, MIN_PROBABILITY);
        assert_eq!(s.human_score, 98);
    }

    #[test]
    fn test_uniform_dense_text_scores_higher() {
        let weights = FeatureWeights::default();
        let machine_like = score(&features(30.0, 0.7, Some(0.05)), &weights);
        let human_like = score(&features(80.0, 0.95, Some(0.6)), &weights);
        assert!(machine_like.ai_score > human_like.ai_score);
        assert!(machine_like.explanations.iter().any(|e| e.starts_with("burstiness=")));
    }

    #[test]
    fn test_repetition_model_reacts_to_loops() {
        let mut looped = features(60.0, 0.35, Some(0.1));
        looped.signals.repeat_ratio = 0.6;
        looped.signals.ngram_repeat_rate = 0.4;
        looped.signals.perplexity = 60.0;
        let mut explanations = Vec::new();
        let p_loop = repetition_probability(&looped, &mut explanations);
        let p_fresh = repetition_probability(&features(60.0, 0.95, Some(0.1)), &mut Vec::new());
        assert!(p_loop > p_fresh);
        assert!(explanations.iter().any(|e| e.starts_with("ngram=")));
    }

    #[test]
    fn test_zero_blend_uses_stylometric_model_only() {
        let mut weights = FeatureWeights::default();
        weights.repetition_blend = 0.0;
        let s = score(&features(55.0, 0.8, Some(0.3)), &weights);
        assert!((s.probabilities.combined - s.probabilities.stylometric).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_deterministic() {
        let weights = FeatureWeights::default();
        let f = features(47.3, 0.81, Some(0.22));
        assert_eq!(score(&f, &weights), score(&f, &weights));
    }
}
