// Aggregation Logic
// Validates input, fans feature extraction out over one segmented document
// and assembles the classification result

use std::collections::HashSet;
use std::sync::OnceLock;

use tracing::debug;

use super::diversity;
use super::likelihood::{self, LikelihoodScore};
use super::readability;
use super::sensitivity::{decide_label, DetectionSensitivity};
use super::sentence_length;
use super::sentiment::SentimentLexicon;
use super::stylometry;
use crate::models::{
    AnalysisReport, ClassificationResult, FeatureSet, LabelThresholds, SentenceSummary,
    StylometrySignals,
};
use crate::services::config_store::EngineConfig;
use crate::services::error::{AnalysisError, ConfigError};
use crate::services::lexicon::{to_owned_list, FUNCTION_WORDS};
use crate::services::text_processor::{segment, SentenceSequence};

/// Everything one analysis produced, before it is cut down to a wire payload.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub sequence: SentenceSequence,
    pub features: FeatureSet,
    pub likelihood: LikelihoodScore,
    pub thresholds: LabelThresholds,
    pub result: ClassificationResult,
}

/// Immutable analysis engine. Lexicons and weights are loaded once and the
/// engine is shared across requests without locking.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    lexicon: SentimentLexicon,
    function_words: HashSet<String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let lexicon = SentimentLexicon::from_config(&config);
        let function_words = to_owned_list(FUNCTION_WORDS).into_iter().collect();
        Self {
            config,
            lexicon,
            function_words,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn analyze(&self, text: &str) -> Result<ClassificationResult, AnalysisError> {
        self.analyze_with_sensitivity(text, DetectionSensitivity::Medium)
    }

    pub fn analyze_with_sensitivity(
        &self,
        text: &str,
        sensitivity: DetectionSensitivity,
    ) -> Result<ClassificationResult, AnalysisError> {
        self.run(text, sensitivity).map(|analysis| analysis.result)
    }

    pub fn analyze_report(
        &self,
        text: &str,
        sensitivity: DetectionSensitivity,
        request_id: &str,
    ) -> Result<AnalysisReport, AnalysisError> {
        let analysis = self.run(text, sensitivity)?;
        let sentences = analysis
            .sequence
            .sentences()
            .iter()
            .map(|s| SentenceSummary {
                start: s.start,
                end: s.end,
                words: s.word_count(),
                terminal: s.terminal,
            })
            .collect();

        Ok(AnalysisReport {
            request_id: request_id.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            result: analysis.result,
            features: analysis.features,
            probabilities: analysis.likelihood.probabilities,
            thresholds: analysis.thresholds,
            explanations: analysis.likelihood.explanations,
            sentences,
        })
    }

    /// Validate, segment, extract, score. No partial results.
    pub fn run(&self, text: &str, sensitivity: DetectionSensitivity) -> Result<Analysis, AnalysisError> {
        self.validate_input(text)?;

        let sequence = segment(text)?;
        let features = self.extract_features(&sequence);
        ensure_finite(&features)?;

        let weights = &self.config.feature_weights;
        let likelihood = likelihood::score(&features, weights);
        let thresholds = sensitivity.apply(self.config.label_thresholds);
        let label = decide_label(likelihood.ai_score, &thresholds);

        debug!(
            words = features.signals.word_count,
            sentences = features.signals.sentence_count,
            ai_score = likelihood.ai_score,
            sensitivity = ?sensitivity,
            "analysis.complete"
        );

        let result = ClassificationResult {
            human_score: likelihood.human_score,
            ai_score: likelihood.ai_score,
            label,
            readability: round_to(features.readability, 2),
            vocab_diversity: round_to(features.vocab_diversity, 2),
            avg_sentence_length: round_to(features.avg_sentence_length, 1),
            sentiment: features.sentiment,
        };

        Ok(Analysis {
            sequence,
            features,
            likelihood,
            thresholds,
            result,
        })
    }

    fn validate_input(&self, text: &str) -> Result<(), AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        let chars = text.chars().count();
        let limit = self.config.max_input_chars;
        if chars > limit {
            return Err(AnalysisError::TooLong { chars, limit });
        }
        Ok(())
    }

    /// Independent analyzers over one immutable sequence, joined before scoring.
    pub fn extract_features(&self, seq: &SentenceSequence) -> FeatureSet {
        let ((readability, vocab_diversity), (sentiment, (lengths, lexical))) = rayon::join(
            || rayon::join(|| readability::score(seq), || diversity::diversity(seq)),
            || {
                rayon::join(
                    || self.lexicon.classify(seq),
                    || {
                        rayon::join(
                            || sentence_length::stats(seq),
                            || stylometry::compute(seq, &self.function_words),
                        )
                    },
                )
            },
        );

        FeatureSet {
            readability,
            vocab_diversity,
            avg_sentence_length: lengths.mean,
            sentiment: sentiment.sentiment,
            sentiment_score: sentiment.score,
            signals: StylometrySignals {
                word_count: seq.word_count(),
                sentence_count: seq.sentence_count(),
                syllable_count: seq.syllable_count(),
                sentence_length_std_dev: lengths.std_dev,
                min_sentence_length: lengths.min,
                max_sentence_length: lengths.max,
                burstiness: lengths.burstiness,
                function_word_ratio: lexical.function_word_ratio,
                repeat_ratio: lexical.repeat_ratio,
                ngram_repeat_rate: lexical.ngram_repeat_rate,
                perplexity: lexical.perplexity,
                avg_word_length: lexical.avg_word_length,
                degraded_segmentation: seq.is_degraded(),
                positive_hits: sentiment.positive_hits,
                negative_hits: sentiment.negative_hits,
            },
        }
    }
}

fn ensure_finite(features: &FeatureSet) -> Result<(), AnalysisError> {
    let s = &features.signals;
    let values = [
        ("readability", features.readability),
        ("vocab_diversity", features.vocab_diversity),
        ("avg_sentence_length", features.avg_sentence_length),
        ("sentence_length_std_dev", s.sentence_length_std_dev),
        ("burstiness", s.burstiness.unwrap_or(0.0)),
        ("function_word_ratio", s.function_word_ratio),
        ("repeat_ratio", s.repeat_ratio),
        ("ngram_repeat_rate", s.ngram_repeat_rate),
        ("perplexity", s.perplexity),
        ("avg_word_length", s.avg_word_length),
    ];
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, v)) => Err(AnalysisError::Internal(format!("{} is not finite ({})", name, v))),
        None => Ok(()),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Process-wide engine built from the default configuration.
pub fn default_engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(Engine::default)
}

/// Analyze text with the default engine.
pub fn analyze(text: &str) -> Result<ClassificationResult, AnalysisError> {
    default_engine().analyze(text)
}
