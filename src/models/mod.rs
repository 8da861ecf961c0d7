// ProseProbe Data Models
// Wire types for /predict and /analyze plus the engine's feature/score types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::text_processor::Terminal;

// ============ Requests ============

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PredictRequest {
    /// A missing field is treated like empty text.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sensitivity: Option<String>,
}

// ============ Labels ============

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Exact tie-break: > 0 Positive, < 0 Negative, == 0 Neutral.
    pub fn from_score(score: i32) -> Self {
        match score.signum() {
            1 => Self::Positive,
            -1 => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Likely AI-generated")]
    LikelyAi,
    #[serde(rename = "Uncertain")]
    Uncertain,
    #[serde(rename = "Likely Human-written")]
    LikelyHuman,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LikelyAi => "Likely AI-generated",
            Self::Uncertain => "Uncertain",
            Self::LikelyHuman => "Likely Human-written",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Thresholds & Weights ============

/// Cut-offs applied to the integer ai_score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelThresholds {
    /// ai_score at or above this is "Likely AI-generated".
    #[serde(default = "default_ai_min")]
    pub ai_min: u8,
    /// ai_score at or below this is "Likely Human-written".
    #[serde(default = "default_human_max")]
    pub human_max: u8,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            ai_min: default_ai_min(),
            human_max: default_human_max(),
        }
    }
}

/// Logistic weights for the stylometric model and the blend factor of the
/// repetition model. Each weight multiplies a feature normalized to [-1, 1]
/// where positive means "more machine-like".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureWeights {
    #[serde(default)]
    pub bias: f64,
    #[serde(default = "default_readability_weight")]
    pub readability: f64,
    #[serde(default = "default_diversity_weight")]
    pub diversity: f64,
    #[serde(default = "default_burstiness_weight")]
    pub burstiness: f64,
    #[serde(default = "default_sentence_length_weight")]
    pub sentence_length: f64,
    #[serde(default = "default_function_words_weight")]
    pub function_words: f64,
    /// Share of the repetition model in the final probability, in [0, 1].
    #[serde(default = "default_repetition_blend")]
    pub repetition_blend: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            bias: 0.0,
            readability: default_readability_weight(),
            diversity: default_diversity_weight(),
            burstiness: default_burstiness_weight(),
            sentence_length: default_sentence_length_weight(),
            function_words: default_function_words_weight(),
            repetition_blend: default_repetition_blend(),
        }
    }
}

// ============ Features ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StylometrySignals {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: u64,
    pub sentence_length_std_dev: f64,
    pub min_sentence_length: usize,
    pub max_sentence_length: usize,
    /// Coefficient of variation of sentence length; None below two sentences.
    pub burstiness: Option<f64>,
    pub function_word_ratio: f64,
    pub repeat_ratio: f64,
    pub ngram_repeat_rate: f64,
    pub perplexity: f64,
    pub avg_word_length: f64,
    pub degraded_segmentation: bool,
    pub positive_hits: usize,
    pub negative_hits: usize,
}

/// Everything the scorer looks at, built once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    pub readability: f64,
    pub vocab_diversity: f64,
    pub avg_sentence_length: f64,
    pub sentiment: Sentiment,
    pub sentiment_score: i32,
    pub signals: StylometrySignals,
}

// ============ Responses ============

/// The `/predict` payload. Field names are part of the client contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub human_score: u8,
    pub ai_score: u8,
    pub label: Verdict,
    pub readability: f64,
    pub vocab_diversity: f64,
    pub avg_sentence_length: f64,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProbabilities {
    pub stylometric: f64,
    pub repetition: f64,
    pub combined: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceSummary {
    pub start: usize,
    pub end: usize,
    pub words: usize,
    pub terminal: Terminal,
}

/// The `/analyze` payload: the classification plus everything behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub request_id: String,
    pub version: String,
    pub result: ClassificationResult,
    pub features: FeatureSet,
    pub probabilities: ModelProbabilities,
    pub thresholds: LabelThresholds,
    pub explanations: Vec<String>,
    pub sentences: Vec<SentenceSummary>,
}

// ============ Default Value Functions ============

fn default_ai_min() -> u8 { 70 }
fn default_human_max() -> u8 { 30 }
fn default_readability_weight() -> f64 { 1.2 }
fn default_diversity_weight() -> f64 { 0.8 }
fn default_burstiness_weight() -> f64 { 1.4 }
fn default_sentence_length_weight() -> f64 { 0.6 }
fn default_function_words_weight() -> f64 { 0.5 }
fn default_repetition_blend() -> f64 { 0.25 }
