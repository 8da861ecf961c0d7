// Detection Module
// Text analysis core organized into specialized submodules:
// - readability / diversity / sentence_length / sentiment / stylometry: independent feature analyzers
// - likelihood: two-model AI-likelihood ensemble
// - sensitivity: threshold presets and labeling
// - aggregation: validation, feature fan-out and result assembly

pub mod aggregation;
pub mod diversity;
pub mod likelihood;
pub mod readability;
pub mod sensitivity;
pub mod sentence_length;
pub mod sentiment;
pub mod stylometry;

pub use aggregation::{analyze, default_engine, Analysis, Engine};
pub use likelihood::LikelihoodScore;
pub use sensitivity::{decide_label, DetectionSensitivity};
pub use sentence_length::SentenceLengthStats;
pub use sentiment::{SentimentLexicon, SentimentReport};
pub use stylometry::LexicalProfile;
