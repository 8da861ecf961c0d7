// ProseProbe Core Services

pub mod config_store;
pub mod detection;
pub mod error;
pub mod lexicon;
pub mod text_processor;

pub use config_store::{AppConfig, ConfigStore, EngineConfig, ServerConfig};
pub use error::{AnalysisError, ConfigError};
pub use text_processor::{segment, Sentence, SentenceSequence, Terminal, Word};

pub use detection::{analyze, default_engine, DetectionSensitivity, Engine};
