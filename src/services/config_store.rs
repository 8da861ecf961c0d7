// Configuration Storage Service
// Handles config file read/write, validation and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::lexicon::{to_owned_list, NEGATIVE_WORDS, NEGATORS, POSITIVE_WORDS};
use crate::models::{FeatureWeights, LabelThresholds};

const CONFIG_FILE_NAME: &str = "config.json";
const MAX_BACKUPS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Every tunable the analysis engine reads. Loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Longer inputs are rejected, never truncated.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
    #[serde(default = "default_positive_lexicon")]
    pub positive_lexicon: Vec<String>,
    #[serde(default = "default_negative_lexicon")]
    pub negative_lexicon: Vec<String>,
    #[serde(default = "default_negators")]
    pub negators: Vec<String>,
    #[serde(default = "default_negation_window")]
    pub negation_window: usize,
    #[serde(default)]
    pub label_thresholds: LabelThresholds,
    #[serde(default)]
    pub feature_weights: FeatureWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            positive_lexicon: default_positive_lexicon(),
            negative_lexicon: default_negative_lexicon(),
            negators: default_negators(),
            negation_window: default_negation_window(),
            label_thresholds: LabelThresholds::default(),
            feature_weights: FeatureWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_chars == 0 {
            return Err(ConfigError::Invalid("maxInputChars must be positive".to_string()));
        }

        let t = &self.label_thresholds;
        if t.ai_min > 100 || t.human_max >= t.ai_min {
            return Err(ConfigError::Invalid(format!(
                "labelThresholds need humanMax < aiMin <= 100 (got humanMax={}, aiMin={})",
                t.human_max, t.ai_min
            )));
        }

        let w = &self.feature_weights;
        let all_finite = [
            w.bias,
            w.readability,
            w.diversity,
            w.burstiness,
            w.sentence_length,
            w.function_words,
            w.repetition_blend,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::Invalid("featureWeights must be finite".to_string()));
        }
        if !(0.0..=1.0).contains(&w.repetition_blend) {
            return Err(ConfigError::Invalid(format!(
                "featureWeights.repetitionBlend must be within [0, 1] (got {})",
                w.repetition_blend
            )));
        }

        Ok(())
    }
}

fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_bind_address() -> String { "0.0.0.0:5000".to_string() }
fn default_max_input_chars() -> usize { 20_000 }
fn default_negation_window() -> usize { 3 }
fn default_positive_lexicon() -> Vec<String> { to_owned_list(POSITIVE_WORDS) }
fn default_negative_lexicon() -> Vec<String> { to_owned_list(NEGATIVE_WORDS) }
fn default_negators() -> Vec<String> { to_owned_list(NEGATORS) }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join(CONFIG_FILE_NAME);
        Self { config_dir, config_file }
    }

    /// `PROSEPROBE_CONFIG_DIR`, else the platform config directory.
    pub fn from_env() -> Option<Self> {
        match std::env::var("PROSEPROBE_CONFIG_DIR") {
            Ok(dir) if !dir.trim().is_empty() => Some(Self::new(PathBuf::from(dir))),
            _ => Self::default_config_dir().map(Self::new),
        }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("proseprobe"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(|source| io_error(&self.config_dir, source))
    }

    /// Load and validate configuration; a missing file means defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|source| io_error(&self.config_file, source))?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        config.engine.validate()?;
        self.ensure_dir()?;

        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content).map_err(|source| io_error(&self.config_file, source))
    }

    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(|source| io_error(&backup_dir, source))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(|source| io_error(&backup_file, source))?;

        self.cleanup_old_backups(&backup_dir, MAX_BACKUPS)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|source| io_error(backup_dir, source))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Timestamped names sort oldest first.
        entries.sort_by_key(|e| e.file_name());

        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("proseprobe-test-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address, "0.0.0.0:5000");
        assert_eq!(config.engine.label_thresholds.ai_min, 70);
        assert_eq!(config.engine.label_thresholds.human_max, 30);
        assert_eq!(config.engine.negation_window, 3);
        assert!(config.engine.positive_lexicon.contains(&"love".to_string()));
        assert!(config.engine.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = AppConfig::default();
        config.version = "1.0.0".to_string();
        config.engine.negation_window = 2;

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"negationWindow\":2"));
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.version, "1.0.0");
        assert_eq!(parsed.engine, config.engine);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"engine": {"labelThresholds": {"aiMin": 80}}}"#).unwrap();
        assert_eq!(parsed.engine.label_thresholds.ai_min, 80);
        assert_eq!(parsed.engine.label_thresholds.human_max, 30);
        assert_eq!(parsed.engine.max_input_chars, 20_000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut engine = EngineConfig::default();
        engine.label_thresholds = LabelThresholds { ai_min: 40, human_max: 40 };
        assert!(matches!(engine.validate(), Err(ConfigError::Invalid(_))));

        let mut engine = EngineConfig::default();
        engine.feature_weights.repetition_blend = 1.5;
        assert!(engine.validate().is_err());

        let mut engine = EngineConfig::default();
        engine.feature_weights.burstiness = f64::NAN;
        assert!(engine.validate().is_err());

        let mut engine = EngineConfig::default();
        engine.max_input_chars = 0;
        assert!(engine.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let store = ConfigStore::new(scratch_dir());
        let config = store.load().unwrap();
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_save_load_and_backup() {
        let dir = scratch_dir();
        let store = ConfigStore::new(dir.clone());

        let mut config = AppConfig::default();
        config.engine.max_input_chars = 500;
        store.save(&config).unwrap();
        config.engine.max_input_chars = 600;
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap().engine.max_input_chars, 600);
        let backups = fs::read_dir(dir.join("backups")).unwrap().count();
        assert_eq!(backups, 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = scratch_dir();
        let store = ConfigStore::new(dir.clone());
        store.ensure_dir().unwrap();
        fs::write(store.config_file(), r#"{"engine": {"maxInputChars": 0}}"#).unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Invalid(_))));

        fs::write(store.config_file(), "not json").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(dir);
    }
}
