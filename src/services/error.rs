// Analysis Errors
// Every failure the engine can surface to a caller

use thiserror::Error;

pub const INTERNAL_FAILURE_MESSAGE: &str = "internal analysis failure";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Please enter text")]
    EmptyInput,
    #[error("Text contains no words to analyze")]
    NoWords,
    #[error("Text is too long: {chars} characters (limit is {limit})")]
    TooLong { chars: usize, limit: usize },
    /// Detail is for server-side logs only; Display stays generic.
    #[error("internal analysis failure")]
    Internal(String),
}

impl AnalysisError {
    /// Input errors are the caller's fault and safe to echo back verbatim.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyInput | Self::NoWords => 400,
            Self::TooLong { .. } => 413,
            Self::Internal(_) => 500,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_display_hides_detail() {
        let err = AnalysisError::Internal("readability was NaN".to_string());
        assert_eq!(err.to_string(), INTERNAL_FAILURE_MESSAGE);
        assert!(!err.is_input_error());
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_input_error_statuses() {
        assert_eq!(AnalysisError::EmptyInput.status_code(), 400);
        assert_eq!(AnalysisError::NoWords.status_code(), 400);
        let too_long = AnalysisError::TooLong { chars: 12, limit: 10 };
        assert_eq!(too_long.status_code(), 413);
        assert!(too_long.to_string().contains("limit is 10"));
    }
}
