use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Remote JSON file with the blog entries, edited by hand in its own repository.
pub const DATA_URL: &str =
    "https://raw.githubusercontent.com/bfletcher4921/devBlogData/main/blog-entries.json";

pub const DEFAULT_PREVIEW_WORDS: usize = 30;

/// What the page shows when the remote dataset cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Render the built-in sample posts and raise a warning toast.
    #[default]
    SampleData,
    /// Render an inline error panel with JSON authoring hints.
    ErrorPanel,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogConfig {
    pub data_url: String,
    pub preview_words: usize,
    pub fetch_timeout_ms: u64,
    pub fallback: FallbackPolicy,
    pub toast_duration_ms: u32,
    pub copy_feedback_ms: u32,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            data_url: DATA_URL.to_string(),
            preview_words: DEFAULT_PREVIEW_WORDS,
            fetch_timeout_ms: 10_000,
            fallback: FallbackPolicy::SampleData,
            toast_duration_ms: 5_000,
            copy_feedback_ms: 2_000,
        }
    }
}

impl BlogConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.data_url.trim().is_empty() {
            return Err(ConfigError::Invalid("dataUrl must not be empty".into()));
        }
        if self.preview_words == 0 {
            return Err(ConfigError::Invalid(
                "previewWords must be greater than zero".into(),
            ));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "fetchTimeoutMs must be greater than zero".into(),
            ));
        }
        Ok(self)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: BlogConfig =
            serde_json::from_str(r#"{"previewWords": 12, "fallback": "error-panel"}"#).unwrap();

        assert_eq!(config.preview_words, 12);
        assert_eq!(config.fallback, FallbackPolicy::ErrorPanel);
        assert_eq!(config.data_url, DATA_URL);
        assert_eq!(config.copy_feedback_ms, 2_000);
    }

    #[test]
    fn zero_word_budget_is_rejected() {
        let config = BlogConfig {
            preview_words: 0,
            ..BlogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_are_valid() {
        let config = BlogConfig::default().validate().unwrap();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
    }
}
