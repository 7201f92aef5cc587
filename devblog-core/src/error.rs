use thiserror::Error;

use crate::form::Field;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    // Транспортные ошибки
    #[error("HTTP error! status: {0}")]
    Http(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    // Ошибки десериализации
    #[error("JSON parsing failed: {0}")]
    Parse(String),
}

impl LoadError {
    pub fn is_parse(&self) -> bool {
        matches!(self, LoadError::Parse(_))
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(field) => *field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("Clipboard API is not available")]
    Unavailable,

    #[error("Clipboard write rejected: {0}")]
    Rejected(String),

    #[error("Could not copy to the clipboard, please copy the text manually")]
    BothFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
