use async_trait::async_trait;

use crate::error::ClipboardError;

pub const COPY_LABEL: &str = "Copy JSON";
pub const COPIED_LABEL: &str = "Copied!";

/// The two ways a browser can put text on the clipboard.
#[async_trait(?Send)]
pub trait ClipboardBackend {
    /// Async clipboard API.
    async fn write_modern(&self, text: &str) -> Result<(), ClipboardError>;

    /// Selection based copy for browsers without the async API.
    fn write_legacy(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Modern,
    Legacy,
}

pub async fn copy_text<B: ClipboardBackend + ?Sized>(
    backend: &B,
    text: &str,
) -> Result<CopyMethod, ClipboardError> {
    match backend.write_modern(text).await {
        Ok(()) => return Ok(CopyMethod::Modern),
        Err(e) => log::warn!("Modern clipboard write failed, falling back: {}", e),
    }

    match backend.write_legacy(text) {
        Ok(()) => Ok(CopyMethod::Legacy),
        Err(e) => {
            log::error!("Legacy clipboard copy failed: {}", e);
            Err(ClipboardError::BothFailed)
        }
    }
}

/// Label state of the copy button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyButton {
    #[default]
    Idle,
    Copied,
}

impl CopyButton {
    pub fn label(self) -> &'static str {
        match self {
            CopyButton::Idle => COPY_LABEL,
            CopyButton::Copied => COPIED_LABEL,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            CopyButton::Idle => "btn btn-outline-secondary",
            CopyButton::Copied => "btn btn-success",
        }
    }

    /// State after a copy attempt and how many milliseconds until it
    /// reverts to idle.
    pub fn after_copy(
        result: &Result<CopyMethod, ClipboardError>,
        feedback_ms: u32,
    ) -> (Self, Option<u32>) {
        match result {
            Ok(_) => (CopyButton::Copied, Some(feedback_ms)),
            Err(_) => (CopyButton::Idle, None),
        }
    }
}
