use thiserror::Error;

/// Failure reported by the host updater.
///
/// `Display` is the human-readable text shown in the dialog's error banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdaterError {
    #[error("no update is available to install")]
    NoUpdateAvailable,
    #[error("{0}")]
    Rejected(String),
}

impl UpdaterError {
    pub fn rejected(message: impl Into<String>) -> Self {
        UpdaterError::Rejected(message.into())
    }
}
