use thiserror::Error;

use crate::session::validation::FormErrors;

/// Message shown to the user whenever secure storage misbehaves.
///
/// The underlying error is logged, never displayed.
pub const STORAGE_USER_MESSAGE: &str = "Unable to sign in securely. Please try again.";

/// All errors that can occur in credcache.
#[derive(Debug, Error)]
pub enum CacheError {
    // --- Storage errors ---
    #[error("Secure storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Remembered credentials are malformed: {0}")]
    MalformedRecord(String),

    #[error("Invalid storage key '{0}' — use letters, digits, '.', '-' or '_'")]
    InvalidStorageKey(String),

    // --- Form errors ---
    #[error("Incomplete form: {0}")]
    IncompleteForm(FormErrors),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl CacheError {
    /// Text that is safe to put in front of a user.
    pub fn user_message(&self) -> String {
        match self {
            Self::StorageUnavailable(_) => STORAGE_USER_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Convenience type alias for credcache results.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_hide_their_detail() {
        let err = CacheError::StorageUnavailable("keychain returned -25308".into());
        assert_eq!(err.user_message(), STORAGE_USER_MESSAGE);
        assert!(err.to_string().contains("-25308"));
    }

    #[test]
    fn other_errors_show_their_display_text() {
        let err = CacheError::ConfigError("bad toml".into());
        assert_eq!(err.user_message(), "Config file error: bad toml");
    }
}
