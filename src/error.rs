use thiserror::Error;

/// Unified error type for releasegh operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Version format error: {0}")]
    Format(String),

    #[error("Unknown increment level: {0}")]
    Level(String),

    #[error("Changelog placeholder not found: {0}")]
    Placeholder(String),

    #[error("Error requesting latest release: {0}")]
    ForgeQuery(u16),

    #[error("Error creating new release: {0}")]
    ForgeWrite(u16),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in releasegh
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a version format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        ReleaseError::Format(msg.into())
    }

    /// Create an unknown-level error with context
    pub fn level(msg: impl Into<String>) -> Self {
        ReleaseError::Level(msg.into())
    }

    /// Create a missing-placeholder error with context
    pub fn placeholder(msg: impl Into<String>) -> Self {
        ReleaseError::Placeholder(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseError::Remote(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::format("bad tag");
        assert_eq!(err.to_string(), "Version format error: bad tag");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_forge_errors_carry_status() {
        assert_eq!(
            ReleaseError::ForgeQuery(404).to_string(),
            "Error requesting latest release: 404"
        );
        assert_eq!(
            ReleaseError::ForgeWrite(422).to_string(),
            "Error creating new release: 422"
        );
    }

    #[test]
    fn test_error_constructors() {
        assert!(ReleaseError::level("huge").to_string().contains("huge"));
        assert!(ReleaseError::placeholder("x.x.x")
            .to_string()
            .contains("placeholder"));
        assert!(ReleaseError::remote("no origin")
            .to_string()
            .contains("Remote"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::format("x"), "Version format error"),
            (ReleaseError::level("x"), "Unknown increment level"),
            (
                ReleaseError::placeholder("x"),
                "Changelog placeholder not found",
            ),
            (ReleaseError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
