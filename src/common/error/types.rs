//! Error types for blob-sniffer operations.
use thiserror::Error;

/// Main error type for detection operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying byte source could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Detector configuration was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for detection operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "revoked");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "IO error: revoked");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::InvalidConfig("scan_window must be at least 4".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: scan_window must be at least 4"
        );
    }
}
