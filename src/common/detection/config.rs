//! Detector configuration.

use serde::{Deserialize, Serialize};

use super::signatures::ZIP_SIGNATURE;
use super::zip::DEFAULT_SCAN_WINDOW;
use crate::common::error::{Error, Result};

/// Tunables for [`Detector`](super::Detector).
///
/// Missing fields take their default when deserialized, so an empty table is
/// a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Size of the scratch buffer used to peek ahead while walking a ZIP
    /// archive. Must hold at least one local file header signature.
    pub scan_window: usize,
    /// Upper bound on how much of a ZIP source is loaded. `None` loads it all.
    pub max_archive_bytes: Option<u64>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scan_window: DEFAULT_SCAN_WINDOW,
            max_archive_bytes: None,
        }
    }
}

impl DetectorConfig {
    pub fn with_scan_window(mut self, scan_window: usize) -> Self {
        self.scan_window = scan_window;
        self
    }

    pub fn with_max_archive_bytes(mut self, max_archive_bytes: u64) -> Self {
        self.max_archive_bytes = Some(max_archive_bytes);
        self
    }

    /// Reject settings the ZIP walker cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.scan_window < ZIP_SIGNATURE.len() {
            return Err(Error::InvalidConfig(format!(
                "scan_window must be at least {} bytes, got {}",
                ZIP_SIGNATURE.len(),
                self.scan_window
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.scan_window, 4100);
        assert_eq!(config.max_archive_bytes, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scan_window_too_small() {
        let config = DetectorConfig::default().with_scan_window(3);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(DetectorConfig::default().with_scan_window(4).validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{"max_archive_bytes": 1048576}"#).unwrap();
        assert_eq!(config.scan_window, DEFAULT_SCAN_WINDOW);
        assert_eq!(config.max_archive_bytes, Some(1 << 20));

        let empty: DetectorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, DetectorConfig::default());
    }
}
