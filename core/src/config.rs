//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Milliseconds between scan cycles.
    #[serde(default = "default_scan_interval_ms", rename = "scanIntervalMs")]
    pub scan_interval_ms: u64,
}

fn default_scan_interval_ms() -> u64 {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scan_interval_ms: default_scan_interval_ms(),
        }
    }
}

impl EngineConfig {
    /// The scan cadence as a [`Duration`].
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        let config = EngineConfig::default();
        assert_eq!(config.scan_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_explicit_interval() {
        let config: EngineConfig = serde_json::from_str(r#"{"scanIntervalMs": 250}"#).unwrap();
        assert_eq!(config.scan_interval(), Duration::from_millis(250));
    }
}
