//! Counter search configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ProverError;

/// Default candidates per thread between cancellation checks
pub const DEFAULT_BATCH_SIZE: u64 = 4096;

/// Default seconds between progress reports
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 5;

/// Settings for [`crate::improve`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImproveConfig {
    /// Worker threads (None = one per CPU)
    pub threads: Option<usize>,
    pub batch_size: u64,
    /// Upper bound on candidates examined (None = until the counter space ends)
    pub max_iterations: Option<u64>,
    /// Stop at the last fast-phase counter
    pub stop_at_slow_phase: bool,
    pub report_interval_secs: u64,
}

impl Default for ImproveConfig {
    fn default() -> Self {
        Self {
            threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
            max_iterations: None,
            stop_at_slow_phase: false,
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
        }
    }
}

impl ImproveConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ProverError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ProverError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ProverError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProverError> {
        if self.batch_size == 0 {
            return Err(ProverError::Config("batch_size must be positive".into()));
        }
        if self.threads == Some(0) {
            return Err(ProverError::Config("threads must be positive".into()));
        }
        Ok(())
    }
}
