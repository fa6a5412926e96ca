//! Run-configuration schema definitions.

use bf_sim::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One run description: a named pairing of an inflow trace with a
/// simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub name: String,
    /// Inflow trace CSV, resolved relative to the config file's directory.
    pub trace: PathBuf,
    /// Where run outputs land; the store's default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            name: "unnamed".to_string(),
            trace: PathBuf::new(),
            output_dir: None,
            simulation: SimulationConfig::default(),
        }
    }
}
