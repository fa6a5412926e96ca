//! Content-based hashing for run IDs.

use bf_sim::{FlowTrace, SimulationConfig};
use sha2::{Digest, Sha256};

pub fn compute_run_id(
    config: &SimulationConfig,
    trace: &FlowTrace,
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());

    let trace_json = serde_json::to_string(trace).unwrap_or_default();
    hasher.update(trace_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
