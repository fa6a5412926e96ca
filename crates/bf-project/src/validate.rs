//! Run-configuration validation logic.

use crate::schema::RunConfig;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing value: {field}")]
    Missing { field: &'static str },

    #[error("Invalid value: {field} ({reason})")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// Reject configurations no simulation could start under. Runs before any
/// trace is read.
pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.name.trim().is_empty() {
        return Err(ValidationError::Missing { field: "name" });
    }
    if config.trace.as_os_str().is_empty() {
        return Err(ValidationError::Missing { field: "trace" });
    }
    config
        .simulation
        .validate()
        .map_err(|e| ValidationError::InvalidValue {
            field: "simulation",
            reason: e.to_string(),
        })?;
    Ok(())
}
