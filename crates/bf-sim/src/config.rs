//! Simulation run configuration.

use crate::error::{SimError, SimResult};
use bf_core::Real;
use bf_policy::{ReleasePolicy, ReservoirModel, TriggerPolicy};
use serde::{Deserialize, Serialize};

/// Options for a single-trace run. One value of this struct fully
/// determines a simulation given its inflow trace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Storage pool selector; fixes the evaporation regression and the
    /// default capacity.
    pub reservoir_model: ReservoirModel,
    /// Total storage capacity, acre-feet. Model default when absent.
    pub reservoir_capacity: Option<Real>,
    /// Starting contents; full pool when absent. Out-of-range values are
    /// clamped into [0, capacity].
    pub start_contents: Option<Real>,
    /// Nominal annual delivery obligation at the compliance gage.
    pub annual_target: Real,
    /// Number of years in the rolling delivery window.
    pub window_length: usize,
    /// Upstream consumptive-use demand applied to years without a
    /// per-year override.
    pub upstream_demand: Real,
    /// Volume of upstream use exempt from curtailment.
    pub protected_volume: Real,
    pub release_policy: ReleasePolicy,
    /// Off by default.
    pub trigger_policy: Option<TriggerPolicy>,
    /// Closure criterion for the evaporation solve, acre-feet.
    pub tolerance: Real,
    /// Hard cap on evaporation-solve passes per year.
    pub max_trials: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            reservoir_model: ReservoirModel::Active,
            reservoir_capacity: None,
            start_contents: None,
            annual_target: 8_230_000.0,
            window_length: 10,
            upstream_demand: 5_790_000.0,
            protected_volume: 2_267_000.0,
            release_policy: ReleasePolicy::MinimumObjective,
            trigger_policy: None,
            tolerance: 5.0,
            max_trials: 5,
        }
    }
}

impl SimulationConfig {
    pub fn capacity(&self) -> Real {
        self.reservoir_capacity
            .unwrap_or_else(|| self.reservoir_model.default_capacity())
    }

    /// Starting contents clamped into the storable range.
    pub fn initial_contents(&self) -> Real {
        let capacity = self.capacity();
        match self.start_contents {
            Some(c) => c.min(capacity).max(0.0),
            None => capacity,
        }
    }

    /// Fail fast on configurations no year could be simulated under.
    pub fn validate(&self) -> SimResult<()> {
        if !self.capacity().is_finite() || self.capacity() <= 0.0 {
            return Err(SimError::Config {
                what: "reservoir capacity must be positive",
            });
        }
        if !self.annual_target.is_finite() || self.annual_target <= 0.0 {
            return Err(SimError::Config {
                what: "annual compliance target must be positive",
            });
        }
        if self.window_length == 0 {
            return Err(SimError::Config {
                what: "compliance window length must be positive",
            });
        }
        if !self.upstream_demand.is_finite() {
            return Err(SimError::Config {
                what: "upstream demand must be finite",
            });
        }
        if !self.protected_volume.is_finite() || self.protected_volume < 0.0 {
            return Err(SimError::Config {
                what: "protected volume must be non-negative",
            });
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SimError::Config {
                what: "solve tolerance must be non-negative",
            });
        }
        if self.max_trials == 0 {
            return Err(SimError::Config {
                what: "max solve trials must be positive",
            });
        }
        if let Some(c) = self.start_contents
            && !c.is_finite()
        {
            return Err(SimError::Config {
                what: "start contents must be finite",
            });
        }
        Ok(())
    }
}
