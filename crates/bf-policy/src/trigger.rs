//! Upstream-use trigger schedules.

use bf_core::Real;
use serde::{Deserialize, Serialize};

/// Optional cutback of upstream beneficial use, applied before the year's
/// depletion and evaporation solve. Absent by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerPolicy {
    /// Step schedule on fractional storage, used for sensitivity analysis
    /// of trigger efficacy.
    StorageFraction,
}

impl TriggerPolicy {
    /// Amount to cut back upstream use this year.
    ///
    /// `non_exempt_demand` is demand minus the protected volume and may be
    /// negative; it is passed through unmodified and the caller's inflow
    /// clamp bounds the effective demand.
    pub fn cutback(self, capacity: Real, contents: Real, non_exempt_demand: Real) -> Real {
        match self {
            TriggerPolicy::StorageFraction => {
                let state = contents / capacity;
                if state > 0.33 {
                    0.0
                } else if state > 0.25 {
                    0.1 * non_exempt_demand
                } else if state > 0.15 {
                    0.2 * non_exempt_demand
                } else if state > 0.10 {
                    0.4 * non_exempt_demand
                } else {
                    0.7 * non_exempt_demand
                }
            }
        }
    }
}
