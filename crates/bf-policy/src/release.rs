//! Compliance-point release rules.

use bf_core::Real;
use serde::{Deserialize, Serialize};

/// How the required release responds to the rolling-window deficit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleasePolicy {
    /// Never deliver less than the accumulated shortfall, nor less than the
    /// nominal annual target.
    #[default]
    MinimumObjective,
    /// Deliver exactly the amount needed to erase the rolling-window
    /// shortfall. Can be less than the annual target when the window is in
    /// surplus; the deficit is clamped to zero upstream, so never negative.
    DeficitOnly,
}

impl ReleasePolicy {
    pub fn release(self, annual_target: Real, deficit: Real) -> Real {
        match self {
            ReleasePolicy::MinimumObjective => annual_target.max(deficit),
            ReleasePolicy::DeficitOnly => deficit,
        }
    }
}
