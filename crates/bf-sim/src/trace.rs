//! Annual inflow series input.

use crate::error::{SimError, SimResult};
use bf_core::Real;
use serde::{Deserialize, Serialize};

/// One year of the inflow series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceYear {
    pub year: i32,
    /// Natural inflow above the storage system, acre-feet.
    pub inflow: Real,
    /// Per-year upstream demand override; the configured default applies
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<Real>,
}

/// Ordered annual inflow series, one entry per simulated year. Immutable
/// once constructed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FlowTrace {
    years: Vec<TraceYear>,
}

impl FlowTrace {
    /// Build a trace, checking the input contract: years strictly
    /// ascending, inflows finite and non-negative.
    pub fn new(years: Vec<TraceYear>) -> SimResult<Self> {
        for pair in years.windows(2) {
            if pair[1].year <= pair[0].year {
                return Err(SimError::Trace {
                    what: format!(
                        "years not strictly ascending at {} -> {}",
                        pair[0].year, pair[1].year
                    ),
                });
            }
        }
        for y in &years {
            if !y.inflow.is_finite() || y.inflow < 0.0 {
                return Err(SimError::Trace {
                    what: format!("inflow for year {} is {}", y.year, y.inflow),
                });
            }
            if let Some(d) = y.demand
                && !d.is_finite()
            {
                return Err(SimError::Trace {
                    what: format!("demand override for year {} is {}", y.year, d),
                });
            }
        }
        Ok(Self { years })
    }

    /// Convenience constructor from (year, inflow) pairs.
    pub fn from_flows(pairs: &[(i32, Real)]) -> SimResult<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(year, inflow)| TraceYear {
                    year,
                    inflow,
                    demand: None,
                })
                .collect(),
        )
    }

    pub fn years(&self) -> &[TraceYear] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
