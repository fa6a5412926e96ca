//! Coupled evaporation/storage balance for one year.

use bf_core::Real;
use bf_policy::ReservoirModel;

/// Inputs to one year's storage balance.
#[derive(Clone, Copy, Debug)]
pub struct StorageProblem {
    pub model: ReservoirModel,
    pub capacity: Real,
    pub start_contents: Real,
    /// Inflow net of effective upstream demand.
    pub depleted_inflow: Real,
    /// Required compliance-point release this year.
    pub release_target: Real,
}

/// Stopping criteria for the fixed-point iteration.
#[derive(Clone, Copy, Debug)]
pub struct SolveOptions {
    /// Closure criterion on successive evaporation estimates, acre-feet.
    pub tolerance: Real,
    /// Hard cap on passes. Exhaustion is not an error; the last iterate
    /// stands.
    pub max_trials: u32,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            tolerance: 5.0,
            max_trials: 5,
        }
    }
}

/// Converged (or capped) balance for the year.
#[derive(Clone, Copy, Debug)]
pub struct StorageSolution {
    /// Water available to store, unclamped. Negative means a storage
    /// shortfall; above capacity means a surplus.
    pub available: Real,
    /// Ending contents, clamped into [0, capacity].
    pub end_contents: Real,
    /// Final evaporation estimate.
    pub evaporation: Real,
    /// Passes actually used; reaches max_trials + 1 when the cap fires.
    pub trials: u32,
}

/// Damped fixed-point iteration for the evaporation/storage balance.
///
/// Evaporation depends on contents and contents on evaporation, so each
/// pass recomputes the available water with the current evaporation
/// estimate, clamps trial contents into the storable range, and
/// re-estimates evaporation at the average of start and trial contents.
/// Convergence is not guaranteed analytically; the trial cap is the
/// circuit breaker, and the recorded trial count lets callers detect
/// repeated non-convergence statistically.
///
/// The iteration order, the averaged re-estimate, and the hard cap are all
/// results-affecting; changing any of them changes simulated outputs.
pub fn solve_storage(problem: &StorageProblem, opts: &SolveOptions) -> StorageSolution {
    let StorageProblem {
        model,
        capacity,
        start_contents,
        depleted_inflow,
        release_target,
    } = *problem;

    let mut evaporation = model.evaporation(start_contents);
    let mut trials = 0;

    loop {
        trials += 1;
        let trial_evaporation = evaporation;
        let available = depleted_inflow + start_contents - release_target - trial_evaporation;
        let trial_contents = available.min(capacity).max(0.0);
        evaporation = model.evaporation((start_contents + trial_contents) / 2.0);

        if (trial_evaporation - evaporation).abs() < opts.tolerance || trials > opts.max_trials {
            if trials > opts.max_trials {
                tracing::warn!(trials, "evaporation solve hit the trial cap, keeping last iterate");
            }
            return StorageSolution {
                available,
                end_contents: trial_contents,
                evaporation,
                trials,
            };
        }
    }
}
