//! Mass-balance closure over a finished run.

use crate::sim::YearRecord;
use bf_core::Real;

/// Water balance around the whole run: change in storage plus everything
/// that entered, less everything consumed or delivered. Zero within
/// accumulated rounding for a correct simulation.
///
/// This is a diagnostic oracle for callers, not a runtime gate; the
/// simulator never checks it itself.
pub fn mass_balance(records: &[YearRecord]) -> Real {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return 0.0;
    };
    let mut balance = first.start_contents - last.end_contents;
    balance += records.iter().map(|r| r.inflow).sum::<Real>();
    balance -= records.iter().map(|r| r.beneficial_use).sum::<Real>();
    balance -= records.iter().map(|r| r.evaporation).sum::<Real>();
    balance -= records.iter().map(|r| r.compliance_flow).sum::<Real>();
    balance
}

/// Largest residual a correct run of this length can show: each year's
/// compliance flow is reported to the nearest ten acre-feet (up to 5 af of
/// slack) and beneficial use to the nearest acre-foot (up to 0.5 af).
pub fn balance_envelope(n_years: usize) -> Real {
    5.5 * n_years as Real
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::sim::simulate_trace;
    use crate::trace::FlowTrace;

    #[test]
    fn empty_run_balances_trivially() {
        assert_eq!(mass_balance(&[]), 0.0);
    }

    #[test]
    fn mixed_trace_closes_within_envelope() {
        let trace = FlowTrace::from_flows(&[
            (1960, 21_000_000.0),
            (1961, 6_000_000.0),
            (1962, 4_500_000.0),
            (1963, 9_000_000.0),
            (1964, 17_000_000.0),
            (1965, 12_000_000.0),
        ])
        .unwrap();
        let records = simulate_trace(&trace, &SimulationConfig::default()).unwrap();
        let balance = mass_balance(&records);
        assert!(
            balance.abs() <= balance_envelope(records.len()),
            "balance {balance} outside envelope"
        );
    }
}
