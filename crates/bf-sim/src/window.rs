//! Rolling compliance-window accounting.

use bf_core::Real;
use std::collections::VecDeque;

/// Fixed-length record of the most recent annual compliance-point flows,
/// newest first. Seeded at the annual target: the record assumes full
/// compliance for the years before the simulation starts.
///
/// Each simulated year drops the oldest entry, measures the deficit over
/// the remaining record, and later pushes the year's own flow back in, so
/// the window always reflects the last N years including the one just
/// computed.
#[derive(Clone, Debug)]
pub struct ComplianceWindow {
    record: VecDeque<Real>,
    cumulative_target: Real,
}

impl ComplianceWindow {
    pub fn new(length: usize, annual_target: Real) -> Self {
        debug_assert!(length > 0, "window length must be positive");
        Self {
            record: std::iter::repeat_n(annual_target, length).collect(),
            cumulative_target: length as Real * annual_target,
        }
    }

    /// Drop the oldest year and return the delivery deficit against the
    /// cumulative target over the remaining record, clamped to zero.
    /// Must be paired with a [`push`](Self::push) before the next call.
    pub fn begin_year(&mut self) -> Real {
        self.record.pop_back();
        (self.cumulative_target - self.sum()).max(0.0)
    }

    /// Record this year's compliance-point flow, restoring full length.
    pub fn push(&mut self, flow: Real) {
        self.record.push_front(flow);
    }

    pub fn sum(&self) -> Real {
        self.record.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_window_reports_no_deficit() {
        let mut w = ComplianceWindow::new(10, 8_230_000.0);
        assert_eq!(w.len(), 10);
        let deficit = w.begin_year();
        assert_eq!(deficit, 0.0);
        w.push(8_230_000.0);
        assert_eq!(w.len(), 10);
    }

    #[test]
    fn shortfall_years_accumulate_deficit() {
        let mut w = ComplianceWindow::new(3, 100.0);
        // Year 1 delivers nothing
        assert_eq!(w.begin_year(), 100.0);
        w.push(0.0);
        // Two seed years remain, plus the zero: short by the dropped seed
        // year plus last year's missing delivery
        assert_eq!(w.begin_year(), 200.0);
        w.push(300.0);
        assert_eq!(w.sum(), 400.0);
    }

    #[test]
    fn surplus_clamps_to_zero() {
        let mut w = ComplianceWindow::new(2, 100.0);
        w.begin_year();
        w.push(500.0);
        assert_eq!(w.begin_year(), 0.0);
        w.push(100.0);
    }

    #[test]
    fn length_invariant_holds_for_any_n() {
        for n in 1..=12 {
            let mut w = ComplianceWindow::new(n, 50.0);
            for i in 0..30 {
                w.begin_year();
                w.push(i as Real);
                assert_eq!(w.len(), n);
            }
        }
    }
}
