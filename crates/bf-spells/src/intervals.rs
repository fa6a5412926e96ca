//! Intervals between spill and curtailment events.

use bf_core::Real;

/// One event year and the elapsed time since the prior events. The
/// interval includes the event year itself, since depletions accumulate in
/// that year.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventRow {
    pub year: i32,
    pub spill: Real,
    pub curtailment: Real,
    /// Years since the last spill, counted at curtailment events only;
    /// absent when no spill has been seen since the last curtailment.
    pub from_spill: Option<u32>,
    /// Years since the last curtailment, likewise.
    pub from_curtailment: Option<u32>,
}

/// Event table plus the interval samples accumulated over the run.
#[derive(Clone, Debug, Default)]
pub struct IntervalSummary {
    pub events: Vec<EventRow>,
    pub spill_intervals: Vec<u32>,
    pub curtailment_intervals: Vec<u32>,
}

/// Max/min/mean over an interval sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalStats {
    pub max: u32,
    pub min: u32,
    pub mean: Real,
}

impl IntervalStats {
    pub fn from_intervals(intervals: &[u32]) -> Option<Self> {
        if intervals.is_empty() {
            return None;
        }
        Some(Self {
            max: *intervals.iter().max().unwrap(),
            min: *intervals.iter().min().unwrap(),
            mean: intervals.iter().map(|&v| v as Real).sum::<Real>() / intervals.len() as Real,
        })
    }
}

/// Scan a run's (year, spill, curtailment) rows for events and the
/// intervals between them. Counters restart at 1 in the year of the event
/// they measure from, and go dormant when the opposite event kind
/// intervenes.
pub fn calculate_intervals(
    rows: impl IntoIterator<Item = (i32, Real, Real)>,
) -> IntervalSummary {
    let mut summary = IntervalSummary::default();
    let mut from_spill: Option<u32> = None;
    let mut from_curtailment: Option<u32> = None;

    for (year, spill, curtailment) in rows {
        if spill > 0.0 || curtailment > 0.0 {
            let mut event = EventRow {
                year,
                spill,
                curtailment,
                from_spill: None,
                from_curtailment: None,
            };

            if curtailment > 0.0 {
                event.from_spill = from_spill;
                event.from_curtailment = from_curtailment;
                if let Some(v) = from_spill {
                    summary.spill_intervals.push(v);
                }
                if let Some(v) = from_curtailment {
                    summary.curtailment_intervals.push(v);
                }
                from_curtailment = Some(1);
                from_spill = None;
            }

            if spill > 0.0 {
                from_spill = Some(1);
                from_curtailment = None;
            }

            summary.events.push(event);
        } else {
            from_spill = from_spill.map(|v| v + 1);
            from_curtailment = from_curtailment.map(|v| v + 1);
        }
    }

    summary
}
