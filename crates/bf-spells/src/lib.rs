//! Run-length ("spell") analysis of simulation event series.
//!
//! A spell is a contiguous run of nonzero values in an event series such
//! as a curtailment or spill column. This crate extracts the maximal runs
//! and all of their contiguous sub-runs, and measures the intervals
//! between spill and curtailment events.

pub mod catalog;
pub mod intervals;

pub use catalog::{SpellCatalog, SpellMap};
pub use intervals::{EventRow, IntervalStats, IntervalSummary, calculate_intervals};
