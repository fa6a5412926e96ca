//! Spell catalogs: mean event magnitude by duration.

use bf_core::Real;
use std::collections::BTreeMap;

/// Mean spell magnitudes keyed by duration in years.
pub type SpellMap = BTreeMap<usize, Vec<Real>>;

/// Catalogs built in a single pass over an event series. Read-only after
/// construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpellCatalog {
    /// Maximal nonzero runs, one entry per run.
    pub independent: SpellMap,
    /// Every contiguous sub-run of every independent run; a run of length
    /// d contributes d(d+1)/2 entries.
    pub nested: SpellMap,
}

impl SpellCatalog {
    /// Characterize the spells in an ordered series of non-negative
    /// values, zero meaning "no event".
    ///
    /// For conventional analysis of flow or precipitation spells the
    /// series must first be normalized so that excursions are positive
    /// departures from zero.
    pub fn from_series(series: &[Real]) -> Self {
        let mut catalog = SpellCatalog::default();
        let mut rest = series;

        loop {
            // Strip leading zeros
            while !rest.is_empty() && rest[0] == 0.0 {
                rest = &rest[1..];
            }
            if rest.is_empty() {
                break;
            }

            // Delimit and catalog the independent spell
            let end = rest.iter().position(|&v| v == 0.0).unwrap_or(rest.len());
            let run = &rest[..end];
            catalog
                .independent
                .entry(run.len())
                .or_default()
                .push(mean(run));

            // Catalog every nested sub-window of the run
            for duration in 1..=run.len() {
                for start in 0..=(run.len() - duration) {
                    catalog
                        .nested
                        .entry(duration)
                        .or_default()
                        .push(mean(&run[start..start + duration]));
                }
            }

            rest = &rest[end..];
        }

        catalog
    }

    /// Total number of independent spells.
    pub fn independent_count(&self) -> usize {
        self.independent.values().map(Vec::len).sum()
    }

    /// Total number of nested sub-spells.
    pub fn nested_count(&self) -> usize {
        self.nested.values().map(Vec::len).sum()
    }
}

fn mean(run: &[Real]) -> Real {
    run.iter().sum::<Real>() / run.len() as Real
}
