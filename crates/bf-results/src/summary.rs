//! Percentile tables and spell/interval summaries.

use crate::ResultsResult;
use bf_core::Real;
use bf_spells::{IntervalStats, IntervalSummary, SpellMap};
use std::io::Write;

/// Default reporting quantiles, in percent.
pub const DEFAULT_QUANTILES: &[Real] = &[10.0, 25.0, 50.0, 75.0, 90.0];

/// Linear-interpolated quantile of an unsorted sample, `q` in percent.
/// Panics on an empty sample; callers guard.
pub fn quantile(values: &[Real], q: Real) -> Real {
    assert!(!values.is_empty(), "quantile of empty sample");
    let mut sorted = values.to_vec();
    sorted.sort_by(Real::total_cmp);
    let position = q / 100.0 * (sorted.len() - 1) as Real;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    if below == above {
        sorted[below]
    } else {
        let fraction = position - below as Real;
        sorted[below] + fraction * (sorted[above] - sorted[below])
    }
}

/// Write one row per labelled series: the requested quantiles plus max,
/// min, and mean. Empty series are skipped.
pub fn write_percentiles<W: Write>(
    mut w: W,
    series: &[(String, Vec<Real>)],
    quantiles: &[Real],
) -> ResultsResult<()> {
    let header: Vec<String> = quantiles.iter().map(|q| format!("{q}")).collect();
    writeln!(w, "series,{},Max,Min,Mean", header.join(","))?;

    for (label, values) in series {
        if values.is_empty() {
            continue;
        }
        let cells: Vec<String> = quantiles
            .iter()
            .map(|&q| format!("{}", quantile(values, q)))
            .collect();
        let max = values.iter().cloned().fold(Real::MIN, Real::max);
        let min = values.iter().cloned().fold(Real::MAX, Real::min);
        let mean = values.iter().sum::<Real>() / values.len() as Real;
        writeln!(w, "{label},{},{max},{min},{mean}", cells.join(","))?;
    }
    Ok(())
}

/// Write a spell catalog, one duration per line with its magnitude list.
pub fn write_spell_map<W: Write>(
    mut w: W,
    map: &SpellMap,
    title: Option<&str>,
) -> ResultsResult<()> {
    if let Some(title) = title {
        writeln!(w, "{title}")?;
    }
    writeln!(w, "Duration")?;
    for (duration, values) in map {
        let cells: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
        writeln!(w, "{duration}, {}", cells.join(","))?;
    }
    Ok(())
}

/// Percentile table over each spell duration's magnitude sample.
pub fn write_spell_percentiles<W: Write>(
    mut w: W,
    map: &SpellMap,
    quantiles: &[Real],
    title: Option<&str>,
) -> ResultsResult<()> {
    if let Some(title) = title {
        writeln!(w, "{title}")?;
    }
    let series: Vec<(String, Vec<Real>)> = map
        .iter()
        .map(|(duration, values)| (duration.to_string(), values.clone()))
        .collect();
    write_percentiles(w, &series, quantiles)
}

/// Interval summary lines for the curtailments report; `--` marks an
/// empty sample.
pub fn write_interval_summary<W: Write>(mut w: W, summary: &IntervalSummary) -> ResultsResult<()> {
    writeln!(w, "Curtailment intervals from spill/curtailment")?;
    write_interval_line(&mut w, "Spill", &summary.spill_intervals)?;
    write_interval_line(&mut w, "Curt.", &summary.curtailment_intervals)?;
    Ok(())
}

fn write_interval_line<W: Write>(w: &mut W, label: &str, intervals: &[u32]) -> ResultsResult<()> {
    match IntervalStats::from_intervals(intervals) {
        Some(stats) => writeln!(
            w,
            "{label}: Max:,{}, Min:,{}, Mean:,{:.2}",
            stats.max, stats.min, stats.mean
        )?,
        None => writeln!(w, "{label}: Max:,--, Min:,--, Mean:,--")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_spells::SpellCatalog;

    #[test]
    fn quantile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&values, 0.0), 1.0);
        assert_eq!(quantile(&values, 50.0), 3.0);
        assert_eq!(quantile(&values, 100.0), 5.0);
        assert_eq!(quantile(&values, 25.0), 2.0);
        // Between order statistics
        assert_eq!(quantile(&[1.0, 2.0], 50.0), 1.5);
    }

    #[test]
    fn quantile_sorts_its_input() {
        assert_eq!(quantile(&[5.0, 1.0, 3.0], 50.0), 3.0);
    }

    #[test]
    fn percentile_rows_include_extremes_and_mean() {
        let series = vec![("curtailment".to_string(), vec![2.0, 4.0, 6.0, 8.0])];
        let mut out = Vec::new();
        write_percentiles(&mut out, &series, DEFAULT_QUANTILES).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("series,10,25,50,75,90,Max,Min,Mean"));
        assert!(text.contains("curtailment,"));
        assert!(text.trim_end().ends_with(",8,2,5"));
    }

    #[test]
    fn spell_map_lines_carry_duration_and_values() {
        let catalog = SpellCatalog::from_series(&[0.0, 1.0, 3.0, 0.0, 2.0]);
        let mut out = Vec::new();
        write_spell_map(&mut out, &catalog.independent, Some("independent spells")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("independent spells\nDuration\n"));
        assert!(text.contains("1, 2\n"));
        assert!(text.contains("2, 2\n"));
    }

    #[test]
    fn interval_lines_mark_empty_samples() {
        let summary = IntervalSummary::default();
        let mut out = Vec::new();
        write_interval_summary(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Spill: Max:,--"));
        assert!(text.contains("Curt.: Max:,--"));
    }
}
