//! Year-table CSV emission and column extraction.

use crate::{ResultsError, ResultsResult};
use bf_core::Real;
use bf_sim::YearRecord;
use std::io::{Read, Write};

/// Column order of the emitted year table.
pub const COLUMNS: &[&str] = &[
    "year",
    "inflow",
    "start_contents",
    "trigger_cutback",
    "upstream_demand",
    "evaporation",
    "net_available",
    "spill",
    "curtailment",
    "end_contents",
    "beneficial_use",
    "consumptive_use",
    "window_flow_sum",
    "compliance_deficit",
    "compliance_flow",
    "years_since_reset",
    "evap_trials",
];

/// Write one CSV row per simulated year, in [`COLUMNS`] order. Absent
/// optional values are left empty.
pub fn write_timeseries<W: Write>(mut w: W, records: &[YearRecord]) -> ResultsResult<()> {
    writeln!(w, "{}", COLUMNS.join(","))?;
    for r in records {
        let trigger = r.trigger_cutback.map(fmt_value).unwrap_or_default();
        let since = r
            .years_since_reset
            .map(|v| v.to_string())
            .unwrap_or_default();
        writeln!(
            w,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            r.year,
            fmt_value(r.inflow),
            fmt_value(r.start_contents),
            trigger,
            fmt_value(r.upstream_demand),
            fmt_value(r.evaporation),
            fmt_value(r.net_available),
            fmt_value(r.spill),
            fmt_value(r.curtailment),
            fmt_value(r.end_contents),
            fmt_value(r.beneficial_use),
            fmt_value(r.consumptive_use),
            fmt_value(r.window_flow_sum),
            fmt_value(r.compliance_deficit),
            fmt_value(r.compliance_flow),
            since,
            r.evap_trials,
        )?;
    }
    Ok(())
}

fn fmt_value(v: Real) -> String {
    // Volumes are whole acre-feet in practice; print them without a
    // trailing fraction when so
    if v == v.trunc() && v.abs() < 1.0e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Pull one named column out of an emitted year table (or any CSV with a
/// header row). Empty cells read as zero so event columns with absent
/// optional values stay usable as spell input.
pub fn read_column<R: Read>(reader: R, column: &str) -> ResultsResult<Vec<Real>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(column))
        .ok_or_else(|| ResultsError::ColumnNotFound {
            column: column.to_string(),
        })?;

    let mut values = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let raw = record.get(idx).unwrap_or("");
        if raw.is_empty() {
            values.push(0.0);
        } else {
            values.push(raw.parse::<Real>().map_err(|_| ResultsError::Data {
                what: format!("cannot parse {raw:?} in column {column}"),
            })?);
        }
    }
    Ok(values)
}
