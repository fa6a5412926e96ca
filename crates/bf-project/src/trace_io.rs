//! Flow-trace CSV input.
//!
//! Expected layout: a header row naming at least `year` and `flow`
//! columns, optionally a `demand` column of per-year upstream demand
//! overrides. Lines starting with `#` are comments.

use crate::{ProjectError, ProjectResult};
use bf_core::Real;
use bf_sim::{FlowTrace, TraceYear};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn load_trace(path: &Path) -> ProjectResult<FlowTrace> {
    let file = File::open(path)?;
    read_trace(file)
}

/// Parse a flow trace from CSV text. Missing `year`/`flow` columns and
/// unparsable rows are data errors; the simulation never starts on a
/// malformed trace.
pub fn read_trace<R: Read>(reader: R) -> ProjectResult<FlowTrace> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let year_col = column("year").ok_or_else(|| ProjectError::Data {
        what: "missing required column: year".to_string(),
    })?;
    let flow_col = column("flow").ok_or_else(|| ProjectError::Data {
        what: "missing required column: flow".to_string(),
    })?;
    let demand_col = column("demand");

    let mut years = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let year = parse_field::<i32>(&record, year_col, "year", line)?;
        let inflow = parse_field::<Real>(&record, flow_col, "flow", line)?;
        let demand = match demand_col {
            Some(col) if !record.get(col).unwrap_or("").is_empty() => {
                Some(parse_field::<Real>(&record, col, "demand", line)?)
            }
            _ => None,
        };
        years.push(TraceYear {
            year,
            inflow,
            demand,
        });
    }

    FlowTrace::new(years).map_err(|e| ProjectError::Data {
        what: e.to_string(),
    })
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    col: usize,
    name: &str,
    line: usize,
) -> ProjectResult<T> {
    let raw = record.get(col).ok_or_else(|| ProjectError::Data {
        what: format!("row {}: missing {name} value", line + 1),
    })?;
    raw.parse().map_err(|_| ProjectError::Data {
        what: format!("row {}: cannot parse {name} from {raw:?}", line + 1),
    })
}
