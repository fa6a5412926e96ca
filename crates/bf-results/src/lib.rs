//! bf-results: run storage, table emission, and summary statistics.

pub mod hash;
pub mod store;
pub mod summary;
pub mod table;

pub use hash::compute_run_id;
pub use store::{RunManifest, RunStore};
pub use summary::{
    DEFAULT_QUANTILES, quantile, write_interval_summary, write_percentiles, write_spell_map,
    write_spell_percentiles,
};
pub use table::{read_column, write_timeseries};

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("Table data error: {what}")]
    Data { what: String },
}
