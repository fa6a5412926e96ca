use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Project(#[from] bf_project::ProjectError),

    #[error(transparent)]
    Sim(#[from] bf_sim::SimError),

    #[error(transparent)]
    Results(#[from] bf_results::ResultsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
