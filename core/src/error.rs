use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Table '{table}' has no rows")]
    EmptyTable { table: String },

    #[error("Invalid report config: {reason}")]
    ConfigInvalid { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PulseResult<T> = Result<T, PulseError>;
