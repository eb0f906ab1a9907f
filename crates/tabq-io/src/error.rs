use thiserror::Error;

/// Result type local to tabq-io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] tabq_core::Error),

    #[error("{path}: {source}")]
    Path {
        path: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the file path the error came from.
    pub fn at(self, path: impl Into<String>) -> Self {
        Error::Path {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
