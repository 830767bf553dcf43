use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid stream id: {0}")]
    InvalidStreamId(String),
}

#[cfg(feature = "python")]
impl From<StreamError> for pyo3::PyErr {
    fn from(err: StreamError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyRuntimeError, PyValueError};
        match err {
            StreamError::InvalidStreamId(_) => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}
