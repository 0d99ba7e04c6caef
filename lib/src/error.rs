use polars::error::PolarsError;
use std::io::Error as IoError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Required table not found, tried ids: {}", .0.join(", "))]
    RequiredTableMissing(Vec<String>),
}
