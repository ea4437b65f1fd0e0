// src/error.rs
use sieve_host::HostError;
use sieve_selector::SelectorError;
use thiserror::Error;

/// The error type for every fallible operation of the public API.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Query failed: {0}")]
    Selector(#[from] SelectorError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document could not be parsed: {0}")]
    Document(String),
}

impl From<HostError> for Error {
    fn from(e: HostError) -> Self {
        Error::Selector(SelectorError::Host(e))
    }
}
