use sieve_host::HostError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SelectorError {
    #[error("Host query failed: {0}")]
    Host(#[from] HostError),

    #[error("Could not build pseudo-selector pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Pseudo-selector '{pseudo}' has an invalid argument: {message}")]
    Payload { pseudo: String, message: String },
}
