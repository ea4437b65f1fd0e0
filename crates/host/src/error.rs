use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

impl HostError {
    pub fn invalid(selector: &str, reason: impl Into<String>) -> Self {
        HostError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
