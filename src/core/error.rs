// error.rs - Error type for pedigree validation and inference

use thiserror::Error;

/// Errors raised by the inference core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// Malformed input detected before enumeration starts
    #[error("Invalid input: {0}")]
    InputValidation(String),
    /// The posterior table cannot be normalized
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl InferenceError {
    pub fn input(msg: impl Into<String>) -> Self {
        InferenceError::InputValidation(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        InferenceError::InvalidState(msg.into())
    }
}

impl From<InferenceError> for String {
    fn from(err: InferenceError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(InferenceError::input("empty").to_string(), "Invalid input: empty");
        assert_eq!(String::from(InferenceError::state("zero mass")), "Invalid state: zero mass");
    }
}
