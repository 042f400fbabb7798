use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum PayablesError {
    #[error("invalid principal: {amount}")]
    InvalidPrincipal { amount: Money },

    #[error("invalid term: {periods} periods")]
    InvalidTerm { periods: u32 },

    #[error("invalid periodic rate: {rate}")]
    InvalidRate { rate: Rate },

    #[error("code already in use: {code}")]
    CodeConflict { code: String },

    #[error("code series exhausted: prefix {prefix} has no room at width {width}")]
    CodeSeriesExhausted { prefix: String, width: usize },

    #[error("store error: {message}")]
    Store { message: String },

    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    #[error("row decode error: {message}")]
    RowDecode { message: String },
}

impl PayablesError {
    /// whether retrying the same operation can succeed; a code conflict
    /// means another writer took the code between read and insert
    pub fn is_retryable(&self) -> bool {
        matches!(self, PayablesError::CodeConflict { .. })
    }
}

impl From<serde_json::Error> for PayablesError {
    fn from(err: serde_json::Error) -> Self {
        PayablesError::RowDecode {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PayablesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_is_retryable() {
        let err = PayablesError::CodeConflict {
            code: "CLI-008".to_string(),
        };
        assert!(err.is_retryable());

        let err = PayablesError::CodeSeriesExhausted {
            prefix: "CLI-".to_string(),
            width: 3,
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_messages() {
        let err = PayablesError::CodeConflict {
            code: "FAC-2024-0048".to_string(),
        };
        assert_eq!(err.to_string(), "code already in use: FAC-2024-0048");

        let err = PayablesError::MissingField { field: "start_date" };
        assert_eq!(err.to_string(), "missing field: start_date");
    }
}
