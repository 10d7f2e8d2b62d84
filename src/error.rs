use thiserror::Error;

/// Errors produced by the loan calculator.
///
/// There is exactly one failure class: a parameter that is missing,
/// non-numeric or outside its domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl CalcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
