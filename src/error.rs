//! Error types shared by the calculators and the data-provider layer

use thiserror::Error;

/// Errors raised by the pension engine
#[derive(Debug, Error)]
pub enum PensionError {
    /// Caller supplied an out-of-range or unrecognized input
    #[error("validation error: {0}")]
    Validation(String),

    /// No scale bracket, profile or account set matches the request
    #[error("not found: {0}")]
    NotFound(String),

    /// Reference or account data from a provider is malformed
    #[error("invalid data: {0}")]
    Data(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Coarse error classification for callers that map errors to exit codes or statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Data,
}

impl PensionError {
    pub fn validation(message: impl Into<String>) -> Self {
        PensionError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        PensionError::NotFound(message.into())
    }

    pub fn data(message: impl Into<String>) -> Self {
        PensionError::Data(message.into())
    }

    /// Classify the error. Loader failures (I/O, CSV, JSON) count as data errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PensionError::Validation(_) => ErrorKind::Validation,
            PensionError::NotFound(_) => ErrorKind::NotFound,
            PensionError::Data(_)
            | PensionError::Io(_)
            | PensionError::Csv(_)
            | PensionError::Json(_) => ErrorKind::Data,
        }
    }
}

pub type Result<T> = std::result::Result<T, PensionError>;

/// Check that an income is a strictly positive, finite amount
pub fn validate_income(income: f64) -> Result<()> {
    if !income.is_finite() || income <= 0.0 {
        return Err(PensionError::validation(format!(
            "income must be greater than zero, got {}",
            income
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(PensionError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(PensionError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(PensionError::data("x").kind(), ErrorKind::Data);

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        assert_eq!(PensionError::from(io).kind(), ErrorKind::Data);
    }

    #[test]
    fn test_validate_income() {
        assert!(validate_income(50_000.0).is_ok());
        assert!(validate_income(0.01).is_ok());
        assert!(matches!(validate_income(0.0), Err(PensionError::Validation(_))));
        assert!(matches!(validate_income(-1.0), Err(PensionError::Validation(_))));
        assert!(matches!(validate_income(f64::NAN), Err(PensionError::Validation(_))));
    }
}
