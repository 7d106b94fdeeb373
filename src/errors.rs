use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("invalid argument: {message}")]
    InvalidArgument {
        message: String,
    },

    #[error("insufficient offers from lenders: requested {requested}, available {available}")]
    InsufficientLenders {
        requested: u64,
        available: u64,
    },

    #[error("rate estimation did not converge after {iterations} iterations (residual {residual:.2e})")]
    NumericDivergence {
        iterations: u32,
        residual: f64,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invariant violated: {message}")]
    InvariantViolation {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("{message}")]
    InvalidParameter {
        message: String,
    },
}

impl QuoteError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        QuoteError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn calculation(message: impl Into<String>) -> Self {
        QuoteError::CalculationError {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        QuoteError::InvalidParameter {
            message: message.into(),
        }
    }

    /// true for conditions the user can fix by changing the request
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuoteError::InsufficientLenders { .. } | QuoteError::InvalidParameter { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
