use thiserror::Error;

#[derive(Error, Debug)]
pub enum MortgageError {
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: String,
    },

    #[error("invalid configuration: {message}")]
    Config {
        message: String,
    },

    #[error("render error: {message}")]
    Render {
        message: String,
    },
}

impl MortgageError {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        MortgageError::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// true when the error came from parameter validation
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, MortgageError::InvalidParameter { .. })
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(err: serde_json::Error) -> Self {
        MortgageError::Config {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for MortgageError {
    fn from(err: csv::Error) -> Self {
        MortgageError::Render {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for MortgageError {
    fn from(err: std::io::Error) -> Self {
        MortgageError::Render {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
