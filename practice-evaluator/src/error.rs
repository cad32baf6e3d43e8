use thiserror::Error;

/// Error types for answer evaluation
#[derive(Error, Debug)]
pub enum EvaluatorError {
    /// Invalid request parameters (HTTP 400/422)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Evaluation service rejected or failed the call (other non-2xx statuses)
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Network or connection error
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// The evaluation did not finish within the allotted time
    #[error("Evaluation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Malformed response body
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Generic error for unexpected cases
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EvaluatorError {
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn api_error(status: u16, message: String) -> Self {
        Self::Api { status, message }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
