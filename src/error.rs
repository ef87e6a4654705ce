use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeuronError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Backend error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    BackendError { status: u16, detail: Option<String> },
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("session rejected"))]
    Unauthorized(Option<String>),
    #[error("No admin session")]
    Unauthenticated,
    #[error("Payment gateway error: {0}")]
    GatewayError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl NeuronError {
    /// True for an HTTP 401 from the backend.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NeuronError::Unauthorized(_))
    }

    /// The backend's `detail` message when one was returned, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            NeuronError::BackendError {
                detail: Some(detail),
                ..
            }
            | NeuronError::Unauthorized(Some(detail)) => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NeuronError>;
