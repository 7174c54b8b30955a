use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body the summarizer service sends alongside non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("service rejected request with status {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed service response: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected {
            status,
            message: message.filter(|message| !message.trim().is_empty()),
        }
    }

    /// Message the server supplied, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected { message, .. } => message.as_deref(),
            ServiceError::Transport(_) | ServiceError::Decode(_) => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
