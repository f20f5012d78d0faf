use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a `422 Unprocessable Entity` response.
///
/// `errors` keeps the server's field order so "the first field error" is
/// well defined.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: IndexMap<String, Vec<String>>,
}

impl ValidationErrorBody {
    /// The one message to show: the first non-empty field error, otherwise
    /// the top-level message. `None` when the server sent neither.
    pub fn first_message(&self) -> Option<&str> {
        self.errors
            .values()
            .flat_map(|messages| messages.iter())
            .map(|message| message.trim())
            .find(|message| !message.is_empty())
            .or_else(|| {
                let message = self.message.trim();
                (!message.is_empty()).then_some(message)
            })
    }
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("validation failed: {}", .0.first_message().unwrap_or("invalid request"))]
    Validation(ValidationErrorBody),

    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Message for the user when this is a validation failure.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation(body) => body.first_message(),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Worth retrying later: connection problems and 5xx responses.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
