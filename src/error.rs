use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::client::{ApiError, error_message};

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Failures reported back to the console user.
///
/// Absorbed per-employee fetch failures during aggregation never become a
/// `ConsoleError`; they are only logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    /// Local precondition failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The backend call failed or was rejected. `message` has already been
    /// through the extraction chain.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },

    /// The same action is still waiting on its previous request.
    #[error("{action} is already in progress")]
    Busy { action: &'static str },
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation(message.into())
    }

    /// Build a transport error with the user-facing text taken from `err`.
    pub fn transport(err: &ApiError, default: &str) -> Self {
        ConsoleError::Transport {
            status: err.status(),
            message: error_message(err, default),
        }
    }
}

impl ResponseError for ConsoleError {
    fn status_code(&self) -> StatusCode {
        match self {
            ConsoleError::Validation(_) => StatusCode::BAD_REQUEST,
            ConsoleError::Busy { .. } => StatusCode::CONFLICT,
            ConsoleError::Transport { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
