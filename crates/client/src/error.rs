//! Client error taxonomy.

use hrdesk_core::DomainError;

/// Failure of any API call.
///
/// `SessionExpired` is reserved for HTTP 401 so callers can tell "sign in
/// again" apart from every other failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("session expired; please sign in again")]
    SessionExpired,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("invalid request: {0}")]
    Validation(#[from] DomainError),

    #[error("invalid API base URL: {0}")]
    BaseUrl(String),
}

impl ApiError {
    pub const GENERIC_MESSAGE: &'static str = "An error occurred";

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    /// Message suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Validation(DomainError::Validation(msg)) => msg.clone(),
            ApiError::Network(_) => "Unable to reach the server".to_string(),
            other => other.to_string(),
        }
    }
}
