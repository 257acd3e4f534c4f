//! Error types for the API client

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for requests sent through [`ApiClient`](crate::ApiClient)
pub type RequestResult<T> = Result<T, RequestError>;

/// Classified outcome of a failed request.
///
/// This is the only error representation callers of the client ever see:
/// transport and decode errors are logged and folded into one of these kinds.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestError {
    /// The response body could not be decoded into the requested type
    #[error("Decode error")]
    Decode,

    /// The request URL could not be built
    #[error("Invalid URL")]
    InvalidUrl,

    /// No well-formed HTTP response was received
    #[error("No response")]
    NoResponse,

    /// The request was rejected with 401 after the retry was spent
    #[error("Authorization failure. Response code: {code}")]
    Unauthorized {
        /// Code carried by the error payload, or the HTTP status if it had none
        code: i64,
    },

    /// The server answered with a status the client does not handle
    #[error("Unexpected status code")]
    UnexpectedStatusCode,

    /// The device has no network connection
    #[error("There is no network connection")]
    NoNetworkConnection,

    /// The server answered with a non-2xx, non-401 status
    #[error("Server error. Response code: {code}")]
    ServerError {
        /// Code carried by the error payload, or the HTTP status if it had none
        code: i64,
    },

    /// The transport failed before a response arrived
    #[error("Unknown error")]
    Unknown,
}

impl RequestError {
    /// Code attached to this error, if the kind carries one
    #[must_use]
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Unauthorized { code } | Self::ServerError { code } => Some(*code),
            _ => None,
        }
    }

    /// Check if this is an authorization failure
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Error payload returned by the backend on non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorPayload {
    /// Short error title
    pub title: String,
    /// Human-readable description
    pub description: String,
    /// Backend-specific error code
    pub code: i64,
}

/// Configuration and client construction errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration value rejected by validation
    #[error("Configuration error: {0}")]
    Invalid(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The underlying HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ConfigError {
    /// Create a validation error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }
}

/// Errors raised by a [`TokenStore`](crate::token::TokenStore)
#[derive(Error, Debug)]
pub enum TokenStoreError {
    /// The backing store could not be reached
    #[error("Token store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by the typed AI service APIs
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request model could not be encoded as JSON
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// Backend authentication failed
    #[error("Backend authentication failed: {0}")]
    Authenticate(#[source] RequestError),

    /// Meal analysis failed
    #[error("Error analyzing meal: {0}")]
    AnalyzeMeal(#[source] RequestError),

    /// Chat prompt failed
    #[error("Error requesting prompt: {0}")]
    SendPrompt(#[source] RequestError),

    /// Image generation failed
    #[error("Error generating image: {0}")]
    GenerateImage(#[source] RequestError),

    /// The token could not be persisted
    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}

impl ServiceError {
    /// The classified request error behind this failure, if any
    #[must_use]
    pub fn request_error(&self) -> Option<RequestError> {
        match self {
            Self::Authenticate(e)
            | Self::AnalyzeMeal(e)
            | Self::SendPrompt(e)
            | Self::GenerateImage(e) => Some(*e),
            Self::Encode(_) | Self::TokenStore(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RequestError::Unauthorized { code: 7 }.code(), Some(7));
        assert_eq!(RequestError::ServerError { code: 500 }.code(), Some(500));
        assert_eq!(RequestError::Decode.code(), None);
        assert!(RequestError::Unauthorized { code: 401 }.is_unauthorized());
        assert!(!RequestError::ServerError { code: 401 }.is_unauthorized());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(RequestError::InvalidUrl.to_string(), "Invalid URL");
        assert_eq!(
            RequestError::Unauthorized { code: 42 }.to_string(),
            "Authorization failure. Response code: 42"
        );
        assert_eq!(
            RequestError::NoNetworkConnection.to_string(),
            "There is no network connection"
        );
    }

    #[test]
    fn test_api_error_payload_deserialize() {
        let json = r#"{"title": "Unauthorized", "description": "Bad signature", "code": 4011}"#;
        let payload: ApiErrorPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.title, "Unauthorized");
        assert_eq!(payload.code, 4011);
    }

    #[test]
    fn test_service_error_keeps_request_error() {
        let err = ServiceError::SendPrompt(RequestError::ServerError { code: 503 });
        assert_eq!(
            err.request_error(),
            Some(RequestError::ServerError { code: 503 })
        );
        assert!(err.to_string().contains("Error requesting prompt"));
    }
}
