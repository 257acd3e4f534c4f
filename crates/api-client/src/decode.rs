//! Response body decoding
//!
//! Bodies of 2xx responses are decoded into a caller-chosen [`ResponseModel`].
//! A zero-length body is never handed to `serde_json`: it can only become a
//! type that explicitly knows how to represent "no content".

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use thiserror::Error;

/// A type the client can decode a successful response into.
pub trait ResponseModel: DeserializeOwned + Send + 'static {
    /// Build a value for a 2xx response with an empty body.
    ///
    /// Returns `None` for types that cannot represent an empty response,
    /// in which case the empty body is a decode failure.
    fn from_empty(_status: u16) -> Option<Self> {
        None
    }
}

/// Placeholder for 2xx responses that legitimately carry no body.
///
/// Only constructible from an empty body: deserializing it from any JSON
/// input fails, so a non-empty body never silently decodes into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyResponse {
    /// HTTP status code of the response
    pub status: u16,
}

impl<'de> Deserialize<'de> for EmptyResponse {
    fn deserialize<D>(_deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Err(<D::Error as de::Error>::custom(
            "EmptyResponse can only be built from an empty body",
        ))
    }
}

impl ResponseModel for EmptyResponse {
    fn from_empty(status: u16) -> Option<Self> {
        Some(Self { status })
    }
}

impl ResponseModel for serde_json::Value {}

/// Why a body failed to decode. Logged, never returned to callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeFailure {
    /// A required key was absent
    #[error("missing key: {0}")]
    MissingKey(String),

    /// A value had the wrong type
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A required value was null
    #[error("missing value: {0}")]
    MissingValue(String),

    /// The body is not valid JSON
    #[error("invalid JSON: {0}")]
    Corrupted(String),

    /// The body was empty and the target type cannot represent that
    #[error("cannot build target type from an empty response")]
    EmptyBody,

    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for DecodeFailure {
    fn from(err: serde_json::Error) -> Self {
        let msg = err.to_string();
        match err.classify() {
            Category::Syntax | Category::Eof => Self::Corrupted(msg),
            Category::Data if msg.starts_with("missing field") => Self::MissingKey(msg),
            Category::Data if msg.starts_with("invalid type: null") => Self::MissingValue(msg),
            Category::Data
                if msg.starts_with("invalid type")
                    || msg.starts_with("invalid value")
                    || msg.starts_with("invalid length") =>
            {
                Self::TypeMismatch(msg)
            }
            Category::Data | Category::Io => Self::Other(msg),
        }
    }
}

/// Decode a successful response body.
pub fn decode_body<T: ResponseModel>(body: &[u8], status: u16) -> Result<T, DecodeFailure> {
    if body.is_empty() {
        return T::from_empty(status).ok_or(DecodeFailure::EmptyBody);
    }
    serde_json::from_slice(body).map_err(DecodeFailure::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Meal {
        name: String,
        calories: i64,
    }

    impl ResponseModel for Meal {}

    #[test]
    fn test_decode_object() {
        let meal: Meal = decode_body(br#"{"name":"Salad","calories":300}"#, 200).unwrap();
        assert_eq!(
            meal,
            Meal {
                name: "Salad".into(),
                calories: 300
            }
        );
    }

    #[test]
    fn test_empty_body_into_empty_response() {
        let empty: EmptyResponse = decode_body(b"", 204).unwrap();
        assert_eq!(empty.status, 204);
    }

    #[test]
    fn test_empty_body_into_model_fails() {
        let err = decode_body::<Meal>(b"", 200).unwrap_err();
        assert_eq!(err, DecodeFailure::EmptyBody);
    }

    #[test]
    fn test_non_empty_body_into_empty_response_fails() {
        assert!(decode_body::<EmptyResponse>(br#"{"status":200}"#, 200).is_err());
        assert!(decode_body::<EmptyResponse>(b"{}", 200).is_err());
    }

    #[test]
    fn test_failure_classification() {
        assert!(matches!(
            decode_body::<Meal>(br#"{"name":"Salad"}"#, 200),
            Err(DecodeFailure::MissingKey(_))
        ));
        assert!(matches!(
            decode_body::<Meal>(br#"{"name":"Salad","calories":"lots"}"#, 200),
            Err(DecodeFailure::TypeMismatch(_))
        ));
        assert!(matches!(
            decode_body::<Meal>(br#"{"name":null,"calories":1}"#, 200),
            Err(DecodeFailure::MissingValue(_))
        ));
        assert!(matches!(
            decode_body::<Meal>(b"{not json", 200),
            Err(DecodeFailure::Corrupted(_))
        ));
        assert!(matches!(
            decode_body::<Meal>(br#"{"name":"Salad""#, 200),
            Err(DecodeFailure::Corrupted(_))
        ));
    }

    #[test]
    fn test_json_value_rejects_empty_body() {
        assert!(decode_body::<serde_json::Value>(b"", 200).is_err());
        assert!(decode_body::<serde_json::Value>(b"[1,2]", 200).is_ok());
    }
}
