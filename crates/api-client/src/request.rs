//! Per-call request inputs and URL composition

use crate::error::RequestError;
use reqwest::Url;
use serde::Serialize;
use tracing::error;

/// Inputs supplied by the caller for a single call
#[derive(Debug, Clone)]
pub struct RequestParams {
    /// Query items appended to the URL
    pub query: Vec<(String, String)>,
    /// Raw body bytes, typically JSON
    pub body: Option<Vec<u8>>,
    /// Suffix appended to the endpoint path as `/{suffix}`
    pub path_extension: Option<String>,
    /// Whether a 401 may be retried once
    pub allow_retry: bool,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            query: Vec::new(),
            body: None,
            path_extension: None,
            allow_retry: true,
        }
    }
}

impl RequestParams {
    /// Params with no body, no query and retry enabled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query item
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach raw body bytes
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach `model` encoded as JSON
    pub fn with_json<B: Serialize + ?Sized>(mut self, model: &B) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(model)?);
        Ok(self)
    }

    /// Append `/{extension}` to the endpoint path
    #[must_use]
    pub fn with_path_extension(mut self, extension: impl Into<String>) -> Self {
        self.path_extension = Some(extension.into());
        self
    }

    /// Surface a 401 immediately instead of retrying once
    #[must_use]
    pub fn without_retry(mut self) -> Self {
        self.allow_retry = false;
        self
    }
}

/// Compose `base + path [+ "/" + extension] [? query]`.
///
/// The extension is appended as path segments only: `?` and `#` inside it are
/// percent-encoded and `.`/`..` segments are rejected.
pub(crate) fn compose_url(
    base_url: &str,
    path: &str,
    path_extension: Option<&str>,
    query: &[(String, String)],
) -> Result<Url, RequestError> {
    let raw = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    let mut url = Url::parse(&raw).map_err(|e| {
        error!(url = %raw, error = %e, "Invalid URL");
        RequestError::InvalidUrl
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        error!(url = %raw, scheme = url.scheme(), "Invalid URL scheme");
        return Err(RequestError::InvalidUrl);
    }

    if let Some(extension) = path_extension {
        let segments: Vec<&str> = extension.trim_start_matches('/').split('/').collect();
        if segments.iter().any(|segment| is_dot_segment(segment)) {
            error!(url = %raw, extension, "Path extension contains a dot segment");
            return Err(RequestError::InvalidUrl);
        }
        url.path_segments_mut()
            .map_err(|()| {
                error!(url = %raw, "URL cannot carry a path extension");
                RequestError::InvalidUrl
            })?
            .pop_if_empty()
            .extend(segments);
    }

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.iter());
    }

    Ok(url)
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().replace("%2e", ".").as_str(),
        "." | ".."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_plain() {
        let url = compose_url("http://localhost:10000/", "vision", None, &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:10000/vision");
    }

    #[test]
    fn test_compose_without_trailing_slash() {
        let url = compose_url("https://api.example.com", "auth", None, &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/auth");
    }

    #[test]
    fn test_compose_extension_and_query() {
        let query = vec![
            ("lang".to_string(), "english".to_string()),
            ("q".to_string(), "a b".to_string()),
        ];
        let url = compose_url("http://localhost:10000/", "chatgpt", Some("stream"), &query).unwrap();
        assert_eq!(url.path(), "/chatgpt/stream");
        assert_eq!(url.query(), Some("lang=english&q=a+b"));
    }

    #[test]
    fn test_compose_multi_segment_extension() {
        let url = compose_url("http://localhost:10000/", "chatgpt", Some("threads/42"), &[]).unwrap();
        assert_eq!(url.path(), "/chatgpt/threads/42");
    }

    #[test]
    fn test_compose_rejects_dot_segments() {
        for extension in ["../auth", "..", "a/./b", "%2e%2E/auth"] {
            assert_eq!(
                compose_url("http://localhost:10000/", "chatgpt", Some(extension), &[]),
                Err(RequestError::InvalidUrl),
                "{extension}"
            );
        }
    }

    #[test]
    fn test_compose_extension_stays_in_path() {
        let query = vec![("a".to_string(), "b".to_string())];
        let url = compose_url("http://localhost:10000/", "chatgpt", Some("x?admin=1#f"), &query)
            .unwrap();
        assert_eq!(url.path(), "/chatgpt/x%3Fadmin=1%23f");
        assert_eq!(url.query(), Some("a=b"));
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_compose_invalid() {
        assert_eq!(
            compose_url("not-a-url", "vision", None, &[]),
            Err(RequestError::InvalidUrl)
        );
        assert_eq!(
            compose_url("http://bad host/", "vision", None, &[]),
            Err(RequestError::InvalidUrl)
        );
        assert_eq!(
            compose_url("ftp://files.example.com/", "vision", None, &[]),
            Err(RequestError::InvalidUrl)
        );
    }

    #[test]
    fn test_params_builder() {
        let params = RequestParams::new()
            .with_query("a", "1")
            .with_path_extension("x")
            .with_body(b"{}".to_vec())
            .without_retry();
        assert_eq!(params.query, vec![("a".to_string(), "1".to_string())]);
        assert_eq!(params.path_extension.as_deref(), Some("x"));
        assert_eq!(params.body.as_deref(), Some(&b"{}"[..]));
        assert!(!params.allow_retry);
        assert!(RequestParams::default().allow_retry);
    }

    #[test]
    fn test_params_with_json() {
        #[derive(Serialize)]
        struct Prompt<'a> {
            prompt: &'a str,
        }
        let params = RequestParams::new().with_json(&Prompt { prompt: "hi" }).unwrap();
        assert_eq!(params.body.unwrap(), br#"{"prompt":"hi"}"#.to_vec());
    }
}
