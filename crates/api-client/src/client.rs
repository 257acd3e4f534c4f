//! Main API client implementation

use crate::api::{AuthApi, ChatApi, ImageApi, VisionApi};
use crate::config::ClientConfig;
use crate::decode::{decode_body, DecodeFailure, ResponseModel};
use crate::endpoint::Endpoint;
use crate::error::{ApiErrorPayload, ConfigError, RequestError, RequestResult};
use crate::request::{compose_url, RequestParams};
use crate::signer::RequestSigner;
use crate::token::{MemoryTokenStore, TokenStore};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use std::any::type_name;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, instrument, warn, Span};
use uuid::Uuid;

/// Typed client for the WrapFast backend.
///
/// Every outbound call goes through [`send_request`](Self::send_request),
/// which turns an [`Endpoint`] into an HTTP request, classifies the response
/// and decodes it. Cloning is cheap and all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    config: Arc<ClientConfig>,
    signer: RequestSigner,
}

impl ApiClient {
    /// Create a new client with configuration from environment
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with an in-memory token store
    pub fn with_config(config: ClientConfig) -> Result<Self, ConfigError> {
        Self::with_token_store(config, Arc::new(MemoryTokenStore::new()))
    }

    /// Create a new client backed by the given token store
    pub fn with_token_store(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static("wrapfast-api-client/1.0"),
        );
        default_headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let inner = Client::builder().default_headers(default_headers).build()?;
        let signer = RequestSigner::new(&config, tokens);

        Ok(Self {
            inner,
            config: Arc::new(config),
            signer,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the token store endpoints are signed with
    #[must_use]
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        self.signer.token_store()
    }

    // -------------------------------------------------------------------------
    // Service API accessors
    // -------------------------------------------------------------------------

    /// Access backend authentication
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access meal vision analysis
    #[must_use]
    pub fn vision(&self) -> VisionApi {
        VisionApi::new(self.clone())
    }

    /// Access chat completion
    #[must_use]
    pub fn chat(&self) -> ChatApi {
        ChatApi::new(self.clone())
    }

    /// Access image generation
    #[must_use]
    pub fn images(&self) -> ImageApi {
        ImageApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Request pipeline
    // -------------------------------------------------------------------------

    /// Send a request with default params (no body, retry on 401 enabled)
    pub async fn send<T, E>(&self, endpoint: &E) -> RequestResult<T>
    where
        T: ResponseModel,
        E: Endpoint + ?Sized,
    {
        self.send_request(endpoint, RequestParams::default()).await
    }

    /// Send a request to `endpoint` and decode the response into `T`.
    ///
    /// A 401 is retried exactly once after the configured delay when
    /// `params.allow_retry` is set. Nothing else is retried.
    #[instrument(
        skip_all,
        fields(
            method = %endpoint.method(),
            path = endpoint.path(),
            target_type = type_name::<T>(),
            request_id
        )
    )]
    pub async fn send_request<T, E>(&self, endpoint: &E, params: RequestParams) -> RequestResult<T>
    where
        T: ResponseModel,
        E: Endpoint + ?Sized,
    {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let url = compose_url(
            endpoint.base_url().unwrap_or(&self.config.base_url),
            endpoint.path(),
            params.path_extension.as_deref(),
            &params.query,
        )?;

        let mut allow_retry = params.allow_retry;
        let mut attempt: u32 = 1;

        loop {
            let start = Instant::now();
            let request = self.build_request(endpoint, url.clone(), &params).await;

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    error!(url = %url, attempt, error = %e, "Unknown error");
                    return Err(RequestError::Unknown);
                }
            };

            let status = response.status();
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    error!(url = %url, status = status.as_u16(), error = %e, "No response");
                    return Err(RequestError::NoResponse);
                }
            };
            let elapsed_ms = start.elapsed().as_millis();

            match status.as_u16() {
                200..=299 => {
                    debug!(status = status.as_u16(), attempt, elapsed_ms, "Server response code");
                    return decode_success(&body, status);
                }
                401 if allow_retry => {
                    warn!(
                        attempt,
                        delay_ms = self.config.retry_delay.as_millis(),
                        "Authentication failed, retrying request"
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                    allow_retry = false;
                    attempt += 1;
                }
                401 => return Err(unauthorized(&body, status)),
                _ => return Err(server_error(&body, status)),
            }
        }
    }

    /// Build a fresh request for one attempt
    async fn build_request<E>(&self, endpoint: &E, url: Url, params: &RequestParams) -> RequestBuilder
    where
        E: Endpoint + ?Sized,
    {
        let method = endpoint.method();
        let mut request = self
            .inner
            .request(method.into(), url)
            .timeout(self.config.request_timeout);

        if let Some(headers) = endpoint.headers(&self.signer).await {
            request = request.headers(to_header_map(&headers));
        }

        if method.sends_json() {
            request = request
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json");
        }

        if let Some(body) = &params.body {
            request = request.body(body.clone());
        } else if let Some(declared) = endpoint.body() {
            match serde_json::to_vec(&declared) {
                Ok(bytes) => request = request.body(bytes),
                Err(e) => warn!(error = %e, "Failed to encode endpoint body, sending none"),
            }
        }

        request
    }
}

/// Convert resolved endpoint headers, dropping any that are not valid HTTP
fn to_header_map(headers: &std::collections::HashMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                map.insert(name, value);
            }
            _ => warn!(header = %name, "Skipping invalid header"),
        }
    }
    map
}

fn decode_success<T: ResponseModel>(body: &[u8], status: StatusCode) -> RequestResult<T> {
    match decode_body::<T>(body, status.as_u16()) {
        Ok(value) => {
            if body.is_empty() {
                debug!("Empty response decoded successfully");
            } else {
                debug!("Response decoded successfully");
            }
            Ok(value)
        }
        Err(failure) => {
            error!(
                target_type = type_name::<T>(),
                reason = %failure,
                "Failed to decode response"
            );
            if matches!(failure, DecodeFailure::Corrupted(_)) {
                debug!(body = %String::from_utf8_lossy(body), "Undecodable response body");
            }
            Err(RequestError::Decode)
        }
    }
}

fn unauthorized(body: &[u8], status: StatusCode) -> RequestError {
    match serde_json::from_slice::<ApiErrorPayload>(body) {
        Ok(payload) => {
            error!(
                title = %payload.title,
                description = %payload.description,
                code = payload.code,
                "Authentication error"
            );
            RequestError::Unauthorized { code: payload.code }
        }
        Err(e) => {
            error!(
                status = status.as_u16(),
                error = %e,
                "Authentication error with undecodable error payload"
            );
            RequestError::Unauthorized {
                code: i64::from(status.as_u16()),
            }
        }
    }
}

fn server_error(body: &[u8], status: StatusCode) -> RequestError {
    match serde_json::from_slice::<ApiErrorPayload>(body) {
        Ok(payload) => {
            error!(
                status = status.as_u16(),
                title = %payload.title,
                description = %payload.description,
                code = payload.code,
                "Server error"
            );
            RequestError::ServerError { code: payload.code }
        }
        Err(_) => {
            error!(status = status.as_u16(), "Server error");
            RequestError::ServerError {
                code: i64::from(status.as_u16()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::with_config(ClientConfig::development());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ClientConfig::default().with_base_url("localhost");
        assert!(matches!(
            ApiClient::with_config(config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_to_header_map_skips_invalid() {
        let mut headers = std::collections::HashMap::new();
        headers.insert("X-Signature".to_string(), "abc".to_string());
        headers.insert("Bad Header".to_string(), "x".to_string());
        headers.insert("X-Newline".to_string(), "a\nb".to_string());

        let map = to_header_map(&headers);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x-signature").unwrap(), "abc");
    }

    #[test]
    fn test_unauthorized_uses_payload_code() {
        let body = br#"{"title":"Unauthorized","description":"bad token","code":4011}"#;
        assert_eq!(
            unauthorized(body, StatusCode::UNAUTHORIZED),
            RequestError::Unauthorized { code: 4011 }
        );
        assert_eq!(
            unauthorized(b"nope", StatusCode::UNAUTHORIZED),
            RequestError::Unauthorized { code: 401 }
        );
    }

    #[test]
    fn test_server_error_falls_back_to_status() {
        let body = br#"{"title":"Boom","description":"quota","code":9001}"#;
        assert_eq!(
            server_error(body, StatusCode::INTERNAL_SERVER_ERROR),
            RequestError::ServerError { code: 9001 }
        );
        assert_eq!(
            server_error(b"", StatusCode::BAD_GATEWAY),
            RequestError::ServerError { code: 502 }
        );
    }
}
