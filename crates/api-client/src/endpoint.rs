//! Endpoint descriptors
//!
//! An [`Endpoint`] declares everything needed to build a request for one
//! remote operation except the per-call inputs (body bytes, path suffix and
//! query items), which travel in [`RequestParams`](crate::RequestParams).

use crate::signer::RequestSigner;
use async_trait::async_trait;
use reqwest::Method;
use std::collections::HashMap;
use std::fmt;

/// HTTP methods used by backend endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    /// `DELETE`
    Delete,
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
}

impl RequestMethod {
    /// Wire name of the method
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "DELETE",
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }

    /// Whether requests with this method carry a JSON body
    #[must_use]
    pub fn sends_json(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RequestMethod> for Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Delete => Method::DELETE,
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
        }
    }
}

/// Description of one logical remote operation
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Base URL override. `None` uses the client's configured base URL.
    fn base_url(&self) -> Option<&str> {
        None
    }

    /// Path relative to the base URL
    fn path(&self) -> &str;

    /// HTTP method
    fn method(&self) -> RequestMethod;

    /// Headers to attach, resolved right before the request is built
    async fn headers(&self, signer: &RequestSigner) -> Option<HashMap<String, String>>;

    /// Declarative body, sent JSON-encoded when the caller supplies no raw body
    fn body(&self) -> Option<HashMap<String, String>> {
        None
    }
}

/// Operations exposed by the WrapFast backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoints {
    /// Exchange the shared secret for a bearer token
    Auth,
    /// Meal photo analysis
    Vision,
    /// Chat completion via OpenAI
    ChatGpt,
    /// Image generation
    Dalle,
    /// Chat completion via Anthropic
    AnthropicMessages,
}

impl Endpoints {
    /// Every known endpoint
    pub const ALL: [Self; 5] = [
        Self::Auth,
        Self::Vision,
        Self::ChatGpt,
        Self::Dalle,
        Self::AnthropicMessages,
    ];
}

#[async_trait]
impl Endpoint for Endpoints {
    fn path(&self) -> &str {
        match self {
            Self::Auth => "auth",
            Self::Vision => "vision",
            Self::ChatGpt => "chatgpt",
            Self::Dalle => "dalle",
            Self::AnthropicMessages => "anthropic-messages",
        }
    }

    fn method(&self) -> RequestMethod {
        match self {
            Self::Auth => RequestMethod::Get,
            Self::Vision | Self::ChatGpt | Self::Dalle | Self::AnthropicMessages => {
                RequestMethod::Post
            }
        }
    }

    // `auth` is signed with the shared secret; the backend answers with the
    // token every other endpoint is signed with.
    async fn headers(&self, signer: &RequestSigner) -> Option<HashMap<String, String>> {
        match self {
            Self::Auth => Some(signer.secret_signed(self.path())),
            Self::Vision | Self::ChatGpt | Self::Dalle | Self::AnthropicMessages => {
                Some(signer.token_signed(self.path()).await)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::signer::{X_APP_IDENTIFIER, X_SIGNATURE};
    use crate::token::MemoryTokenStore;
    use std::sync::Arc;

    #[test]
    fn test_paths_and_methods() {
        assert_eq!(Endpoints::Auth.path(), "auth");
        assert_eq!(Endpoints::AnthropicMessages.path(), "anthropic-messages");
        assert_eq!(Endpoints::Auth.method(), RequestMethod::Get);
        for endpoint in &Endpoints::ALL[1..] {
            assert_eq!(endpoint.method(), RequestMethod::Post);
        }
    }

    #[test]
    fn test_defaults() {
        for endpoint in Endpoints::ALL {
            assert!(endpoint.base_url().is_none());
            assert!(endpoint.body().is_none());
        }
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(Method::from(RequestMethod::Put), Method::PUT);
        assert_eq!(RequestMethod::Delete.to_string(), "DELETE");
        assert!(RequestMethod::Post.sends_json());
        assert!(!RequestMethod::Get.sends_json());
    }

    #[tokio::test]
    async fn test_header_policies() {
        let config = ClientConfig::default().with_auth_key("secret");
        let signer = RequestSigner::new(&config, Arc::new(MemoryTokenStore::with_token("tok")));

        let auth = Endpoints::Auth.headers(&signer).await.unwrap();
        assert_eq!(auth.len(), 1);
        assert!(auth.contains_key(X_SIGNATURE));

        let dalle = Endpoints::Dalle.headers(&signer).await.unwrap();
        assert_eq!(dalle.get(X_APP_IDENTIFIER).unwrap(), "wrapfast");
        assert_ne!(auth.get(X_SIGNATURE), dalle.get(X_SIGNATURE));
    }
}
