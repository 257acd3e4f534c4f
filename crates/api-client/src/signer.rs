//! Header signing policies for backend endpoints

use crate::config::ClientConfig;
use crate::token::TokenStore;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Header carrying the hex HMAC-SHA256 of the request path
pub const X_SIGNATURE: &str = "X-Signature";

/// Header identifying the calling app to the backend
pub const X_APP_IDENTIFIER: &str = "X-App-Identifier";

/// Produces the authentication headers endpoints attach to their requests.
///
/// Signing never aborts a request: a missing token or a signing failure
/// yields a weaker header set and the backend answers 401.
#[derive(Clone)]
pub struct RequestSigner {
    auth_key: String,
    app_identifier: String,
    tokens: Arc<dyn TokenStore>,
}

impl RequestSigner {
    /// Create a signer from the client configuration and a token store
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            auth_key: config.auth_key.clone(),
            app_identifier: config.app_identifier.clone(),
            tokens,
        }
    }

    /// The token store backing [`token_signed`](Self::token_signed)
    #[must_use]
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Sign `path` with the shared auth secret
    #[must_use]
    pub fn secret_signed(&self, path: &str) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if let Some(signature) = sign(&self.auth_key, path) {
            headers.insert(X_SIGNATURE.to_string(), signature);
        }
        headers
    }

    /// Sign `path` with the stored bearer token and add the app identifier
    pub async fn token_signed(&self, path: &str) -> HashMap<String, String> {
        let token = match self.tokens.token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!(path, "No stored token, signing with an empty key");
                String::new()
            }
            Err(e) => {
                warn!(path, error = %e, "Token lookup failed, signing with an empty key");
                String::new()
            }
        };

        let mut headers = HashMap::new();
        if let Some(signature) = sign(&token, path) {
            headers.insert(X_SIGNATURE.to_string(), signature);
        }
        headers.insert(X_APP_IDENTIFIER.to_string(), self.app_identifier.clone());
        headers
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("app_identifier", &self.app_identifier)
            .finish_non_exhaustive()
    }
}

fn sign(key: &str, path: &str) -> Option<String> {
    match wrapfast_crypto::sign_path(key, path) {
        Ok(signature) => Some(signature),
        Err(e) => {
            warn!(path, error = %e, "Failed to sign request path");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenStoreError;
    use crate::token::MemoryTokenStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl TokenStore for BrokenStore {
        async fn token(&self) -> Result<Option<String>, TokenStoreError> {
            Err(TokenStoreError::Unavailable("locked".into()))
        }
        async fn store_token(&self, _token: String) -> Result<(), TokenStoreError> {
            Err(TokenStoreError::Unavailable("locked".into()))
        }
        async fn clear_token(&self) -> Result<(), TokenStoreError> {
            Ok(())
        }
    }

    fn signer(tokens: Arc<dyn TokenStore>) -> RequestSigner {
        let config = ClientConfig::default()
            .with_auth_key("shared-secret")
            .with_app_identifier("myapp");
        RequestSigner::new(&config, tokens)
    }

    #[test]
    fn test_secret_signed() {
        let headers = signer(Arc::new(MemoryTokenStore::new())).secret_signed("auth");
        assert_eq!(
            headers.get(X_SIGNATURE).unwrap(),
            &wrapfast_crypto::hmac_sha256(b"shared-secret", b"/auth").unwrap()
        );
        assert!(!headers.contains_key(X_APP_IDENTIFIER));
    }

    #[tokio::test]
    async fn test_token_signed() {
        let headers = signer(Arc::new(MemoryTokenStore::with_token("tok")))
            .token_signed("vision")
            .await;
        assert_eq!(
            headers.get(X_SIGNATURE).unwrap(),
            &wrapfast_crypto::hmac_sha256(b"tok", b"/vision").unwrap()
        );
        assert_eq!(headers.get(X_APP_IDENTIFIER).unwrap(), "myapp");
    }

    #[tokio::test]
    async fn test_token_lookup_failure_degrades() {
        let headers = signer(Arc::new(BrokenStore)).token_signed("chatgpt").await;
        assert_eq!(
            headers.get(X_SIGNATURE).unwrap(),
            &wrapfast_crypto::hmac_sha256(b"", b"/chatgpt").unwrap()
        );
        assert_eq!(headers.get(X_APP_IDENTIFIER).unwrap(), "myapp");
    }
}
