//! Storage for the bearer token issued by the backend's `auth` endpoint

use crate::error::TokenStoreError;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Asynchronous store for the backend token.
///
/// The token is the HMAC key for every AI endpoint request. Implement this
/// over whatever secret storage the host platform offers.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    async fn token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Replace the stored token
    async fn store_token(&self, token: String) -> Result<(), TokenStoreError>;

    /// Remove the stored token
    async fn clear_token(&self) -> Result<(), TokenStoreError>;
}

/// In-process token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.token.read().await.clone())
    }

    async fn store_token(&self, token: String) -> Result<(), TokenStoreError> {
        *self.token.write().await = Some(token);
        Ok(())
    }

    async fn clear_token(&self) -> Result<(), TokenStoreError> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_lifecycle() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.token().await.unwrap(), None);

        store.store_token("abc".to_string()).await.unwrap();
        assert_eq!(store.token().await.unwrap().as_deref(), Some("abc"));

        store.clear_token().await.unwrap();
        assert_eq!(store.token().await.unwrap(), None);
    }

    #[test]
    fn test_with_token() {
        let store = MemoryTokenStore::with_token("seed");
        let token = tokio_test::block_on(store.token()).unwrap();
        assert_eq!(token.as_deref(), Some("seed"));
    }
}
