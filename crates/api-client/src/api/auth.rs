//! Backend authentication

use crate::api::models::AuthBackendResponse;
use crate::client::ApiClient;
use crate::endpoint::Endpoints;
use crate::error::ServiceError;
use tracing::{debug, error};

/// Backend authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch a signing token from the backend and store it.
    ///
    /// Needed once per install: every AI endpoint is signed with this token.
    pub async fn authenticate(&self) -> Result<String, ServiceError> {
        let response: AuthBackendResponse = self
            .client
            .send(&Endpoints::Auth)
            .await
            .map_err(|e| {
                error!(error = %e, "Backend authentication failed");
                ServiceError::Authenticate(e)
            })?;

        self.client
            .token_store()
            .store_token(response.value.clone())
            .await?;
        debug!("Stored backend token");

        Ok(response.value)
    }

    /// Authenticate only if no token is stored yet
    pub async fn ensure_token(&self) -> Result<String, ServiceError> {
        if let Some(token) = self.client.token_store().token().await? {
            return Ok(token);
        }
        self.authenticate().await
    }

    /// Forget the stored token
    pub async fn sign_out(&self) -> Result<(), ServiceError> {
        self.client.token_store().clear_token().await?;
        Ok(())
    }
}
