//! CLI commands

pub mod auth;
pub mod chat;
pub mod image;
pub mod vision;

use crate::OutputFormat;
use anyhow::{Context as _, Result};
use std::sync::Arc;
use tracing::debug;
use wrapfast_api_client::{ApiClient, ClientConfig, MemoryTokenStore};

/// State shared by every command: one client for the whole invocation
pub struct Context {
    pub client: ApiClient,
    pub format: OutputFormat,
    has_token: bool,
}

impl Context {
    /// Build the client from environment configuration, applying CLI overrides
    pub fn new(base_url: Option<&str>, token: Option<String>, format: OutputFormat) -> Result<Self> {
        let config = ClientConfig::from_env_with_base_url(base_url)
            .context("Invalid client configuration")?;

        let has_token = token.is_some();
        let tokens = match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        };

        let client = ApiClient::with_token_store(config, Arc::new(tokens))
            .context("Failed to create API client")?;
        debug!(base_url = client.base_url(), "Client ready");

        Ok(Self {
            client,
            format,
            has_token,
        })
    }

    /// Fetch a token from the backend unless one was supplied
    pub async fn ensure_authenticated(&self) -> Result<()> {
        if self.has_token {
            return Ok(());
        }
        self.client.auth().ensure_token().await?;
        Ok(())
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
