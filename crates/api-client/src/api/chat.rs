//! Chat completion

use crate::api::models::{ChatRequest, ChatResponse};
use crate::client::ApiClient;
use crate::endpoint::Endpoints;
use crate::error::ServiceError;
use crate::request::RequestParams;
use tracing::error;

/// Chat API interface
#[derive(Clone)]
pub struct ChatApi {
    client: ApiClient,
    endpoint: Endpoints,
}

impl ChatApi {
    /// Create a new chat API interface targeting `chatgpt`
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            endpoint: Endpoints::ChatGpt,
        }
    }

    /// Route prompts through `anthropic-messages` instead
    #[must_use]
    pub fn using_anthropic(mut self) -> Self {
        self.endpoint = Endpoints::AnthropicMessages;
        self
    }

    /// Endpoint prompts are sent to
    #[must_use]
    pub fn endpoint(&self) -> Endpoints {
        self.endpoint
    }

    /// Send a prompt and return the model's reply
    pub async fn send_prompt(&self, request: &ChatRequest) -> Result<ChatResponse, ServiceError> {
        let params = RequestParams::new().with_json(request)?;
        self.client
            .send_request(&self.endpoint, params)
            .await
            .map_err(|e| {
                error!(error = %e, "Error requesting prompt");
                ServiceError::SendPrompt(e)
            })
    }
}
