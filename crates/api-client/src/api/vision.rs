//! Meal photo analysis

use crate::api::models::{MealVisionRequest, MealVisionResponse};
use crate::client::ApiClient;
use crate::endpoint::Endpoints;
use crate::error::ServiceError;
use crate::request::RequestParams;
use tracing::error;

/// Vision API interface
#[derive(Clone)]
pub struct VisionApi {
    client: ApiClient,
    endpoint: Endpoints,
}

impl VisionApi {
    /// Create a new vision API interface targeting `vision`
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            endpoint: Endpoints::Vision,
        }
    }

    /// Route requests through `anthropic-messages` instead
    #[must_use]
    pub fn using_anthropic(mut self) -> Self {
        self.endpoint = Endpoints::AnthropicMessages;
        self
    }

    /// Endpoint requests are sent to
    #[must_use]
    pub fn endpoint(&self) -> Endpoints {
        self.endpoint
    }

    /// Ask the backend to analyse a meal photo
    pub async fn analyze_meal(
        &self,
        request: &MealVisionRequest,
    ) -> Result<MealVisionResponse, ServiceError> {
        let params = RequestParams::new().with_json(request)?;
        self.client
            .send_request(&self.endpoint, params)
            .await
            .map_err(|e| {
                error!(error = %e, "Error analyzing meal");
                ServiceError::AnalyzeMeal(e)
            })
    }
}
