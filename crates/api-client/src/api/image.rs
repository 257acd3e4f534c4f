//! Image generation

use crate::api::models::{ImageRequest, ImageResponse};
use crate::client::ApiClient;
use crate::endpoint::Endpoints;
use crate::error::ServiceError;
use crate::request::RequestParams;
use tracing::error;

/// Image generation API interface
#[derive(Clone)]
pub struct ImageApi {
    client: ApiClient,
}

impl ImageApi {
    /// Create a new image API interface
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Generate an image from a prompt
    pub async fn generate(&self, request: &ImageRequest) -> Result<ImageResponse, ServiceError> {
        let params = RequestParams::new().with_json(request)?;
        self.client
            .send_request(&Endpoints::Dalle, params)
            .await
            .map_err(|e| {
                error!(error = %e, "Error generating image");
                ServiceError::GenerateImage(e)
            })
    }
}
