//! Typed API client for the WrapFast AI backend
//!
//! This crate turns declarative endpoint descriptions into HTTP calls and
//! hands callers either a decoded value or one classified [`RequestError`].
//!
//! # Features
//!
//! - **Endpoint descriptors**: one enum variant per backend operation, each
//!   with its fixed path, method and header signing policy
//! - **Signed requests**: HMAC-SHA256 `X-Signature` headers over the request path
//! - **Classified errors**: transport and decode failures never leak past the client
//! - **Single auth retry**: a 401 is retried exactly once after a fixed delay
//! - **Empty-body decoding**: 2xx responses without a body decode into [`EmptyResponse`]
//!
//! # Example
//!
//! ```rust,no_run
//! use wrapfast_api_client::{ApiClient, ClientConfig};
//! use wrapfast_api_client::api::{ChatRequest, GptLanguage, MealVisionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::with_config(ClientConfig::from_env()?)?;
//!
//!     // Fetch the signing token once
//!     client.auth().authenticate().await?;
//!
//!     let reply = client
//!         .chat()
//!         .send_prompt(&ChatRequest { prompt: "Hello!".into() })
//!         .await?;
//!     println!("{}", reply.message);
//!
//!     let meal = client
//!         .vision()
//!         .analyze_meal(&MealVisionRequest {
//!             image: "<base64>".into(),
//!             language: GptLanguage::English,
//!         })
//!         .await?;
//!     println!("{}: {} kcal", meal.name, meal.total_calories_estimation);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod client;
pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod request;
pub mod signer;
pub mod token;

pub use client::ApiClient;
pub use config::{ClientConfig, Environment};
pub use decode::{EmptyResponse, ResponseModel};
pub use endpoint::{Endpoint, Endpoints, RequestMethod};
pub use error::{ApiErrorPayload, ConfigError, RequestError, RequestResult, ServiceError};
pub use request::RequestParams;
pub use signer::RequestSigner;
pub use token::{MemoryTokenStore, TokenStore};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::api::{AuthApi, ChatApi, ImageApi, VisionApi};
    pub use crate::client::ApiClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::decode::{EmptyResponse, ResponseModel};
    pub use crate::endpoint::{Endpoint, Endpoints, RequestMethod};
    pub use crate::error::{RequestError, RequestResult, ServiceError};
    pub use crate::request::RequestParams;
    pub use crate::token::{MemoryTokenStore, TokenStore};
}
