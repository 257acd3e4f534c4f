//! Typed service APIs for the backend's AI endpoints
//!
//! | Module | Endpoint(s) | Description |
//! |--------|-------------|-------------|
//! | `auth` | `auth` | Fetch and store the signing token |
//! | `vision` | `vision`, `anthropic-messages` | Meal photo analysis |
//! | `chat` | `chatgpt`, `anthropic-messages` | Chat completion |
//! | `image` | `dalle` | Image generation |

pub mod auth;
pub mod chat;
pub mod image;
pub mod models;
pub mod vision;

pub use auth::AuthApi;
pub use chat::ChatApi;
pub use image::ImageApi;
pub use models::{
    AuthBackendResponse, ChatRequest, ChatResponse, GptLanguage, ImageRequest, ImageResponse,
    MealVisionRequest, MealVisionResponse,
};
pub use vision::VisionApi;
