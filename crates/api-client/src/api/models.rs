//! Request and response models exchanged with the backend

use crate::decode::ResponseModel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token issued by the `auth` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthBackendResponse {
    /// Secret used to sign subsequent requests
    pub value: String,
}

impl ResponseModel for AuthBackendResponse {}

/// Meal photo sent for analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealVisionRequest {
    /// Base64-encoded image
    pub image: String,
    /// Language the meal name should be returned in
    pub language: GptLanguage,
}

/// Nutrition estimate for an analysed meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealVisionResponse {
    /// Name of the meal
    pub name: String,
    /// Estimated calories for the whole meal
    pub total_calories_estimation: i64,
    /// Estimated calories per 100 grams
    pub calories_100_grams: i64,
    /// Carbohydrates in grams
    pub carbs: i64,
    /// Proteins in grams
    pub proteins: i64,
    /// Fats in grams
    pub fats: i64,
}

impl ResponseModel for MealVisionResponse {}

/// Chat prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Text sent to the model
    pub prompt: String,
}

/// Chat completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Text returned by the model
    pub message: String,
}

impl ResponseModel for ChatResponse {}

/// Image generation prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Description of the image
    pub prompt: String,
}

/// Generated image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// URL the generated image can be downloaded from
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl ResponseModel for ImageResponse {}

/// Languages the model can answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum GptLanguage {
    #[default]
    English,
    Spanish,
    German,
    Japanese,
    Mandarin,
    Galician,
    Portuguese,
    Arabic,
    Korean,
    Russian,
    Hindi,
    Euskera,
    Catalan,
    French,
    Italian,
}

impl GptLanguage {
    /// Every supported language
    pub const ALL: [Self; 15] = [
        Self::English,
        Self::Spanish,
        Self::German,
        Self::Japanese,
        Self::Mandarin,
        Self::Galician,
        Self::Portuguese,
        Self::Arabic,
        Self::Korean,
        Self::Russian,
        Self::Hindi,
        Self::Euskera,
        Self::Catalan,
        Self::French,
        Self::Italian,
    ];

    /// Wire name, as sent to the backend
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Spanish => "spanish",
            Self::German => "german",
            Self::Japanese => "japanese",
            Self::Mandarin => "mandarin",
            Self::Galician => "galician",
            Self::Portuguese => "portuguese",
            Self::Arabic => "arabic",
            Self::Korean => "korean",
            Self::Russian => "russian",
            Self::Hindi => "hindi",
            Self::Euskera => "euskera",
            Self::Catalan => "catalan",
            Self::French => "french",
            Self::Italian => "italian",
        }
    }
}

impl fmt::Display for GptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GptLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == lower)
            .ok_or_else(|| format!("unsupported language: {s}"))
    }
}
