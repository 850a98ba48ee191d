// ABOUTME: Reward picture shown after a correct answer
// ABOUTME: Image generation seam, data URI handling and the loading/ready/fallback states

use crate::error::Error;
use crate::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::sync::Arc;

/// Shown while the picture is being generated
pub const LOADING_MESSAGE: &str = "Painting your prize...";
/// Shown when no picture could be generated
pub const FALLBACK_MESSAGE: &str = "Couldn't paint it, but you're a star!";

/// Generated image as returned inline by the service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardImage {
    pub mime_type: String,
    pub data_base64: String,
}

impl RewardImage {
    pub fn new(mime_type: impl Into<String>, data_base64: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data_base64: data_base64.into(),
        }
    }

    /// `data:<mime>;base64,<data>`, usable directly as an image source
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64)
    }

    /// Parse a base64 data URI
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::InvalidResponse("Data URI must start with data:".to_string()))?;
        let (mime_type, data) = rest
            .split_once(";base64,")
            .ok_or_else(|| Error::InvalidResponse("Data URI is not base64-encoded".to_string()))?;
        Ok(Self::new(mime_type, data))
    }

    /// Decoded image bytes
    pub fn bytes(&self) -> Result<Vec<u8>> {
        Ok(BASE64.decode(self.data_base64.as_bytes())?)
    }

    /// File extension matching the mime type
    pub fn extension(&self) -> &str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

/// External image generation service
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate a picture of `word`; `Ok(None)` when the service returned no image
    async fn generate_image(&self, word: &str) -> Result<Option<RewardImage>>;
}

#[async_trait]
impl<T: ImageGenerator + ?Sized> ImageGenerator for Arc<T> {
    async fn generate_image(&self, word: &str) -> Result<Option<RewardImage>> {
        (**self).generate_image(word).await
    }
}

/// What the reward screen shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewardState {
    Loading,
    Ready(RewardImage),
    Fallback,
}

impl RewardState {
    /// Caption under the picture frame, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            RewardState::Loading => Some(LOADING_MESSAGE),
            RewardState::Ready(_) => None,
            RewardState::Fallback => Some(FALLBACK_MESSAGE),
        }
    }
}

/// Generate the reward picture for `answer`; every failure becomes `Fallback`
pub async fn fetch_reward<G: ImageGenerator + ?Sized>(generator: &G, answer: &str) -> RewardState {
    match generator.generate_image(answer).await {
        Ok(Some(image)) => RewardState::Ready(image),
        Ok(None) => {
            log::warn!("No reward image returned for {:?}", answer);
            RewardState::Fallback
        }
        Err(e) => {
            log::error!("Error generating image: {}", e);
            RewardState::Fallback
        }
    }
}
