// ABOUTME: HTTP client for the Gemini generateContent endpoint
// ABOUTME: Sends JSON requests with the API key header and maps failures onto Error

use crate::config::GameConfig;
use crate::error::Error;
use crate::gemini::messages::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::Result;

/// Client for the generative-AI service behind riddles, speech and images
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    pub(crate) text_model: String,
    pub(crate) speech_model: String,
    pub(crate) image_model: String,
    pub(crate) voice: String,
}

impl GeminiClient {
    /// Build a client from `config`; fails without an API key
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            text_model: config.text_model.clone(),
            speech_model: config.speech_model.clone(),
            image_model: config.image_model.clone(),
            voice: config.voice.clone(),
        })
    }

    /// Endpoint for `model`
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    /// POST a generateContent request
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        log::debug!("generateContent on {}", model);

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            log::warn!("{} returned HTTP {}", model, status.as_u16());
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}
