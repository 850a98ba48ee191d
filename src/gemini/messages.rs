// ABOUTME: Gemini generateContent request/response bodies
// ABOUTME: Only the fields used for riddles, speech and reward images

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; always one here
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Output shaping
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn request with one text part
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part::text(prompt)],
            }],
            generation_config: None,
        }
    }

    /// Attach a generation config
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// One turn of a conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// `user` or `model`; omitted on requests
    pub role: Option<String>,
    /// Text and media parts in order
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Text or inline media
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Text content
    pub text: Option<String>,
    /// Base64 media content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text-only part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

/// Base64 media returned inline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// e.g. `image/png` or `audio/L16;codec=pcm;rate=24000`
    pub mime_type: String,
    /// Base64 payload
    pub data: String,
}

/// Output shaping; unset fields are left out of the body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// `application/json` for structured output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// JSON schema the structured output follows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    /// e.g. `["AUDIO"]` for speech
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    /// Voice selection for speech
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
    /// Image shape for image models
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Speech output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    #[allow(missing_docs)]
    pub voice_config: VoiceConfig,
}

impl SpeechConfig {
    /// Use the named prebuilt voice
    pub fn prebuilt(voice_name: impl Into<String>) -> Self {
        Self {
            voice_config: VoiceConfig {
                prebuilt_voice_config: PrebuiltVoiceConfig {
                    voice_name: voice_name.into(),
                },
            },
        }
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

/// Image output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// e.g. `1:1`
    pub aspect_ratio: String,
}

/// Response of `generateContent`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Alternative answers; only the first is read
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One answer of the model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Missing when the answer was blocked
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text of the first candidate, if it has any
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Inline data of the first part of the first candidate
    pub fn leading_inline_data(&self) -> Option<&InlineData> {
        self.first_parts().first().and_then(|p| p.inline_data.as_ref())
    }

    /// First part of the first candidate that carries inline data
    pub fn find_inline_data(&self) -> Option<&InlineData> {
        self.first_parts().iter().find_map(|p| p.inline_data.as_ref())
    }
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorDetail,
}

/// Message and status of an API error
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable reason
    #[serde(default)]
    pub message: String,
    /// e.g. `INVALID_ARGUMENT`
    #[serde(default)]
    pub status: Option<String>,
}
