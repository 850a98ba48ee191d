// ABOUTME: Speech synthesis collaborator seam
// ABOUTME: Text in, base64 raw PCM (24 kHz mono, 16-bit) or nothing out

use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Base64-encoded raw PCM returned by the speech service
///
/// The service never states the format; it is always 16-bit mono at 24 kHz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechPayload {
    pub audio_base64: String,
}

impl SpeechPayload {
    pub fn new(audio_base64: impl Into<String>) -> Self {
        Self {
            audio_base64: audio_base64.into(),
        }
    }
}

/// External text-to-speech service
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text`
    ///
    /// `Ok(None)` means the service answered but returned no audio.
    async fn synthesize(&self, text: &str) -> Result<Option<SpeechPayload>>;
}

#[async_trait]
impl<T: SpeechSynthesizer + ?Sized> SpeechSynthesizer for Arc<T> {
    async fn synthesize(&self, text: &str) -> Result<Option<SpeechPayload>> {
        (**self).synthesize(text).await
    }
}
