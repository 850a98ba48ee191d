// ABOUTME: Audio decoder implementations
// ABOUTME: Raw PCM is the only codec the speech service emits

/// PCM decoder implementation
pub mod pcm;

pub use pcm::{decode_pcm16, PcmDecoder};

use crate::audio::DecodedAudioBuffer;

/// Decoder trait for audio codecs
pub trait Decoder {
    /// Decode raw audio data into a per-channel buffer
    fn decode(&self, data: &[u8]) -> DecodedAudioBuffer;
}
