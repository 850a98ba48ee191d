// ABOUTME: Audio types and processing for alphabet-magic
// ABOUTME: Raw PCM payloads, decoded buffers, the PCM decoder and output contexts

/// Audio decoder implementations
pub mod decode;
/// Output context trait and implementations
pub mod output;
/// Core audio type definitions (RawAudioPayload, DecodedAudioBuffer, AudioFormat)
pub mod types;

pub use decode::{decode_pcm16, Decoder, PcmDecoder};
pub use output::{ContextState, CpalContext, OutputContext, PlaybackHandle};
pub use types::{AudioFormat, DecodedAudioBuffer, RawAudioPayload, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};
