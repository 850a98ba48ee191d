// ABOUTME: Core audio type definitions
// ABOUTME: RawAudioPayload (interleaved 16-bit PCM bytes), DecodedAudioBuffer, AudioFormat

use std::time::Duration;

/// Sample rate the speech service renders at
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;
/// Channel count the speech service renders with
pub const SPEECH_CHANNELS: u16 = 1;

/// Audio format specification
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AudioFormat {
    /// Frames per second
    pub sample_rate: u32,
    /// Interleaved channel count
    pub channels: u16,
    /// Bits per sample
    pub bit_depth: u8,
}

impl AudioFormat {
    /// Fixed format of synthesized speech: 16-bit mono at 24 kHz
    pub const SPEECH: Self = Self {
        sample_rate: SPEECH_SAMPLE_RATE,
        channels: SPEECH_CHANNELS,
        bit_depth: 16,
    };
}

/// Interleaved 16-bit signed little-endian PCM bytes
///
/// Immutable once received and consumed by the decode step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAudioPayload {
    bytes: Vec<u8>,
    format: AudioFormat,
}

impl RawAudioPayload {
    /// Wrap raw bytes with the format they were rendered in
    pub fn new(bytes: Vec<u8>, format: AudioFormat) -> Self {
        Self { bytes, format }
    }

    /// Wrap bytes produced by the speech service
    pub fn speech(bytes: Vec<u8>) -> Self {
        Self::new(bytes, AudioFormat::SPEECH)
    }

    /// Raw PCM bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// De-interleaved floating-point audio, one `Vec<f32>` per channel
///
/// Every channel holds exactly `frame_count` samples in `[-1.0, 1.0)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedAudioBuffer {
    sample_rate: u32,
    frame_count: usize,
    channels: Vec<Vec<f32>>,
}

impl DecodedAudioBuffer {
    /// Build a buffer from per-channel sample vectors
    ///
    /// Panics if the channels differ in length or no channel is given.
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        assert!(!channels.is_empty(), "audio buffer needs at least one channel");
        let frame_count = channels[0].len();
        assert!(
            channels.iter().all(|c| c.len() == frame_count),
            "all channels must hold the same number of frames"
        );
        Self {
            sample_rate,
            frame_count,
            channels,
        }
    }

    /// A buffer of `frame_count` zero samples on every channel
    ///
    /// `channel_count` must be at least 1; zero panics.
    pub fn silence(sample_rate: u32, channel_count: u16, frame_count: usize) -> Self {
        assert!(channel_count >= 1, "silence needs a channel count of at least 1");
        Self::from_channels(
            sample_rate,
            vec![vec![0.0; frame_count]; channel_count as usize],
        )
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn channel_count(&self) -> u16 {
        self.channels.len() as u16
    }

    /// Samples of one channel
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Playback length at the buffer's sample rate
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frame_count as f64 / self.sample_rate as f64)
    }

    /// Sample of `channel` at `frame`, or silence past the end
    #[inline]
    pub fn sample_at(&self, channel: usize, frame: usize) -> f32 {
        self.channels
            .get(channel)
            .and_then(|c| c.get(frame))
            .copied()
            .unwrap_or(0.0)
    }
}
