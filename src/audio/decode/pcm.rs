// ABOUTME: PCM decoder implementation
// ABOUTME: De-interleaves 16-bit signed little-endian PCM into normalized per-channel floats

use crate::audio::decode::Decoder;
use crate::audio::{AudioFormat, DecodedAudioBuffer};

/// Divisor for the asymmetric signed 16-bit range; maps -32768 to -1.0
const I16_SCALE: f32 = 32768.0;

/// Decoder for raw 16-bit PCM at a known rate and channel count
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PcmDecoder {
    sample_rate: u32,
    channels: u16,
}

impl PcmDecoder {
    /// Create a decoder
    ///
    /// Panics if `channels` is zero.
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        assert!(channels > 0, "PCM channel count must be at least 1");
        Self {
            sample_rate,
            channels,
        }
    }

    /// Decoder for the speech service's fixed 24 kHz mono format
    pub fn speech() -> Self {
        Self::from_format(AudioFormat::SPEECH)
    }

    pub fn from_format(format: AudioFormat) -> Self {
        Self::new(format.sample_rate, format.channels)
    }
}

impl Decoder for PcmDecoder {
    fn decode(&self, data: &[u8]) -> DecodedAudioBuffer {
        decode_pcm16(data, self.sample_rate, self.channels)
    }
}

/// Convert interleaved 16-bit PCM bytes into a normalized multi-channel buffer
///
/// A trailing odd byte and a trailing partial frame are dropped. Each output
/// sample is `int16 / 32768.0`, so values lie in `[-1.0, 1.0)`.
///
/// Panics if `channels` is zero.
pub fn decode_pcm16(data: &[u8], sample_rate: u32, channels: u16) -> DecodedAudioBuffer {
    assert!(channels > 0, "PCM channel count must be at least 1");
    let channel_count = channels as usize;

    let samples: Vec<i16> = data
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect();
    let frame_count = samples.len() / channel_count;

    let decoded = (0..channel_count)
        .map(|channel| {
            (0..frame_count)
                .map(|i| samples[i * channel_count + channel] as f32 / I16_SCALE)
                .collect::<Vec<f32>>()
        })
        .collect();

    DecodedAudioBuffer::from_channels(sample_rate, decoded)
}
