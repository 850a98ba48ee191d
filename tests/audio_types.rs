use alphabet_magic::audio::{AudioFormat, DecodedAudioBuffer, RawAudioPayload};
use std::time::Duration;

#[test]
fn test_speech_format() {
    assert_eq!(AudioFormat::SPEECH.sample_rate, 24000);
    assert_eq!(AudioFormat::SPEECH.channels, 1);
    assert_eq!(AudioFormat::SPEECH.bit_depth, 16);
}

#[test]
fn test_raw_payload_keeps_format() {
    let payload = RawAudioPayload::speech(vec![0x00, 0x04, 0x00, 0x08]);

    assert_eq!(payload.len(), 4);
    assert!(!payload.is_empty());
    assert_eq!(payload.format(), AudioFormat::SPEECH);
    assert_eq!(payload.bytes(), &[0x00u8, 0x04, 0x00, 0x08]);
}

#[test]
fn test_silence_buffer() {
    let buffer = DecodedAudioBuffer::silence(24000, 2, 12000);

    assert_eq!(buffer.channel_count(), 2);
    assert_eq!(buffer.frame_count(), 12000);
    assert_eq!(buffer.duration(), Duration::from_millis(500));
    assert!(buffer.channel(1).iter().all(|&s| s == 0.0));
}

#[test]
fn test_sample_at_past_end_is_silence() {
    let buffer = DecodedAudioBuffer::from_channels(24000, vec![vec![0.25, -0.5]]);

    assert_eq!(buffer.sample_at(0, 1), -0.5);
    assert_eq!(buffer.sample_at(0, 2), 0.0);
    assert_eq!(buffer.sample_at(3, 0), 0.0);
}

#[test]
#[should_panic(expected = "same number of frames")]
fn test_ragged_channels_are_rejected() {
    DecodedAudioBuffer::from_channels(24000, vec![vec![0.0; 3], vec![0.0; 2]]);
}

#[test]
#[should_panic(expected = "channel count of at least 1")]
fn test_silence_needs_a_channel() {
    DecodedAudioBuffer::silence(24000, 0, 10);
}
