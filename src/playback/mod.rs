// ABOUTME: Speech playback for riddles read aloud
// ABOUTME: Synthesis collaborator trait and the playback controller state machine

/// Playback controller and its session state machine
pub mod controller;
/// Speech synthesis collaborator trait
pub mod synth;

pub use controller::{PlayOutcome, PlaybackEvent, PlaybackState, SoftFailure, SpeechPlaybackController};
pub use synth::{SpeechPayload, SpeechSynthesizer};
