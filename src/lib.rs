// ABOUTME: Main library entry point for alphabet-magic
// ABOUTME: Exports the audio pipeline, playback controller, game core and Gemini collaborators

//! # alphabet-magic
//!
//! Core of a letter riddle game for young children: pick a letter, hear a
//! generated riddle read aloud, choose among four options and receive a
//! generated reward picture.
//!
//! The generative work is done by an external service. This crate owns the
//! raw PCM decoding, the speech playback lifecycle and the game state that a
//! view layer renders.

#![warn(missing_docs)]

/// Audio types, PCM decoding and output contexts
pub mod audio;
/// Game configuration
pub mod config;
/// Letter selection, rounds, rewards and sound effects
pub mod game;
/// Gemini HTTP collaborators
pub mod gemini;
/// Speech playback lifecycle
pub mod playback;

pub use audio::{decode_pcm16, DecodedAudioBuffer, RawAudioPayload};
pub use config::GameConfig;
pub use game::{Game, GameState, RiddleData};
pub use gemini::GeminiClient;
pub use playback::{PlaybackEvent, PlaybackState, SpeechPlaybackController};

/// Result type for alphabet-magic operations
pub type Result<T> = std::result::Result<T, error::Error>;

/// Error types for alphabet-magic
pub mod error {
    use thiserror::Error;

    /// Error types for alphabet-magic operations
    #[derive(Error, Debug)]
    pub enum Error {
        /// Transport-level HTTP failure
        #[error("HTTP error: {0}")]
        Http(#[from] reqwest::Error),

        /// The generation service answered with a non-success status
        #[error("API error ({status}): {message}")]
        Api {
            /// HTTP status code
            status: u16,
            /// Body or reason returned by the service
            message: String,
        },

        /// Response body did not have the expected shape
        #[error("Invalid response: {0}")]
        InvalidResponse(String),

        /// Base64 payload could not be decoded
        #[error("Decode error: {0}")]
        Decode(#[from] base64::DecodeError),

        /// Audio output error
        #[error("Audio output error: {0}")]
        Output(String),

        /// Letter outside A-Z
        #[error("Not a letter of the alphabet: {0:?}")]
        InvalidLetter(char),

        /// Configuration could not be loaded
        #[error("Config error: {0}")]
        Config(String),
    }
}
