// ABOUTME: Gemini collaborators for riddles, speech and reward images
// ABOUTME: Message types, HTTP client and the generator trait implementations

/// HTTP client implementation
pub mod client;
/// Riddle, speech and image generation on the client
pub mod generators;
/// Request and response type definitions
pub mod messages;

pub use client::GeminiClient;
pub use generators::{parse_riddle, reward_prompt, riddle_prompt};
