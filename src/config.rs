// ABOUTME: Game configuration loaded from an optional TOML file
// ABOUTME: Model ids, voice, feature flags; API key can come from the environment

use crate::error::Error;
use crate::game::Difficulty;
use crate::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variables checked for the API key, in order
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Runtime configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub text_model: String,
    pub speech_model: String,
    pub image_model: String,
    /// Prebuilt voice used for reading riddles
    pub voice: String,
    /// Play click/pop/correct/wrong feedback
    pub sound_effects: bool,
    /// Ask for riddles at this difficulty; `None` uses the plain prompt
    pub difficulty: Option<Difficulty>,
    /// Delay before a new riddle is read aloud automatically
    pub autoplay_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            speech_model: "gemini-2.5-flash-preview-tts".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            voice: "Puck".to_string(),
            sound_effects: true,
            difficulty: None,
            autoplay_delay_ms: 500,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from `path` if given, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Take the API key from the first non-empty variable `lookup` returns
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|v| !v.trim().is_empty())
        {
            self.api_key = Some(key);
        }
    }

    pub fn autoplay_delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay_ms)
    }

    /// The API key, or a config error naming where it is looked up
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::Config(format!(
                    "No API key; set api_key or one of {}",
                    API_KEY_VARS.join(", ")
                ))
            })
    }
}
