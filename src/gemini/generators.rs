// ABOUTME: Riddle, speech and reward-image generation on top of GeminiClient
// ABOUTME: Prompts, response schemas and payload extraction for each collaborator

use crate::error::Error;
use crate::game::reward::{ImageGenerator, RewardImage};
use crate::game::riddle::{Difficulty, GeneratedRiddle, RiddleGenerator, DISTRACTOR_COUNT};
use crate::gemini::client::GeminiClient;
use crate::gemini::messages::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, SpeechConfig,
};
use crate::playback::synth::{SpeechPayload, SpeechSynthesizer};
use crate::Result;
use async_trait::async_trait;
use serde_json::json;

/// Prompt asking for a riddle about something starting with `letter`
pub fn riddle_prompt(letter: char, difficulty: Option<Difficulty>) -> String {
    let mut prompt = format!(
        "Generate a simple, fun riddle for a 5-year-old child about an animal, food, or object \
         that starts with the letter '{letter}'.\n\
         Provide the answer (which must start with '{letter}') and {DISTRACTOR_COUNT} distinct \
         wrong answers (distractors) that are also simple words suitable for kids.\n"
    );
    if let Some(difficulty) = difficulty {
        prompt.push_str(match difficulty {
            Difficulty::Easy => {
                "Make it easy: use a very common word and a riddle with an obvious clue.\n"
            }
            Difficulty::Medium => {
                "Make it medium difficulty: use a familiar word and a riddle with two gentle clues.\n"
            }
            Difficulty::Hard => {
                "Make it hard: use a less common word a curious child might know, and make the \
                 distractors start with the same letter.\n"
            }
        });
    }
    prompt.push_str("\nReturn the response in JSON format.");
    prompt
}

/// Prompt for the reward picture of `word`
pub fn reward_prompt(word: &str) -> String {
    format!(
        "A cute, colorful, cheerful cartoon illustration of a {word}. Minimalist vector art style, \
         white background. High quality, kid-friendly."
    )
}

fn riddle_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "question": { "type": "STRING", "description": "The riddle question" },
            "answer": { "type": "STRING", "description": "The correct answer word" },
            "options": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 3 wrong answers"
            }
        },
        "required": ["question", "answer", "options"]
    })
}

/// Parse the JSON text of a riddle response
pub fn parse_riddle(response: &GenerateContentResponse) -> Result<GeneratedRiddle> {
    let text = response
        .text()
        .ok_or_else(|| Error::InvalidResponse("No text returned for riddle".to_string()))?;
    serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(format!("Riddle JSON: {}", e)))
}

#[async_trait]
impl RiddleGenerator for GeminiClient {
    async fn generate_riddle(
        &self,
        letter: char,
        difficulty: Option<Difficulty>,
    ) -> Result<GeneratedRiddle> {
        let request = GenerateContentRequest::text(riddle_prompt(letter, difficulty)).with_config(
            GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(riddle_schema()),
                ..Default::default()
            },
        );
        let response = self.generate_content(&self.text_model, &request).await?;
        parse_riddle(&response)
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiClient {
    async fn synthesize(&self, text: &str) -> Result<Option<SpeechPayload>> {
        let request = GenerateContentRequest::text(text).with_config(GenerationConfig {
            response_modalities: Some(vec!["AUDIO".to_string()]),
            speech_config: Some(SpeechConfig::prebuilt(&self.voice)),
            ..Default::default()
        });
        let response = self.generate_content(&self.speech_model, &request).await?;
        Ok(response
            .leading_inline_data()
            .filter(|d| !d.data.is_empty())
            .map(|d| SpeechPayload::new(d.data.clone())))
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(&self, word: &str) -> Result<Option<RewardImage>> {
        let request = GenerateContentRequest::text(reward_prompt(word)).with_config(GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio: "1:1".to_string(),
            }),
            ..Default::default()
        });
        let response = self.generate_content(&self.image_model, &request).await?;
        Ok(response
            .find_inline_data()
            .map(|d| RewardImage::new(d.mime_type.clone(), d.data.clone())))
    }
}
