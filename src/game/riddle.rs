// ABOUTME: Riddle data, difficulty levels and the riddle generation seam
// ABOUTME: Answer and distractors are merged into one option list shuffled by an injected Rng

use crate::error::Error;
use crate::Result;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Letters offered on the letter grid
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Number of wrong answers requested per riddle
pub const DISTRACTOR_COUNT: usize = 3;

/// Normalize a grid letter to uppercase A-Z
pub fn normalize_letter(letter: char) -> Result<char> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Ok(upper)
    } else {
        Err(Error::InvalidLetter(letter))
    }
}

/// Riddle difficulty, used only when difficulty selection is enabled
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(Error::Config(format!("Unknown difficulty: {}", other))),
        }
    }
}

/// Riddle as returned by the generation service, before shuffling
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GeneratedRiddle {
    pub question: String,
    pub answer: String,
    /// Wrong answers; the service is asked for three
    #[serde(rename = "options")]
    pub distractors: Vec<String>,
}

/// A playable riddle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiddleData {
    pub letter: char,
    pub question: String,
    pub answer: String,
    /// Answer plus distractors in display order
    pub options: Vec<String>,
}

impl RiddleData {
    /// Combine a generated riddle into a shuffled option list
    pub fn assemble<R: Rng + ?Sized>(letter: char, generated: GeneratedRiddle, rng: &mut R) -> Self {
        let options = build_options(&generated.answer, generated.distractors, rng);
        Self {
            letter,
            question: generated.question,
            answer: generated.answer,
            options,
        }
    }

    pub fn is_answer(&self, option: &str) -> bool {
        option == self.answer
    }
}

/// Append `answer` to `distractors` and shuffle the result with `rng`
///
/// Starting letters are not checked; the service is trusted to honor them.
pub fn build_options<R: Rng + ?Sized>(answer: &str, distractors: Vec<String>, rng: &mut R) -> Vec<String> {
    let mut options = distractors;
    options.push(answer.to_string());
    options.shuffle(rng);
    options
}

/// External riddle generation service
#[async_trait]
pub trait RiddleGenerator: Send + Sync {
    /// Generate a riddle whose answer starts with `letter`
    async fn generate_riddle(
        &self,
        letter: char,
        difficulty: Option<Difficulty>,
    ) -> Result<GeneratedRiddle>;
}

#[async_trait]
impl<T: RiddleGenerator + ?Sized> RiddleGenerator for Arc<T> {
    async fn generate_riddle(
        &self,
        letter: char,
        difficulty: Option<Difficulty>,
    ) -> Result<GeneratedRiddle> {
        (**self).generate_riddle(letter, difficulty).await
    }
}
