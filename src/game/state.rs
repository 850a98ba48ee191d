// ABOUTME: Top-level game flow: letter grid, loading, playing, reward
// ABOUTME: Riddle failures return to the grid with a banner; the user retries by picking again

use crate::config::GameConfig;
use crate::game::riddle::{normalize_letter, Difficulty, GeneratedRiddle, RiddleData, RiddleGenerator};
use crate::game::round::GameRound;
use crate::game::sfx::{SoundBoard, SoundEffects};
use crate::Result;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

/// Banner shown when a riddle could not be generated
pub const RIDDLE_ERROR_MESSAGE: &str = "Oops! My brain tickled. Try that letter again!";
/// Shown next to the spinner while a riddle is generated
pub const THINKING_MESSAGE: &str = "Thinking of a riddle...";

/// Which screen is showing
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    /// Letter grid
    Menu,
    /// Waiting for the riddle of the picked letter
    LoadingRiddle,
    /// Riddle round on screen
    Playing,
    /// Reward picture for the solved riddle
    ShowReward,
}

/// Screen flow of one player session
pub struct Game<G> {
    generator: G,
    difficulty: Option<Difficulty>,
    sfx: SoundBoard,
    rng: Box<dyn RngCore + Send>,
    state: GameState,
    letter: char,
    round: Option<GameRound>,
    error: Option<String>,
}

impl<G: RiddleGenerator> Game<G> {
    /// Start on the letter grid
    pub fn new(generator: G, difficulty: Option<Difficulty>, sfx: SoundBoard) -> Self {
        Self {
            generator,
            difficulty,
            sfx,
            rng: Box::new(StdRng::from_entropy()),
            state: GameState::Menu,
            letter: 'A',
            round: None,
            error: None,
        }
    }

    /// Build a game with difficulty and sound effects taken from `config`
    pub fn from_config(generator: G, config: &GameConfig, effects: Arc<dyn SoundEffects>) -> Self {
        Self::new(
            generator,
            config.difficulty,
            SoundBoard::new(config.sound_effects, effects),
        )
    }

    /// Replace the option shuffling source
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Letter last picked on the grid
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Banner text from the last failed riddle request
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.difficulty = difficulty;
    }

    pub fn sound_board(&self) -> &SoundBoard {
        &self.sfx
    }

    pub fn round(&self) -> Option<&GameRound> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut GameRound> {
        self.round.as_mut()
    }

    pub fn riddle(&self) -> Option<&RiddleData> {
        self.round.as_ref().map(GameRound::riddle)
    }

    /// Word to paint on the reward screen
    pub fn reward_word(&self) -> Option<&str> {
        match self.state {
            GameState::ShowReward => self.riddle().map(|r| r.answer.as_str()),
            _ => None,
        }
    }

    /// Letter picked: enter the loading screen
    pub fn begin_letter(&mut self, letter: char) -> Result<char> {
        let letter = normalize_letter(letter)?;
        self.letter = letter;
        self.error = None;
        self.state = GameState::LoadingRiddle;
        Ok(letter)
    }

    /// Riddle request finished: start the round or go back with a banner
    pub fn finish_letter(&mut self, generated: Result<GeneratedRiddle>) -> Result<()> {
        match generated {
            Ok(generated) => {
                let riddle = RiddleData::assemble(self.letter, generated, &mut *self.rng);
                log::info!("Riddle ready for {}: {} options", riddle.letter, riddle.options.len());
                self.round = Some(GameRound::new(riddle, self.sfx.clone()));
                self.state = GameState::Playing;
                Ok(())
            }
            Err(e) => {
                log::error!("Error generating riddle: {}", e);
                self.error = Some(RIDDLE_ERROR_MESSAGE.to_string());
                self.round = None;
                self.state = GameState::Menu;
                Err(e)
            }
        }
    }

    /// Pick a letter and wait for its riddle
    pub async fn select_letter(&mut self, letter: char) -> Result<()> {
        let letter = self.begin_letter(letter)?;
        let generated = self.generator.generate_riddle(letter, self.difficulty).await;
        self.finish_letter(generated)
    }

    /// The correct option was chosen and its reveal delay passed
    pub fn correct(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::ShowReward;
        }
    }

    pub fn back_to_menu(&mut self) {
        self.state = GameState::Menu;
        self.round = None;
    }

    /// "Play Again" on the reward screen leads back to the grid
    pub fn play_again(&mut self) {
        self.back_to_menu();
    }
}
