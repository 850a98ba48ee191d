// ABOUTME: Game core driven by the view layer
// ABOUTME: Riddles, rounds, rewards, sound effects and the screen state machine

/// Reward picture generation and states
pub mod reward;
/// Riddle data and the riddle generation seam
pub mod riddle;
/// Option handling within one round
pub mod round;
/// Interface sound effects
pub mod sfx;
/// Screen state machine
pub mod state;

pub use reward::{fetch_reward, ImageGenerator, RewardImage, RewardState};
pub use riddle::{build_options, Difficulty, GeneratedRiddle, RiddleData, RiddleGenerator, ALPHABET};
pub use round::{GameRound, OptionOutcome, OptionStyle};
pub use sfx::{SoundBoard, SoundEffect, SoundEffects};
pub use state::{Game, GameState};
