// ABOUTME: One riddle round: option clicks, wrong-answer flash and reading aloud
// ABOUTME: Timers live in the view; the round exposes the delays and the reset hook

use crate::audio::OutputContext;
use crate::game::riddle::RiddleData;
use crate::game::sfx::{SoundBoard, SoundEffect};
use crate::playback::{PlayOutcome, SpeechPlaybackController, SpeechSynthesizer};
use std::future::Future;
use std::time::Duration;

/// Pause between a correct click and the reward screen
pub const CORRECT_REVEAL_DELAY: Duration = Duration::from_millis(500);
/// How long a wrong option stays highlighted
pub const WRONG_RESET_DELAY: Duration = Duration::from_millis(1000);

/// Result of clicking an option
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptionOutcome {
    /// Show the reward after `CORRECT_REVEAL_DELAY`
    Correct,
    /// Call `clear_wrong` after `WRONG_RESET_DELAY`
    Wrong,
    /// Same wrong option clicked again while still highlighted
    Ignored,
}

/// How an option button is drawn
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OptionStyle {
    /// Not picked
    Normal,
    /// Picked and right
    Selected,
    /// Picked and wrong, until `clear_wrong`
    Wrong,
}

/// State of the riddle currently on screen
pub struct GameRound {
    riddle: RiddleData,
    selected: Option<String>,
    is_wrong: bool,
    sfx: SoundBoard,
}

impl GameRound {
    /// Start a round with nothing selected
    pub fn new(riddle: RiddleData, sfx: SoundBoard) -> Self {
        Self {
            riddle,
            selected: None,
            is_wrong: false,
            sfx,
        }
    }

    pub fn riddle(&self) -> &RiddleData {
        &self.riddle
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_wrong(&self) -> bool {
        self.is_wrong
    }

    /// Pointer went down on an option
    pub fn press_down(&self, option: &str) {
        if self.selected.as_deref() != Some(option) {
            self.sfx.play(SoundEffect::Pop);
        }
    }

    /// Option clicked
    pub fn choose(&mut self, option: &str) -> OptionOutcome {
        if self.is_wrong && self.selected.as_deref() == Some(option) {
            return OptionOutcome::Ignored;
        }

        self.selected = Some(option.to_string());

        if self.riddle.is_answer(option) {
            self.is_wrong = false;
            self.sfx.play(SoundEffect::Correct);
            OptionOutcome::Correct
        } else {
            self.is_wrong = true;
            self.sfx.play(SoundEffect::Wrong);
            OptionOutcome::Wrong
        }
    }

    /// Drop the wrong-answer highlight
    pub fn clear_wrong(&mut self) {
        if self.is_wrong {
            self.is_wrong = false;
            self.selected = None;
        }
    }

    pub fn option_style(&self, option: &str) -> OptionStyle {
        match self.selected.as_deref() {
            Some(selected) if selected == option && self.is_wrong => OptionStyle::Wrong,
            Some(selected) if selected == option => OptionStyle::Selected,
            _ => OptionStyle::Normal,
        }
    }

    /// Back button
    pub fn press_back(&self) {
        self.sfx.play(SoundEffect::Click);
    }

    /// "Read to Me" button
    ///
    /// The click plays right away. The returned future owns the question,
    /// so the view can keep taking option clicks while it runs.
    pub fn read_aloud<'a, S, C>(
        &self,
        speech: &'a SpeechPlaybackController<S, C>,
    ) -> impl Future<Output = PlayOutcome> + 'a
    where
        S: SpeechSynthesizer + 'a,
        C: OutputContext + 'a,
    {
        self.sfx.play(SoundEffect::Click);
        let question = self.riddle.question.clone();
        async move { speech.play(&question).await }
    }

    /// Read the riddle once, `delay` after entering the round
    ///
    /// Dropping the future before the delay elapses cancels the read.
    pub fn auto_read<'a, S, C>(
        &self,
        speech: &'a SpeechPlaybackController<S, C>,
        delay: Duration,
    ) -> impl Future<Output = PlayOutcome> + 'a
    where
        S: SpeechSynthesizer + 'a,
        C: OutputContext + 'a,
    {
        let question = self.riddle.question.clone();
        async move {
            tokio::time::sleep(delay).await;
            speech.play(&question).await
        }
    }
}
