// ABOUTME: Interface sound effects (click, pop, correct, wrong)
// ABOUTME: Fire-and-forget; only played when sound effects are enabled in the config

use std::fmt;
use std::sync::Arc;

/// Short feedback sounds played on interaction
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Click,
    Correct,
    Wrong,
    Pop,
}

impl SoundEffect {
    /// Hosted clip for this effect
    pub fn url(self) -> &'static str {
        match self {
            SoundEffect::Click => "https://actions.google.com/sounds/v1/ui/click_on_on.ogg",
            SoundEffect::Correct => "https://actions.google.com/sounds/v1/cartoon/wood_plank_flicks.ogg",
            SoundEffect::Wrong => "https://actions.google.com/sounds/v1/cartoon/clank_car_crash.ogg",
            SoundEffect::Pop => "https://actions.google.com/sounds/v1/cartoon/pop.ogg",
        }
    }

    /// Playback volume; the crash sound is kept quieter
    pub fn volume(self) -> f32 {
        match self {
            SoundEffect::Wrong => 0.3,
            _ => 0.5,
        }
    }
}

impl fmt::Display for SoundEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Something that can play feedback sounds
///
/// Implementations must not block and must swallow their own errors.
pub trait SoundEffects: Send + Sync {
    fn play(&self, effect: SoundEffect);
}

/// Routes effects to a player when enabled, drops them otherwise
#[derive(Clone, Default)]
pub struct SoundBoard {
    player: Option<Arc<dyn SoundEffects>>,
}

impl SoundBoard {
    pub fn new(enabled: bool, player: Arc<dyn SoundEffects>) -> Self {
        Self {
            player: enabled.then_some(player),
        }
    }

    /// A board that never plays anything
    pub fn disabled() -> Self {
        Self { player: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.player.is_some()
    }

    pub fn play(&self, effect: SoundEffect) {
        if let Some(player) = &self.player {
            log::trace!("Sound effect {} ({})", effect, effect.url());
            player.play(effect);
        }
    }
}
