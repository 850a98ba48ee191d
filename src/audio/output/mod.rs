// ABOUTME: Audio output context trait and implementations
// ABOUTME: A context owns the device connection; sources started on it report completion

/// cpal-based output context implementation
pub mod cpal_output;

pub use cpal_output::CpalContext;

use crate::audio::DecodedAudioBuffer;
use crate::error::Error;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Lifecycle state of an output context
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// Sources play as soon as they are started
    Running,
    /// Needs `resume` before anything is audible
    Suspended,
    /// Released; nothing can be started any more
    Closed,
}

/// Completion side of a started source, held by the context
pub struct PlaybackCompletion(oneshot::Sender<Result<()>>);

impl PlaybackCompletion {
    /// Signal that the source has played to its end
    pub fn complete(self) {
        let _ = self.0.send(Ok(()));
    }

    /// Signal that the device stopped producing sound for this source
    pub fn fail(self, error: Error) {
        let _ = self.0.send(Err(error));
    }
}

/// Handle to a started source, resolved when playback ends
pub struct PlaybackHandle {
    done: oneshot::Receiver<Result<()>>,
}

impl PlaybackHandle {
    /// Create a connected handle/completion pair
    pub fn pair() -> (Self, PlaybackCompletion) {
        let (tx, rx) = oneshot::channel();
        (Self { done: rx }, PlaybackCompletion(tx))
    }

    /// Wait until the context signals the end of playback
    ///
    /// `Ok(true)` means the source played to its end. `Ok(false)` means it
    /// was dropped without finishing, e.g. because the context was closed or
    /// another source replaced it. Device errors come back as `Err`.
    pub async fn finished(self) -> Result<bool> {
        match self.done.await {
            Ok(Ok(())) => Ok(true),
            Ok(Err(e)) => Err(e),
            Err(_) => Ok(false),
        }
    }
}

/// Shared audio output context
///
/// Created when a playback-capable view mounts and released with `close`
/// when it unmounts.
#[async_trait]
pub trait OutputContext: Send + Sync {
    /// Current lifecycle state
    fn state(&self) -> ContextState;

    /// Leave the suspended state
    async fn resume(&self) -> Result<()>;

    /// Start playing `buffer` immediately
    fn start(&self, buffer: Arc<DecodedAudioBuffer>) -> Result<PlaybackHandle>;

    /// Release the device connection
    fn close(&self);
}
