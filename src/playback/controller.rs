// ABOUTME: Speech playback controller: request, decode, schedule, report
// ABOUTME: Generation tokens make the latest play call win; stale results are dropped

use crate::audio::decode::{Decoder, PcmDecoder};
use crate::audio::output::{ContextState, OutputContext};
use crate::audio::RawAudioPayload;
use crate::playback::synth::SpeechSynthesizer;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

/// Lifecycle of one playback session
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing in flight
    Idle,
    /// Waiting for the speech service
    Requesting,
    /// Turning the payload into samples
    Decoding,
    /// Source handed to the output context
    Scheduled,
    /// Source played out
    Ended,
    /// Session gave up; see `SoftFailure`
    Failed,
}

/// Why a session did not play through; all of these leave the controller usable
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SoftFailure {
    /// The speech service returned no audio
    SynthesisUnavailable,
    /// The speech service call failed
    CollaboratorFailure,
    /// The payload was not valid base64
    InvalidPayload,
    /// The output context could not be resumed, refused the source or
    /// failed while playing it
    OutputFailure,
}

/// Notification published to subscribers
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The live session moved to a new state
    State(PlaybackState),
    /// Audio started
    Started,
    /// Audio ended
    Ended,
    /// The session did not play through
    Failed(SoftFailure),
}

/// How a `play` call finished
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Played to the end (or stopped by the context)
    Ended,
    /// Playback never started or broke off
    Failed(SoftFailure),
    /// A later `play` call took over; this session's result was discarded
    Superseded,
    /// No usable output context; nothing happened
    Unavailable,
}

/// Plays synthesized speech on an owned output context
///
/// Only the most recent `play` call may change state or publish events.
pub struct SpeechPlaybackController<S, C> {
    synthesizer: S,
    context: Option<C>,
    generation: AtomicU64,
    state: Mutex<PlaybackState>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl<S, C> SpeechPlaybackController<S, C>
where
    S: SpeechSynthesizer,
    C: OutputContext,
{
    /// Create a controller that owns `context`
    ///
    /// A `None` context makes every `play` a no-op.
    pub fn new(synthesizer: S, context: Option<C>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            synthesizer,
            context,
            generation: AtomicU64::new(0),
            state: Mutex::new(PlaybackState::Idle),
            events,
        }
    }

    /// Subscribe to state changes and started/ended/failed notifications
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Current session state
    pub fn state(&self) -> PlaybackState {
        *self.state.lock()
    }

    /// True while a session is requesting, decoding or playing
    ///
    /// Views disable their read-aloud trigger while this holds.
    pub fn is_playing(&self) -> bool {
        matches!(
            self.state(),
            PlaybackState::Requesting | PlaybackState::Decoding | PlaybackState::Scheduled
        )
    }

    /// The owned output context, if any
    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    /// Synthesize `text` and play it to the end
    pub async fn play(&self, text: &str) -> PlayOutcome {
        let context = match self.context.as_ref() {
            Some(c) if c.state() != ContextState::Closed => c,
            _ => {
                log::debug!("No output context; ignoring play request");
                return PlayOutcome::Unavailable;
            }
        };

        let token = self.begin_session();

        let payload = match self.synthesizer.synthesize(text).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                log::warn!("Speech service returned no audio");
                return self.fail(token, SoftFailure::SynthesisUnavailable);
            }
            Err(e) => {
                log::error!("Error generating speech: {}", e);
                return self.fail(token, SoftFailure::CollaboratorFailure);
            }
        };

        if !self.transition(token, PlaybackState::Decoding) {
            return PlayOutcome::Superseded;
        }
        let bytes = match BASE64.decode(payload.audio_base64.as_bytes()) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Speech payload is not valid base64: {}", e);
                return self.fail(token, SoftFailure::InvalidPayload);
            }
        };
        let raw = RawAudioPayload::speech(bytes);
        let buffer = Arc::new(PcmDecoder::from_format(raw.format()).decode(raw.bytes()));
        log::debug!(
            "Decoded {} frames ({:.2}s) of speech",
            buffer.frame_count(),
            buffer.duration().as_secs_f64()
        );

        if !self.transition(token, PlaybackState::Scheduled) {
            return PlayOutcome::Superseded;
        }
        if context.state() == ContextState::Suspended {
            if let Err(e) = context.resume().await {
                log::warn!("Failed to resume output context: {}", e);
                return self.fail(token, SoftFailure::OutputFailure);
            }
            if !self.is_current(token) {
                return PlayOutcome::Superseded;
            }
        }

        let handle = match context.start(buffer) {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("Audio play failed: {}", e);
                return self.fail(token, SoftFailure::OutputFailure);
            }
        };
        self.publish(token, PlaybackEvent::Started);

        match handle.finished().await {
            Ok(true) => {}
            Ok(false) => log::debug!("Source dropped before reaching its end"),
            Err(e) => {
                log::warn!("Audio output stopped: {}", e);
                return self.fail(token, SoftFailure::OutputFailure);
            }
        }

        if !self.transition(token, PlaybackState::Ended) {
            return PlayOutcome::Superseded;
        }
        self.publish(token, PlaybackEvent::Ended);
        self.transition(token, PlaybackState::Idle);
        PlayOutcome::Ended
    }

    /// Abandon the live session without touching the context
    ///
    /// Its late results are discarded and the controller is idle again.
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);
        if *state != PlaybackState::Idle {
            *state = PlaybackState::Idle;
            let _ = self.events.send(PlaybackEvent::State(PlaybackState::Idle));
        }
    }

    /// Release the output context
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(context) = &self.context {
            context.close();
        }
        *self.state.lock() = PlaybackState::Idle;
    }

    fn begin_session(&self) -> u64 {
        let mut state = self.state.lock();
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *state = PlaybackState::Requesting;
        log::debug!("Speech session {} -> {:?}", token, PlaybackState::Requesting);
        let _ = self.events.send(PlaybackEvent::State(PlaybackState::Requesting));
        token
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    /// Move to `next` if `token` is still the live session
    fn transition(&self, token: u64, next: PlaybackState) -> bool {
        let mut state = self.state.lock();
        if !self.is_current(token) {
            return false;
        }
        *state = next;
        log::debug!("Speech session {} -> {:?}", token, next);
        let _ = self.events.send(PlaybackEvent::State(next));
        true
    }

    fn publish(&self, token: u64, event: PlaybackEvent) {
        let _state = self.state.lock();
        if self.is_current(token) {
            let _ = self.events.send(event);
        }
    }

    fn fail(&self, token: u64, reason: SoftFailure) -> PlayOutcome {
        if !self.transition(token, PlaybackState::Failed) {
            return PlayOutcome::Superseded;
        }
        self.publish(token, PlaybackEvent::Failed(reason));
        self.transition(token, PlaybackState::Idle);
        PlayOutcome::Failed(reason)
    }
}
