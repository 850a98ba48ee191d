// ABOUTME: cpal-backed output context running on a dedicated audio thread
// ABOUTME: cpal streams are !Send, so the thread owns the device and receives commands

use crate::audio::output::{ContextState, OutputContext, PlaybackCompletion, PlaybackHandle};
use crate::audio::DecodedAudioBuffer;
use crate::error::Error;
use crate::Result;
use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

const STATE_RUNNING: u8 = 0;
const STATE_SUSPENDED: u8 = 1;
const STATE_CLOSED: u8 = 2;

/// Completion shared by the data and error callbacks of one stream
type SharedCompletion = Arc<Mutex<Option<PlaybackCompletion>>>;

enum Command {
    Play {
        buffer: Arc<DecodedAudioBuffer>,
        completion: PlaybackCompletion,
        reply: Sender<Result<()>>,
    },
    Suspend,
    Resume,
    Close,
}

/// Output context on the default cpal output device
pub struct CpalContext {
    commands: Sender<Command>,
    state: Arc<AtomicU8>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl CpalContext {
    /// Open the default output device in the running state
    pub fn new() -> Result<Self> {
        Self::open(STATE_RUNNING)
    }

    /// Open the default output device in the suspended state
    pub fn new_suspended() -> Result<Self> {
        Self::open(STATE_SUSPENDED)
    }

    fn open(initial: u8) -> Result<Self> {
        let (commands, rx) = channel::unbounded();
        let (ready_tx, ready_rx) = channel::bounded::<Result<()>>(1);
        let state = Arc::new(AtomicU8::new(initial));

        let thread = std::thread::Builder::new()
            .name("audio-output".to_string())
            .spawn(move || {
                let device = match open_default_device() {
                    Ok(device) => {
                        let _ = ready_tx.send(Ok(()));
                        device
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                run_output_thread(device, rx, initial == STATE_SUSPENDED);
            })
            .map_err(|e| Error::Output(format!("Failed to spawn audio thread: {}", e)))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = thread.join();
                return Err(e);
            }
            Err(_) => return Err(Error::Output("Audio thread exited during startup".to_string())),
        }

        log::info!("Audio output context opened");
        Ok(Self {
            commands,
            state,
            thread: Mutex::new(Some(thread)),
        })
    }

    /// Pause output until the next `resume`
    pub fn suspend(&self) -> Result<()> {
        self.transition(STATE_SUSPENDED, Command::Suspend)
    }

    fn transition(&self, target: u8, command: Command) -> Result<()> {
        if self.state.load(Ordering::SeqCst) == STATE_CLOSED {
            return Err(Error::Output("Output context is closed".to_string()));
        }
        self.commands
            .send(command)
            .map_err(|_| Error::Output("Audio thread is gone".to_string()))?;
        self.state.store(target, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl OutputContext for CpalContext {
    fn state(&self) -> ContextState {
        match self.state.load(Ordering::SeqCst) {
            STATE_RUNNING => ContextState::Running,
            STATE_SUSPENDED => ContextState::Suspended,
            _ => ContextState::Closed,
        }
    }

    async fn resume(&self) -> Result<()> {
        self.transition(STATE_RUNNING, Command::Resume)
    }

    fn start(&self, buffer: Arc<DecodedAudioBuffer>) -> Result<PlaybackHandle> {
        if self.state.load(Ordering::SeqCst) == STATE_CLOSED {
            return Err(Error::Output("Output context is closed".to_string()));
        }
        let (handle, completion) = PlaybackHandle::pair();
        let (reply, started) = channel::bounded(1);
        self.commands
            .send(Command::Play {
                buffer,
                completion,
                reply,
            })
            .map_err(|_| Error::Output("Audio thread is gone".to_string()))?;

        match started.recv() {
            Ok(result) => result?,
            Err(_) => return Err(Error::Output("Audio thread is gone".to_string())),
        }
        Ok(handle)
    }

    fn close(&self) {
        if self.state.swap(STATE_CLOSED, Ordering::SeqCst) == STATE_CLOSED {
            return;
        }
        let _ = self.commands.send(Command::Close);
        if let Some(thread) = self.thread.lock().take() {
            let _ = thread.join();
        }
        log::info!("Audio output context closed");
    }
}

impl Drop for CpalContext {
    fn drop(&mut self) {
        self.close();
    }
}

fn open_default_device() -> Result<cpal::Device> {
    cpal::default_host()
        .default_output_device()
        .ok_or_else(|| Error::Output("No output device available".to_string()))
}

/// A playing (or paused) stream and the completion of its source
struct ActiveSource {
    stream: Stream,
    completion: SharedCompletion,
}

fn run_output_thread(device: cpal::Device, commands: Receiver<Command>, mut suspended: bool) {
    // Dropping the stream stops it and drops the completion of the old source
    let mut current: Option<ActiveSource> = None;

    while let Ok(command) = commands.recv() {
        match command {
            Command::Play {
                buffer,
                completion,
                reply,
            } => {
                current = None;
                let result = start_source(&device, buffer, completion, suspended).map(|source| {
                    current = Some(source);
                });
                if let Err(e) = &result {
                    log::error!("{}", e);
                }
                let _ = reply.send(result);
            }
            Command::Suspend => {
                suspended = true;
                if let Some(source) = &current {
                    let _ = source.stream.pause();
                }
            }
            Command::Resume => {
                suspended = false;
                if let Some(source) = &current {
                    if let Err(e) = source.stream.play() {
                        let message = format!("Failed to resume stream: {}", e);
                        log::error!("{}", message);
                        fail_source(&source.completion, message);
                    }
                }
            }
            Command::Close => break,
        }
    }
}

fn start_source(
    device: &cpal::Device,
    buffer: Arc<DecodedAudioBuffer>,
    completion: PlaybackCompletion,
    suspended: bool,
) -> Result<ActiveSource> {
    let completion: SharedCompletion = Arc::new(Mutex::new(Some(completion)));
    let stream = build_source_stream(device, buffer, completion.clone())?;
    if !suspended {
        stream
            .play()
            .map_err(|e| Error::Output(format!("Failed to start stream: {}", e)))?;
    }
    Ok(ActiveSource { stream, completion })
}

/// Report a device error to whoever waits on the source
fn fail_source(completion: &SharedCompletion, message: String) {
    if let Some(completion) = completion.lock().take() {
        completion.fail(Error::Output(message));
    }
}

fn build_source_stream(
    device: &cpal::Device,
    buffer: Arc<DecodedAudioBuffer>,
    completion: SharedCompletion,
) -> Result<Stream> {
    let config = device
        .default_output_config()
        .map_err(|e| Error::Output(format!("Failed to get default output config: {}", e)))?;
    let cursor = SourceCursor::new(
        buffer,
        config.sample_rate().0,
        config.channels() as usize,
        completion.clone(),
    );

    match config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(device, &config.into(), cursor, completion),
        cpal::SampleFormat::I16 => build_stream::<i16>(device, &config.into(), cursor, completion),
        cpal::SampleFormat::U16 => build_stream::<u16>(device, &config.into(), cursor, completion),
        format => Err(Error::Output(format!("Unsupported sample format: {:?}", format))),
    }
}

fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut cursor: SourceCursor,
    completion: SharedCompletion,
) -> Result<Stream> {
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| cursor.fill(data),
            move |err| {
                log::error!("Audio output error: {}", err);
                fail_source(&completion, format!("Audio output error: {}", err));
            },
            None,
        )
        .map_err(|e| Error::Output(format!("Failed to build output stream: {}", e)))
}

/// Reads a decoded buffer at the device rate, mapping source channels onto
/// device channels and interpolating linearly between frames
struct SourceCursor {
    buffer: Arc<DecodedAudioBuffer>,
    position: f64,
    step: f64,
    out_channels: usize,
    completion: SharedCompletion,
    done: bool,
}

impl SourceCursor {
    fn new(
        buffer: Arc<DecodedAudioBuffer>,
        device_rate: u32,
        out_channels: usize,
        completion: SharedCompletion,
    ) -> Self {
        let step = buffer.sample_rate() as f64 / device_rate.max(1) as f64;
        Self {
            buffer,
            position: 0.0,
            step,
            out_channels: out_channels.max(1),
            completion,
            done: false,
        }
    }

    fn fill<T: cpal::SizedSample + cpal::FromSample<f32>>(&mut self, data: &mut [T]) {
        let frames = self.buffer.frame_count();
        let src_channels = self.buffer.channel_count() as usize;

        for frame in data.chunks_mut(self.out_channels) {
            let index = self.position as usize;
            if index >= frames {
                for sample in frame.iter_mut() {
                    *sample = T::from_sample(0.0);
                }
                continue;
            }
            let frac = (self.position - index as f64) as f32;
            for (ch, sample) in frame.iter_mut().enumerate() {
                let src = ch.min(src_channels - 1);
                let a = self.buffer.sample_at(src, index);
                let b = self.buffer.sample_at(src, index + 1);
                *sample = T::from_sample(a + (b - a) * frac);
            }
            self.position += self.step;
        }

        if !self.done && self.position as usize >= frames {
            self.done = true;
            if let Some(completion) = self.completion.lock().take() {
                completion.complete();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_cursor(
        buffer: DecodedAudioBuffer,
        device_rate: u32,
        out_channels: usize,
    ) -> (SourceCursor, PlaybackHandle, SharedCompletion) {
        let (handle, completion) = PlaybackHandle::pair();
        let shared: SharedCompletion = Arc::new(Mutex::new(Some(completion)));
        let cursor = SourceCursor::new(Arc::new(buffer), device_rate, out_channels, shared.clone());
        (cursor, handle, shared)
    }

    fn completed(handle: &mut PlaybackHandle) -> bool {
        matches!(handle.done.try_recv(), Ok(Ok(())))
    }

    #[test]
    fn test_completes_when_buffer_runs_out() {
        let buffer = DecodedAudioBuffer::from_channels(24000, vec![vec![0.25, 0.5, 0.75]]);
        let (mut cursor, mut handle, _) = open_cursor(buffer, 24000, 1);

        let mut data = [0.0f32; 2];
        cursor.fill(&mut data);
        assert_eq!(data, [0.25, 0.5]);
        assert!(!completed(&mut handle));

        let mut data = [1.0f32; 2];
        cursor.fill(&mut data);
        assert_eq!(data, [0.75, 0.0]);
        assert!(completed(&mut handle));
    }

    #[test]
    fn test_empty_buffer_completes_on_first_fill() {
        let buffer = DecodedAudioBuffer::silence(24000, 1, 0);
        let (mut cursor, mut handle, _) = open_cursor(buffer, 48000, 2);

        let mut data = [1.0f32; 4];
        cursor.fill(&mut data);

        assert_eq!(data, [0.0; 4]);
        assert!(completed(&mut handle));
    }

    #[test]
    fn test_mono_source_fans_out_to_every_device_channel() {
        let buffer = DecodedAudioBuffer::from_channels(24000, vec![vec![0.5, -0.5]]);
        let (mut cursor, _handle, _) = open_cursor(buffer, 24000, 2);

        let mut data = [0.0f32; 4];
        cursor.fill(&mut data);

        assert_eq!(data, [0.5, 0.5, -0.5, -0.5]);
    }

    #[test]
    fn test_interpolates_up_to_device_rate() {
        let buffer = DecodedAudioBuffer::from_channels(12000, vec![vec![0.0, 1.0]]);
        let (mut cursor, mut handle, _) = open_cursor(buffer, 24000, 1);

        let mut data = [0.0f32; 4];
        cursor.fill(&mut data);

        assert_eq!(data, [0.0, 0.5, 1.0, 0.5]);
        assert!(completed(&mut handle));
    }

    #[tokio::test]
    async fn test_device_error_fails_pending_source() {
        let buffer = DecodedAudioBuffer::silence(24000, 1, 4);
        let (mut cursor, handle, shared) = open_cursor(buffer, 24000, 1);

        fail_source(&shared, "device unplugged".to_string());
        // Reaching the end afterwards must not report success
        cursor.fill(&mut [0.0f32; 8]);

        assert!(matches!(handle.finished().await, Err(Error::Output(_))));
    }
}
