use alphabet_magic::audio::output::{ContextState, CpalContext, OutputContext, PlaybackHandle};
use alphabet_magic::audio::DecodedAudioBuffer;
use alphabet_magic::error::Error;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_handle_resolves_on_completion() {
    let (handle, completion) = PlaybackHandle::pair();

    completion.complete();

    assert!(handle.finished().await.unwrap());
}

#[tokio::test]
async fn test_handle_reports_dropped_source() {
    let (handle, completion) = PlaybackHandle::pair();

    drop(completion);

    assert!(!handle.finished().await.unwrap());
}

#[tokio::test]
async fn test_handle_reports_device_failure() {
    let (handle, completion) = PlaybackHandle::pair();

    completion.fail(Error::Output("stream error".to_string()));

    assert!(matches!(handle.finished().await, Err(Error::Output(_))));
}

#[tokio::test]
#[ignore] // Requires an audio output device
async fn test_cpal_context_plays_silence() {
    let context = CpalContext::new().unwrap();
    assert_eq!(context.state(), ContextState::Running);

    // 100ms of mono silence at the speech rate
    let buffer = Arc::new(DecodedAudioBuffer::silence(24000, 1, 2400));
    let handle = context.start(buffer).unwrap();

    let finished = tokio::time::timeout(Duration::from_secs(2), handle.finished())
        .await
        .unwrap();
    assert!(finished.unwrap());

    context.close();
    assert_eq!(context.state(), ContextState::Closed);
}

#[tokio::test]
#[ignore] // Requires an audio output device
async fn test_cpal_context_resume() {
    let context = CpalContext::new_suspended().unwrap();
    assert_eq!(context.state(), ContextState::Suspended);

    context.resume().await.unwrap();
    assert_eq!(context.state(), ContextState::Running);

    context.suspend().unwrap();
    assert_eq!(context.state(), ContextState::Suspended);
}

#[tokio::test]
#[ignore] // Requires an audio output device
async fn test_closed_context_refuses_sources() {
    let context = CpalContext::new().unwrap();
    context.close();

    let buffer = Arc::new(DecodedAudioBuffer::silence(24000, 1, 10));
    assert!(context.start(buffer).is_err());
}
