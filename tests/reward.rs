use alphabet_magic::error::Error;
use alphabet_magic::game::reward::{fetch_reward, FALLBACK_MESSAGE, LOADING_MESSAGE};
use alphabet_magic::game::{ImageGenerator, RewardImage, RewardState};
use async_trait::async_trait;

enum FakeImages {
    Picture,
    Nothing,
    Broken,
}

#[async_trait]
impl ImageGenerator for FakeImages {
    async fn generate_image(&self, word: &str) -> alphabet_magic::Result<Option<RewardImage>> {
        match self {
            FakeImages::Picture => Ok(Some(RewardImage::new("image/png", format!("{}==", word)))),
            FakeImages::Nothing => Ok(None),
            FakeImages::Broken => Err(Error::Api {
                status: 500,
                message: "internal".to_string(),
            }),
        }
    }
}

#[test]
fn test_data_uri_round_trip() {
    let image = RewardImage::new("image/png", "iVBORw0KGgo=");

    let uri = image.to_data_uri();

    assert_eq!(uri, "data:image/png;base64,iVBORw0KGgo=");
    assert_eq!(RewardImage::from_data_uri(&uri).unwrap(), image);
}

#[test]
fn test_bad_data_uri() {
    assert!(RewardImage::from_data_uri("https://example.test/cat.png").is_err());
    assert!(RewardImage::from_data_uri("data:image/png,rawbytes").is_err());
}

#[test]
fn test_image_bytes_and_extension() {
    let image = RewardImage::new("image/jpeg", "/9j/");

    assert_eq!(image.bytes().unwrap(), vec![0xFFu8, 0xD8, 0xFF]);
    assert_eq!(image.extension(), "jpg");
    assert_eq!(RewardImage::new("image/unknown", "").extension(), "bin");
}

#[tokio::test]
async fn test_fetch_reward_ready() {
    let state = fetch_reward(&FakeImages::Picture, "Frog").await;

    assert_eq!(state, RewardState::Ready(RewardImage::new("image/png", "Frog==")));
    assert_eq!(state.message(), None);
}

#[tokio::test]
async fn test_fetch_reward_falls_back() {
    assert_eq!(fetch_reward(&FakeImages::Nothing, "Frog").await, RewardState::Fallback);
    assert_eq!(fetch_reward(&FakeImages::Broken, "Frog").await, RewardState::Fallback);
    assert_eq!(RewardState::Fallback.message(), Some(FALLBACK_MESSAGE));
    assert_eq!(RewardState::Loading.message(), Some(LOADING_MESSAGE));
}
