use alphabet_magic::game::Difficulty;
use alphabet_magic::gemini::messages::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, SpeechConfig,
};
use alphabet_magic::gemini::{parse_riddle, reward_prompt, riddle_prompt, GeminiClient};
use alphabet_magic::GameConfig;
use serde_json::Value;

#[test]
fn test_speech_request_serialization() {
    let request = GenerateContentRequest::text("What says moo?").with_config(GenerationConfig {
        response_modalities: Some(vec!["AUDIO".to_string()]),
        speech_config: Some(SpeechConfig::prebuilt("Puck")),
        ..Default::default()
    });

    let json: Value = serde_json::to_value(&request).unwrap();

    assert_eq!(json["contents"][0]["parts"][0]["text"], "What says moo?");
    assert_eq!(json["generationConfig"]["responseModalities"][0], "AUDIO");
    assert_eq!(
        json["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
        "Puck"
    );
    assert!(json["generationConfig"].get("responseSchema").is_none());
    assert!(json["contents"][0].get("role").is_none());
}

#[test]
fn test_image_request_serialization() {
    let request = GenerateContentRequest::text(reward_prompt("Frog")).with_config(GenerationConfig {
        image_config: Some(ImageConfig {
            aspect_ratio: "1:1".to_string(),
        }),
        ..Default::default()
    });

    let json = serde_json::to_string(&request).unwrap();

    assert!(json.contains("\"imageConfig\":{\"aspectRatio\":\"1:1\"}"));
    assert!(json.contains("cartoon illustration of a Frog."));
}

#[test]
fn test_speech_response_inline_data() {
    let json = r#"{
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": "AAAA" } }]
            }
        }]
    }"#;

    let response: GenerateContentResponse = serde_json::from_str(json).unwrap();

    let data = response.leading_inline_data().unwrap();
    assert_eq!(data.data, "AAAA");
    assert!(response.text().is_none());
}

#[test]
fn test_image_response_skips_text_parts() {
    let json = r#"{
        "candidates": [{
            "content": {
                "parts": [
                    { "text": "Here is your frog!" },
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
                ]
            }
        }]
    }"#;

    let response: GenerateContentResponse = serde_json::from_str(json).unwrap();

    assert!(response.leading_inline_data().is_none());
    let image = response.find_inline_data().unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data, "iVBORw0KGgo=");
}

#[test]
fn test_empty_response_has_nothing() {
    let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();

    assert!(response.text().is_none());
    assert!(response.find_inline_data().is_none());
    assert!(parse_riddle(&response).is_err());
}

#[test]
fn test_parse_riddle_response() {
    let json = r#"{
        "candidates": [{
            "content": {
                "parts": [{ "text": "{\"question\": \"I am orange and crunchy.\", \"answer\": \"Carrot\", \"options\": [\"Cake\", \"Corn\", \"Cat\"]}" }]
            }
        }]
    }"#;
    let response: GenerateContentResponse = serde_json::from_str(json).unwrap();

    let riddle = parse_riddle(&response).unwrap();

    assert_eq!(riddle.question, "I am orange and crunchy.");
    assert_eq!(riddle.answer, "Carrot");
    assert_eq!(riddle.distractors.len(), 3);
}

#[test]
fn test_riddle_prompt_mentions_letter_and_difficulty() {
    let plain = riddle_prompt('K', None);
    assert!(plain.contains("starts with the letter 'K'"));
    assert!(plain.contains("3 distinct wrong answers"));
    assert!(plain.ends_with("Return the response in JSON format."));
    assert!(!plain.contains("Make it"));

    let hard = riddle_prompt('K', Some(Difficulty::Hard));
    assert!(hard.contains("Make it hard"));
}

#[test]
fn test_client_endpoint() {
    let config = GameConfig {
        api_key: Some("test-key".to_string()),
        api_base: "https://example.test/v1beta/".to_string(),
        ..Default::default()
    };

    let client = GeminiClient::from_config(&config).unwrap();

    assert_eq!(
        client.endpoint("gemini-2.5-flash"),
        "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn test_client_requires_api_key() {
    assert!(GeminiClient::from_config(&GameConfig::default()).is_err());
}
