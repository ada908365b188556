//! Property tests: decoding the encode-equivalent response of an assistant
//! message reproduces it exactly, and image payloads survive encoding
//! byte-for-byte.

use base64::Engine;
use chatwire::{
    ChatMessage, ContentPart, Provider, adapter_for, encode_for_provider, validate_history,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn openai_text_round_trip(text in ".*") {
        let original = ChatMessage::assistant(text);
        let response = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": original.content_text() } }]
        });

        let decoded = adapter_for(Provider::OpenAi).decode(&response).expect("decode");
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn google_text_round_trip(text in ".*") {
        let original = ChatMessage::assistant(text);
        let encoded = adapter_for(Provider::Google)
            .encode(std::slice::from_ref(&original))
            .expect("encode");
        let response = serde_json::json!({
            "candidates": [{ "content": encoded["contents"][0] }]
        });

        let decoded = adapter_for(Provider::Google).decode(&response).expect("decode");
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn anthropic_text_round_trip(text in ".*") {
        let original = ChatMessage::assistant(text);
        let encoded = adapter_for(Provider::Anthropic)
            .encode(std::slice::from_ref(&original))
            .expect("encode");
        let response = serde_json::json!({
            "content": encoded["messages"][0]["content"]
        });

        let decoded = adapter_for(Provider::Anthropic).decode(&response).expect("decode");
        prop_assert_eq!(decoded, original);
    }

    #[test]
    fn image_payload_survives_every_encoder(bytes in proptest::collection::vec(any::<u8>(), 1..256)) {
        let data = base64::engine::general_purpose::STANDARD.encode(&bytes);
        let history = vec![ChatMessage::user_parts(vec![
            ContentPart::image("image/png", data.clone()).expect("image"),
        ])];
        prop_assert!(validate_history(&history).is_empty());

        let openai = encode_for_provider(&history, Provider::OpenAi).expect("encode");
        let url = openai["messages"][0]["content"][0]["image_url"]["url"]
            .as_str()
            .expect("data url");
        prop_assert_eq!(url, format!("data:image/png;base64,{data}"));

        let google = encode_for_provider(&history, Provider::Google).expect("encode");
        prop_assert_eq!(
            google["contents"][0]["parts"][0]["inlineData"]["data"].as_str(),
            Some(data.as_str())
        );

        let anthropic = encode_for_provider(&history, Provider::Anthropic).expect("encode");
        prop_assert_eq!(
            anthropic["messages"][0]["content"][0]["source"]["data"].as_str(),
            Some(data.as_str())
        );
    }

    #[test]
    fn validation_is_idempotent_over_arbitrary_text_histories(
        texts in proptest::collection::vec(".*", 0..6)
    ) {
        let history: Vec<ChatMessage> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                if i % 2 == 0 {
                    ChatMessage::user(text)
                } else {
                    ChatMessage::assistant(text)
                }
            })
            .collect();

        let first = validate_history(&history);
        let second = validate_history(&history);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.is_empty());
    }
}
