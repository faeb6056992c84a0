//! One-shot helpers for quick usage

use crate::client::OpenRouterClient;
use crate::config::{ClientConfig, DEFAULT_MODEL};
use crate::error::Result;
use crate::types::ChatOptions;

/// Send one message with a freshly built client
///
/// # Arguments
/// * `message` - The message to send
/// * `api_key` - API key; falls back to `OPENROUTER_API_KEY` when `None`
/// * `model` - Model to use; defaults to [`DEFAULT_MODEL`]
pub async fn quick_chat(message: &str, api_key: Option<&str>, model: Option<&str>) -> Result<String> {
    quick_chat_with_config(quick_config(api_key, model), message).await
}

/// Alias for [`quick_chat`]
pub async fn ask_ai(message: &str, api_key: Option<&str>, model: Option<&str>) -> Result<String> {
    quick_chat(message, api_key, model).await
}

pub(crate) fn quick_config(api_key: Option<&str>, model: Option<&str>) -> ClientConfig {
    let config = ClientConfig::new().with_default_model(model.unwrap_or(DEFAULT_MODEL));
    match api_key {
        Some(key) => config.with_api_key(key),
        None => config,
    }
}

pub(crate) async fn quick_chat_with_config(config: ClientConfig, message: &str) -> Result<String> {
    let client = OpenRouterClient::new(config)?;
    client.simple_chat(message, ChatOptions::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_quick_config() {
        let config = quick_config(Some("test-key"), None);
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.default_model, "openrouter/cypher-alpha:free");
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");

        let config = quick_config(None, Some("openai/gpt-3.5-turbo"));
        assert!(config.api_key.is_none());
        assert_eq!(config.default_model, "openai/gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_ask_ai_matches_quick_chat() {
        let quick = quick_chat("Hello", Some("bad\nkey"), None).await.unwrap_err();
        let ask = ask_ai("Hello", Some("bad\nkey"), None).await.unwrap_err();

        assert_eq!(ask.kind(), crate::ErrorKind::Configuration);
        assert_eq!(ask.kind(), quick.kind());
        assert_eq!(ask.to_string(), quick.to_string());
    }

    #[tokio::test]
    async fn test_quick_chat_makes_one_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "openrouter/cypher-alpha:free",
                "messages": [{"role": "user", "content": "Hello"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"choices": [{"message": {"role": "assistant", "content": "Test response"}}]})
                    .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let config = quick_config(Some("test-key"), None).with_base_url(server.url());
        let response = quick_chat_with_config(config, "Hello").await.unwrap();

        assert_eq!(response, "Test response");
        mock.assert_async().await;
    }
}
