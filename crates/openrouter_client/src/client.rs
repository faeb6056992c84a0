//! OpenRouter chat client

use async_openai::types::CreateChatCompletionRequestArgs;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{OpenRouterError, Result};
use crate::transport::{HttpTransport, Transport, TransportError};
use crate::types::{ChatOptions, Message, ModelDescriptor};

const REFERER_HEADER: &str = "HTTP-Referer";
const TITLE_HEADER: &str = "X-Title";

/// Client for sending chat messages to models available through OpenRouter
///
/// Every call is a single round trip. The client keeps no conversation state;
/// callers pass the full history to [`chat`](Self::chat) each time.
pub struct OpenRouterClient<T = HttpTransport> {
    config: ClientConfig,
    api_key: String,
    transport: T,
}

impl OpenRouterClient<HttpTransport> {
    /// Create a client talking HTTP to `config.base_url`
    ///
    /// Fails with [`OpenRouterError::Configuration`] when neither the config nor
    /// `OPENROUTER_API_KEY` provides an API key.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let transport = HttpTransport::new(
            &config.base_url,
            &api_key,
            &attribution_headers(&config),
        )
        .map_err(|e| OpenRouterError::Configuration(e.to_string()))?;

        debug!(
            "OpenRouter client ready: {} (default model: {})",
            config.base_url, config.default_model
        );

        Ok(Self {
            config,
            api_key,
            transport,
        })
    }

    /// Create a client with default settings and an explicit API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new().with_api_key(api_key))
    }
}

impl<T: Transport> OpenRouterClient<T> {
    /// Create a client on top of an existing transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self {
            config,
            api_key,
            transport,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    pub fn site_url(&self) -> Option<&str> {
        self.config.site_url.as_deref()
    }

    pub fn site_name(&self) -> Option<&str> {
        self.config.site_name.as_deref()
    }

    /// Attribution headers sent with every request
    pub fn headers(&self) -> BTreeMap<String, String> {
        attribution_headers(&self.config)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the JSON body for a chat completion request
    pub fn request_body(&self, messages: &[Message], options: &ChatOptions) -> Result<Value> {
        Ok(self.build_body(messages, options)?)
    }

    fn build_body(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> std::result::Result<Value, TransportError> {
        let messages = messages
            .iter()
            .map(Message::to_request_message)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(
            options
                .model
                .as_deref()
                .unwrap_or(&self.config.default_model),
        )
        .messages(messages);

        if let Some(max_tokens) = options.max_tokens {
            args.max_tokens(max_tokens);
        }
        if let Some(stop) = options.stop_param() {
            args.stop(stop);
        }

        let mut body = serde_json::to_value(args.build()?)?;
        if let Value::Object(fields) = &mut body {
            // Written as f64; the typed request would narrow them to f32
            let sampling = [
                ("temperature", options.temperature),
                ("top_p", options.top_p),
                ("frequency_penalty", options.frequency_penalty),
                ("presence_penalty", options.presence_penalty),
            ];
            for (key, value) in sampling {
                if let Some(value) = value {
                    fields.insert(key.to_string(), Value::from(value));
                }
            }
            for (key, value) in &options.extra {
                fields.insert(key.clone(), value.clone());
            }
        }

        Ok(body)
    }

    /// Send a conversation and return the text of the first choice
    ///
    /// # Arguments
    /// * `messages` - Conversation history, oldest first
    /// * `options` - Model override, sampling parameters and extra body fields
    ///
    /// # Errors
    /// [`OpenRouterError::Authentication`], [`OpenRouterError::RateLimit`] or
    /// [`OpenRouterError::Api`] depending on the failure text.
    pub async fn chat(&self, messages: &[Message], options: ChatOptions) -> Result<String> {
        let body = self.build_body(messages, &options)?;
        debug!(
            "Sending {} message(s) to {}",
            messages.len(),
            body["model"]
        );

        let completion = self.transport.create_chat_completion(body).await?;

        completion
            .first_content()
            .ok_or_else(|| OpenRouterError::api("Response contained no choices"))
    }

    /// Send a single user message
    pub async fn simple_chat(&self, message: &str, options: ChatOptions) -> Result<String> {
        self.chat(&[Message::user(message)], options).await
    }

    /// List the models available through the endpoint
    pub async fn get_models(&self) -> Result<Vec<ModelDescriptor>> {
        let models = self.transport.list_models().await?;
        debug!("Received {} model descriptors", models.len());
        Ok(models)
    }
}

fn attribution_headers(config: &ClientConfig) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    if let Some(site_url) = &config.site_url {
        headers.insert(REFERER_HEADER.to_string(), site_url.clone());
    }
    if let Some(site_name) = &config.site_name {
        headers.insert(TITLE_HEADER.to_string(), site_name.clone());
    }
    headers
}
