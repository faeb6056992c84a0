//! HTTP transport for OpenAI-compatible chat completion APIs

use async_openai::config::{Config, OpenAIConfig};
use async_openai::error::OpenAIError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::error::Category;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::types::{ChatCompletion, ModelDescriptor};

/// Failure inside a [`Transport`]
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection-level failure; the request URL is stripped
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// Non-success HTTP status with the raw response body
    #[error("HTTP {status} {}: {body}", status_reason(.status))]
    Status { status: u16, body: String },

    /// Error object returned in a success response
    #[error("Provider error {}: {message}", error_code(.code))]
    Remote {
        code: Option<i64>,
        message: String,
        body: Value,
    },

    #[error("Invalid response: {}", decode_reason(.0))]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Sdk(#[from] OpenAIError),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

fn status_reason(status: &u16) -> &'static str {
    StatusCode::from_u16(*status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
}

fn decode_reason(err: &serde_json::Error) -> &'static str {
    match err.classify() {
        Category::Io => "read failure",
        Category::Syntax => "malformed JSON",
        Category::Data => "unexpected JSON shape",
        Category::Eof => "truncated JSON",
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }
}

fn error_code(code: &Option<i64>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "(no code)".to_string())
}

/// The remote calls the client depends on
///
/// Implementations perform exactly one round trip per call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `POST /chat/completions` with a fully built JSON body
    async fn create_chat_completion(&self, body: Value) -> Result<ChatCompletion, TransportError>;

    /// `GET /models`, returning the `data` entries in order
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, TransportError>;
}

#[derive(Deserialize)]
struct RemoteError {
    message: String,
    #[serde(default)]
    code: Option<Value>,
}

#[derive(Deserialize)]
struct ModelListing {
    data: Vec<ModelDescriptor>,
}

/// [`Transport`] over HTTPS using reqwest
pub struct HttpTransport {
    config: OpenAIConfig,
    http: reqwest::Client,
    headers: HeaderMap,
}

impl HttpTransport {
    /// Create a transport bound to `base_url` and `api_key`
    ///
    /// `extra_headers` are sent with every request in addition to the bearer
    /// authorization header.
    pub fn new(
        base_url: &str,
        api_key: &str,
        extra_headers: &BTreeMap<String, String>,
    ) -> Result<Self, TransportError> {
        let config = OpenAIConfig::new().with_api_base(base_url.trim_end_matches('/'));

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
            TransportError::InvalidHeader(
                "Authorization: API key is not a valid header value".to_string(),
            )
        })?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        for (name, value) in extra_headers {
            let invalid = |e: &dyn std::fmt::Display| {
                TransportError::InvalidHeader(format!("{}: {}", name, e))
            };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(&e))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid(&e))?;
            headers.insert(header_name, header_value);
        }

        Ok(Self {
            config,
            http: reqwest::Client::new(),
            headers,
        })
    }

    /// Full URL for an API path such as `/models`
    pub fn url(&self, path: &str) -> String {
        self.config.url(path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Response status: {}, {} bytes", status, body.len());

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        if let Some(error) = value.get("error").filter(|e| e.is_object()) {
            let remote: RemoteError = serde_json::from_value(error.clone())?;
            let code = remote.code.as_ref().and_then(|c| match c {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            });
            return Err(TransportError::Remote {
                code,
                message: remote.message,
                body: value,
            });
        }

        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn create_chat_completion(&self, body: Value) -> Result<ChatCompletion, TransportError> {
        let url = self.url("/chat/completions");
        debug!("POST {} (model: {})", url, body["model"]);

        let response = self
            .http
            .post(url)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, TransportError> {
        let url = self.url("/models");
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let listing: ModelListing = Self::decode(response).await?;
        Ok(listing.data)
    }
}
