//! Blocking wrapper around [`OpenRouterClient`](crate::OpenRouterClient)
//!
//! Each call drives one request to completion on the calling thread using a
//! private current-thread runtime. Do not call these from inside an async
//! context; use the async client there.

use std::collections::BTreeMap;
use std::future::Future;
use tokio::runtime::{Builder, Runtime};

use crate::client::OpenRouterClient as AsyncClient;
use crate::config::ClientConfig;
use crate::error::{OpenRouterError, Result};
use crate::quick::{quick_chat_with_config, quick_config};
use crate::transport::{HttpTransport, Transport};
use crate::types::{ChatOptions, Message, ModelDescriptor};

/// Blocking OpenRouter client
pub struct OpenRouterClient<T = HttpTransport> {
    inner: AsyncClient<T>,
    runtime: Runtime,
}

impl OpenRouterClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = AsyncClient::new(config)?;
        Ok(Self {
            inner,
            runtime: runtime()?,
        })
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new().with_api_key(api_key))
    }
}

impl<T: Transport> OpenRouterClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let inner = AsyncClient::with_transport(config, transport)?;
        Ok(Self {
            inner,
            runtime: runtime()?,
        })
    }

    /// The underlying async client
    pub fn inner(&self) -> &AsyncClient<T> {
        &self.inner
    }

    pub fn api_key(&self) -> &str {
        self.inner.api_key()
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    pub fn default_model(&self) -> &str {
        self.inner.default_model()
    }

    pub fn headers(&self) -> BTreeMap<String, String> {
        self.inner.headers()
    }

    pub fn chat(&self, messages: &[Message], options: ChatOptions) -> Result<String> {
        self.runtime.block_on(self.inner.chat(messages, options))
    }

    pub fn simple_chat(&self, message: &str, options: ChatOptions) -> Result<String> {
        self.runtime.block_on(self.inner.simple_chat(message, options))
    }

    pub fn get_models(&self) -> Result<Vec<ModelDescriptor>> {
        self.runtime.block_on(self.inner.get_models())
    }
}

/// Blocking version of [`crate::quick_chat`]
pub fn quick_chat(message: &str, api_key: Option<&str>, model: Option<&str>) -> Result<String> {
    block_on(quick_chat_with_config(quick_config(api_key, model), message))
}

/// Alias for [`quick_chat`]
pub fn ask_ai(message: &str, api_key: Option<&str>, model: Option<&str>) -> Result<String> {
    quick_chat(message, api_key, model)
}

fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| OpenRouterError::Configuration(format!("failed to start runtime: {}", e)))
}

fn block_on<F: Future<Output = Result<String>>>(future: F) -> Result<String> {
    runtime()?.block_on(future)
}
