//! Client configuration and credential resolution

use serde::{Deserialize, Serialize};

use crate::error::{OpenRouterError, Result};

/// Default OpenRouter API endpoint
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Model used when a request does not name one
pub const DEFAULT_MODEL: &str = "openrouter/cypher-alpha:free";

/// Environment variable consulted when no API key is passed explicitly
pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";

/// Configuration for [`OpenRouterClient`](crate::OpenRouterClient)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Explicit API key; takes precedence over `OPENROUTER_API_KEY`
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_model: String,
    /// Sent as `HTTP-Referer` for rankings on openrouter.ai
    pub site_url: Option<String>,
    /// Sent as `X-Title` for rankings on openrouter.ai
    pub site_name: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            site_url: None,
            site_name: None,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default endpoint and model
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default model
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the site URL
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = Some(site_url.into());
        self
    }

    /// Set the site name
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    /// Resolve the API key from the explicit setting or the process environment
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key using `lookup` for the environment fallback
    ///
    /// Empty strings count as missing.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| lookup(API_KEY_ENV_VAR).filter(|key| !key.is_empty()))
            .ok_or_else(|| {
                OpenRouterError::Configuration(format!(
                    "API key is required. Set {} environment variable or pass api_key parameter.",
                    API_KEY_ENV_VAR
                ))
            })
    }
}
