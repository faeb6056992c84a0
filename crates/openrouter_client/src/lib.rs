//! openrouter_client: simple client for the OpenRouter API
//!
//! This library provides access to the models available through OpenRouter:
//! - `OpenRouterClient`: multi-turn chat, single messages and model listing
//! - `quick_chat` / `ask_ai`: one-off requests without keeping a client around
//! - `blocking`: the same surface for code without an async runtime
//! - Typed errors for authentication, rate limiting and other API failures
//!
//! # Example
//!
//! ```no_run
//! use openrouter_client::{ChatOptions, ClientConfig, Message, OpenRouterClient};
//!
//! #[tokio::main]
//! async fn main() -> openrouter_client::Result<()> {
//!     let client = OpenRouterClient::new(ClientConfig::new())?;
//!
//!     let answer = client
//!         .simple_chat("What is the meaning of life?", ChatOptions::default())
//!         .await?;
//!     println!("AI: {}", answer);
//!
//!     let conversation = vec![
//!         Message::user("Hello, how are you?"),
//!         Message::assistant("I'm doing well, thank you! How can I help you today?"),
//!         Message::user("Can you explain quantum computing in simple terms?"),
//!     ];
//!     let answer = client
//!         .chat(&conversation, ChatOptions::new().with_temperature(0.8))
//!         .await?;
//!     println!("AI: {}", answer);
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;
pub mod config;
pub mod types;

// Transport and client
pub mod transport;
pub mod client;
pub mod quick;
pub mod blocking;

pub use error::{ApiErrorKind, ErrorKind, OpenRouterError, Result};

pub use config::{ClientConfig, API_KEY_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_MODEL};

pub use types::{ChatCompletion, ChatOptions, Message, ModelDescriptor, Role};

pub use transport::{HttpTransport, Transport, TransportError};

pub use client::OpenRouterClient;

pub use quick::{ask_ai, quick_chat};
