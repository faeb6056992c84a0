//! Error types for the OpenRouter client
//!
//! Every failure surfaced by [`OpenRouterClient`](crate::OpenRouterClient) is one
//! [`OpenRouterError`]. Transport failures are sorted into a variant by looking for
//! well-known markers in the failure text, since a structured status code is not
//! available for every kind of transport failure.

use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::warn;

use crate::transport::TransportError;

/// Discriminant of an [`OpenRouterError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    RateLimit,
    Api,
}

/// Sub-kind of [`OpenRouterError::Api`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The requested model (or endpoint) does not exist
    ModelNotFound,
    Other,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelNotFound => f.write_str("Model not found"),
            Self::Other => f.write_str("API error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OpenRouterError {
    /// No usable credential, raised before any request is made
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("{kind}: {message}")]
    Api {
        kind: ApiErrorKind,
        message: String,
        status_code: Option<u16>,
        response_data: Option<Value>,
    },
}

pub type Result<T> = std::result::Result<T, OpenRouterError>;

impl OpenRouterError {
    /// Create a generic API error without status or payload
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            kind: ApiErrorKind::Other,
            message: message.into(),
            status_code: None,
            response_data: None,
        }
    }

    /// Classify a failure message
    ///
    /// Markers are checked in order and the first match wins:
    /// `401`/"authentication", then `429`/"rate limit", then `404`/"not found".
    /// Anything else becomes a generic [`OpenRouterError::Api`].
    pub fn classify(message: impl Into<String>) -> Self {
        Self::classify_with(message.into(), None, None)
    }

    fn classify_with(
        message: String,
        status_code: Option<u16>,
        response_data: Option<Value>,
    ) -> Self {
        let lowered = message.to_lowercase();

        if message.contains("401") || lowered.contains("authentication") {
            Self::Authentication(message)
        } else if message.contains("429") || lowered.contains("rate limit") {
            Self::RateLimit(message)
        } else {
            let kind = if message.contains("404") || lowered.contains("not found") {
                ApiErrorKind::ModelNotFound
            } else {
                ApiErrorKind::Other
            };
            Self::Api {
                kind,
                message,
                status_code,
                response_data,
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Api { .. } => ErrorKind::Api,
        }
    }

    /// True for authentication failures and for a missing credential
    pub fn is_authentication(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Authentication | ErrorKind::Configuration
        )
    }

    pub fn is_model_not_found(&self) -> bool {
        matches!(
            self,
            Self::Api {
                kind: ApiErrorKind::ModelNotFound,
                ..
            }
        )
    }

    /// HTTP status reported by the transport, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Raw response payload reported by the transport, if any
    pub fn response_data(&self) -> Option<&Value> {
        match self {
            Self::Api { response_data, .. } => response_data.as_ref(),
            _ => None,
        }
    }
}

impl From<TransportError> for OpenRouterError {
    fn from(err: TransportError) -> Self {
        let (status_code, response_data) = match &err {
            TransportError::Status { status, body } => (
                Some(*status),
                Some(
                    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone())),
                ),
            ),
            TransportError::Remote { code, body, .. } => (
                code.and_then(|c| u16::try_from(c).ok()),
                Some(body.clone()),
            ),
            _ => (None, None),
        };

        let classified = Self::classify_with(err.to_string(), status_code, response_data);
        warn!("Request failed ({:?}): {}", classified.kind(), err);
        classified
    }
}
