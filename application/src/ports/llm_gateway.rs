//! LLM Gateway port
//!
//! Defines the interface for communicating with the remote model provider.

use async_trait::async_trait;
use dezin_domain::{ApiKey, ModelId};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
///
/// HTTP failures always carry their status code in the `Display` form, which
/// is what transient classification matches on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("[{status}] {message}")]
    Http {
        status: u16,
        message: String,
        retry_hint: Option<String>,
    },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Failure signatures that the Transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// HTTP 429 equivalent
    RateLimit,
    /// HTTP 503 equivalent
    Overload,
    /// Call deadline expired
    Timeout,
}

impl GatewayError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Http {
            status,
            message: message.into(),
            retry_hint: None,
        }
    }

    /// Classify from the textual `429` / `503` markers in the message.
    pub fn retry_class(&self) -> Option<RetryClass> {
        if matches!(self, GatewayError::Timeout) {
            return Some(RetryClass::Timeout);
        }
        let text = self.to_string();
        if text.contains("429") {
            Some(RetryClass::RateLimit)
        } else if text.contains("503") {
            Some(RetryClass::Overload)
        } else {
            None
        }
    }

    /// Provider-suggested wait before retrying, when one was supplied.
    pub fn retry_hint(&self) -> Option<&str> {
        match self {
            GatewayError::Http { retry_hint, .. } => retry_hint.as_deref(),
            _ => None,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with the model
/// provider. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a session bound to one model, one system instruction and one credential
    async fn create_session_with_system_prompt(
        &self,
        model: &ModelId,
        system_prompt: &str,
        credential: &ApiKey,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &ModelId;

    /// Send a prompt and get the text completion
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_in_display() {
        let err = GatewayError::http(429, "Resource has been exhausted");
        assert_eq!(err.to_string(), "[429] Resource has been exhausted");
    }

    #[test]
    fn test_retry_class_from_markers() {
        assert_eq!(
            GatewayError::http(429, "quota").retry_class(),
            Some(RetryClass::RateLimit)
        );
        assert_eq!(
            GatewayError::http(503, "overloaded").retry_class(),
            Some(RetryClass::Overload)
        );
        assert_eq!(
            GatewayError::Other("upstream said 503 Service Unavailable".into()).retry_class(),
            Some(RetryClass::Overload)
        );
        assert_eq!(GatewayError::Timeout.retry_class(), Some(RetryClass::Timeout));
        assert_eq!(GatewayError::http(400, "bad request").retry_class(), None);
        assert_eq!(
            GatewayError::ConnectionError("refused".into()).retry_class(),
            None
        );
    }

    #[test]
    fn test_retry_hint() {
        let err = GatewayError::Http {
            status: 429,
            message: "quota".into(),
            retry_hint: Some("35s".into()),
        };
        assert_eq!(err.retry_hint(), Some("35s"));
        assert_eq!(GatewayError::Timeout.retry_hint(), None);
    }
}
