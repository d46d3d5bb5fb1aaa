//! Error types for the Gemini adapter

use dezin_application::GatewayError;
use thiserror::Error;

/// Errors that can occur when talking to the Gemini REST API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("[{status}] {message}")]
    Api {
        status: u16,
        message: String,
        retry_hint: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Api {
                status,
                message,
                retry_hint,
            } => GatewayError::Http {
                status,
                message,
                retry_hint,
            },
            GeminiError::Transport(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Transport(e) if e.is_connect() => {
                GatewayError::ConnectionError(e.to_string())
            }
            GeminiError::Transport(e) => GatewayError::RequestFailed(e.to_string()),
            GeminiError::Decode(e) => GatewayError::RequestFailed(e.to_string()),
        }
    }
}
