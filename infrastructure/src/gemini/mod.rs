//! Gemini adapter
//!
//! Implements the [`LlmGateway`](dezin_application::LlmGateway) port over the
//! Gemini `generateContent` REST endpoint.

pub mod error;
pub mod gateway;
pub mod session;
pub mod types;

pub use error::GeminiError;
pub use gateway::GeminiGateway;
pub use session::GeminiSession;
