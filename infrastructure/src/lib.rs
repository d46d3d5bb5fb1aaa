//! Infrastructure layer for dezin
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, FileConfig, FileGeminiConfig, FileModelsConfig,
    FileRetryConfig, Severity,
};
pub use gemini::{GeminiError, GeminiGateway, GeminiSession};
