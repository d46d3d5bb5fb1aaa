//! Application layer for dezin
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::RetryPolicy;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway, LlmSession, RetryClass},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::generate_ui::{GenerateUiError, GenerateUiUseCase};
pub use use_cases::run_pipeline::{RunPipelineUseCase, degraded_explanation};
pub use use_cases::stages::StageRunner;
pub use use_cases::transport::ModelTransport;
