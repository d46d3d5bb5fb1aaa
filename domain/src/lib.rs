//! Domain layer for dezin
//!
//! This crate contains the core business logic, entities, and value objects
//! of the UI generation engine. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **Model Hierarchy**: ranked candidate models, best to worst
//! - **Attempt Order**: the hierarchy rotated to start at the user's choice
//! - **Pipeline**: Plan, then Generate and Explain, against one model
//! - **Fallback Note**: disclosure appended when another model was used

pub mod core;
pub mod generation;
pub mod hierarchy;
pub mod prompt;

// Re-export commonly used types
pub use core::{credential::ApiKey, error::DomainError, model::ModelId};
pub use generation::{
    entities::{
        AttemptRecord, ChatMessage, GeneratedUi, GenerationRequest, PipelineOutcome, PlanDocument,
        RequestResult, Role, UiResponse,
    },
    failure::{ErrorClass, FailureTag, Stage, StageFailure},
    parsing::{extract_plan_json, strip_code_fences},
    report::AttemptHistory,
};
pub use hierarchy::{AttemptOrder, ModelHierarchy};
pub use prompt::PromptTemplate;
