//! Prompt domain
//!
//! System instructions and prompt builders for the Plan, Generate and Explain stages.

mod template;

pub use template::PromptTemplate;
