//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod generate_ui;
pub mod run_pipeline;
pub mod stages;
pub mod transport;
