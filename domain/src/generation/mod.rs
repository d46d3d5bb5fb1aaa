//! UI generation subdomain.
//!
//! - [`failure`] — stages, error classes and wire failure tags
//! - [`entities`] — request, plan, per-model outcome and final result
//! - [`report`] — failure history and the fallback / failure narratives
//! - [`parsing`] — plan JSON extraction and code fence stripping

pub mod entities;
pub mod failure;
pub mod parsing;
pub mod report;
