//! Progress notification port
//!
//! Defines the interface for reporting progress while a request walks the
//! attempt order.

use dezin_domain::{AttemptRecord, ModelId, Stage};
use std::time::Duration;

/// Callback for progress updates during UI generation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a pipeline attempt starts against `model`
    fn on_attempt_start(&self, model: &ModelId, index: usize, total: usize);

    /// Called when a stage resolves within the current attempt
    fn on_stage_complete(&self, model: &ModelId, stage: Stage, success: bool);

    /// Called when a pipeline attempt fails and the orchestrator moves on
    fn on_attempt_failed(&self, record: &AttemptRecord);

    /// Called before the Transport backs off and retries
    fn on_retry(&self, _model: &ModelId, _attempt: u32, _delay: Duration) {}

    /// Called when a pipeline attempt succeeds
    fn on_attempt_succeeded(&self, _model: &ModelId) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_attempt_start(&self, _model: &ModelId, _index: usize, _total: usize) {}
    fn on_stage_complete(&self, _model: &ModelId, _stage: Stage, _success: bool) {}
    fn on_attempt_failed(&self, _record: &AttemptRecord) {}
}
