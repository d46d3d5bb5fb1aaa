//! Scripted test doubles shared by the use case tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use dezin_domain::{ApiKey, AttemptRecord, ModelId, PromptTemplate, Stage};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) const PLAN_JSON: &str = r#"{"type":"div","layout":"app-shell","children":[]}"#;

/// One scripted reply, optionally delayed
#[derive(Clone)]
pub(crate) struct Step {
    delay: Duration,
    result: Result<String, GatewayError>,
}

impl Step {
    pub(crate) fn reply(text: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(text.to_string()),
        }
    }

    pub(crate) fn fail(error: GatewayError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    pub(crate) fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub(crate) fn rate_limited() -> GatewayError {
    GatewayError::http(429, "Resource has been exhausted (e.g. check quota).")
}

pub(crate) fn overloaded() -> GatewayError {
    GatewayError::http(503, "The model is overloaded. Please try again later.")
}

pub(crate) fn test_key() -> ApiKey {
    ApiKey::new("test-key").unwrap()
}

#[derive(Default)]
struct ScriptState {
    /// Queue per (model, stage). The last step repeats once the queue is drained.
    scripts: HashMap<(String, Stage), VecDeque<Step>>,
    calls: Vec<(ModelId, Stage)>,
}

/// Gateway answering from per-model, per-stage scripts.
///
/// The stage is recognised from the system instruction. Unscripted calls
/// fail with a non-transient error.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(self, model: &str, stage: Stage, steps: Vec<Step>) -> Self {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert((model.to_string(), stage), steps.into());
        self
    }

    /// Plan, Generate and Explain all succeed for `model`.
    pub(crate) fn healthy(self, model: &str) -> Self {
        self.script(model, Stage::Plan, vec![Step::reply(PLAN_JSON)])
            .script(model, Stage::Generate, vec![Step::reply("const UI = 1;")])
            .script(
                model,
                Stage::Explain,
                vec![Step::reply(&format!("{} explains the layout", model))],
            )
    }

    pub(crate) fn calls(&self) -> Vec<(ModelId, Stage)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn call_count(&self, model: &str, stage: Stage) -> usize {
        self.calls()
            .iter()
            .filter(|(m, s)| m == model && *s == stage)
            .count()
    }

    fn stage_for(system_prompt: &str) -> Stage {
        if system_prompt == PromptTemplate::planner_system() {
            Stage::Plan
        } else if system_prompt == PromptTemplate::generator_system() {
            Stage::Generate
        } else {
            Stage::Explain
        }
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &ModelId,
        system_prompt: &str,
        _credential: &ApiKey,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(ScriptedSession {
            model: model.clone(),
            stage: Self::stage_for(system_prompt),
            state: Arc::clone(&self.state),
        }))
    }
}

struct ScriptedSession {
    model: ModelId,
    stage: Stage,
    state: Arc<Mutex<ScriptState>>,
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &ModelId {
        &self.model
    }

    async fn send(&self, _content: &str) -> Result<String, GatewayError> {
        let step = {
            let mut state = self.state.lock().unwrap();
            state.calls.push((self.model.clone(), self.stage));
            let key = (self.model.to_string(), self.stage);
            match state.scripts.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        let Some(step) = step else {
            return Err(GatewayError::Other(format!(
                "no script for {} / {}",
                self.model, self.stage
            )));
        };

        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        step.result
    }
}

/// Progress notifier that records every event as a line of text
#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub(crate) events: Mutex<Vec<String>>,
    pub(crate) retry_delays: Mutex<Vec<Duration>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn retry_delays(&self) -> Vec<Duration> {
        self.retry_delays.lock().unwrap().clone()
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_attempt_start(&self, model: &ModelId, index: usize, total: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {} {}/{}", model, index + 1, total));
    }

    fn on_stage_complete(&self, model: &ModelId, stage: Stage, success: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("stage {} {} {}", model, stage, success));
    }

    fn on_attempt_failed(&self, record: &AttemptRecord) {
        self.events
            .lock()
            .unwrap()
            .push(format!("failed {} {}", record.model, record.stage));
    }

    fn on_retry(&self, model: &ModelId, attempt: u32, delay: Duration) {
        self.retry_delays.lock().unwrap().push(delay);
        self.events
            .lock()
            .unwrap()
            .push(format!("retry {} #{}", model, attempt));
    }

    fn on_attempt_succeeded(&self, model: &ModelId) {
        self.events
            .lock()
            .unwrap()
            .push(format!("succeeded {}", model));
    }
}
