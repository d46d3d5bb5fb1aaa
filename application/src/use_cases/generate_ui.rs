//! Generate UI use case
//!
//! Walks the attempt order for one request: the user's model first, then the
//! rest of the hierarchy, strictly one model at a time. The first model whose
//! pipeline succeeds wins; failures are recorded and rendered either as a
//! fallback note on the result or as an aggregated failure report.

use super::run_pipeline::RunPipelineUseCase;
use super::stages::StageRunner;
use super::transport::ModelTransport;
use crate::config::RetryPolicy;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use dezin_domain::{
    ApiKey, AttemptHistory, AttemptRecord, GeneratedUi, GenerationRequest, ModelHierarchy,
    ModelId, PipelineOutcome, RequestResult, UiResponse,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a request before any model is attempted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateUiError {
    #[error("MISSING_API_KEY: No API key provided")]
    MissingCredential,
}

/// Use case for generating a UI with model fallback
pub struct GenerateUiUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    hierarchy: ModelHierarchy,
    policy: RetryPolicy,
    default_credential: Option<ApiKey>,
    progress: Arc<dyn ProgressNotifier>,
}

impl<G: LlmGateway + 'static> GenerateUiUseCase<G> {
    pub fn new(gateway: Arc<G>, hierarchy: ModelHierarchy) -> Self {
        Self {
            gateway,
            hierarchy,
            policy: RetryPolicy::default(),
            default_credential: None,
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Credential used when a request carries none (configuration/environment).
    pub fn with_default_credential(mut self, credential: Option<ApiKey>) -> Self {
        self.default_credential = credential;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Execute the use case for one request
    pub async fn execute(
        &self,
        request: GenerationRequest,
    ) -> Result<RequestResult, GenerateUiError> {
        let credential = ApiKey::resolve(
            request.credential.as_ref(),
            self.default_credential.as_ref(),
        )
        .ok_or(GenerateUiError::MissingCredential)?;

        let selected = request.model.clone();
        if !self.hierarchy.contains(&selected) {
            warn!(
                "Selected model '{}' is not in the model hierarchy; using the hierarchy order",
                selected
            );
        }

        let order = self.hierarchy.attempt_order(&selected);
        let pipeline = self.pipeline(credential.clone());
        let mut history = AttemptHistory::new(selected.clone());

        info!(
            "Generating UI with '{}' ({} candidate models)",
            selected,
            order.len()
        );

        for (index, model) in order.iter().enumerate() {
            self.progress.on_attempt_start(model, index, order.len());
            info!("[Fallback] Attempting model: {}", model);

            let outcome = pipeline
                .execute(&request.prompt, &request.history, Some(&credential), model)
                .await;

            match outcome {
                PipelineOutcome::Success(ui) => {
                    info!("[Fallback] Success with model: {}", model);
                    self.progress.on_attempt_succeeded(model);
                    return Ok(RequestResult::Success(Self::response(ui, &selected, &history)));
                }
                PipelineOutcome::Failure { stage, failure } => {
                    if !failure.class().allows_fallback() {
                        return Err(GenerateUiError::MissingCredential);
                    }
                    warn!("[Fallback] {} failed at {}: {}", model, stage, failure);
                    let record = AttemptRecord::new(model.clone(), stage, &failure);
                    self.progress.on_attempt_failed(&record);
                    history.record(record);
                }
            }
        }

        warn!("[Fallback] All {} models failed", order.len());
        Ok(RequestResult::Failure {
            aggregated_message: history.failure_report(),
        })
    }

    fn pipeline(&self, credential: ApiKey) -> RunPipelineUseCase<G> {
        let transport = ModelTransport::new(Arc::clone(&self.gateway))
            .with_policy(self.policy.clone())
            .with_default_credential(Some(credential))
            .with_progress(Arc::clone(&self.progress));
        RunPipelineUseCase::new(StageRunner::new(transport)).with_progress(Arc::clone(&self.progress))
    }

    fn response(ui: GeneratedUi, selected: &ModelId, history: &AttemptHistory) -> UiResponse {
        let mut message = ui.explanation;
        if ui.model != *selected {
            message.push_str(&history.fallback_note(&ui.model));
        }

        UiResponse {
            message,
            code: ui.code,
            layout: ui.plan.layout().cloned(),
            model: ui.model,
        }
    }
}
