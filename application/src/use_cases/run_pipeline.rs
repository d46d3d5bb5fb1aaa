//! Run Pipeline use case
//!
//! One pipeline attempt against one candidate model: Plan, then Generate and
//! Explain concurrently. Explain failing degrades the explanation; Generate
//! failing fails the attempt.

use super::stages::StageRunner;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use dezin_domain::{
    ApiKey, ChatMessage, GeneratedUi, ModelId, PipelineOutcome, Stage, StageFailure,
};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{info, warn};

/// Explanation used when the Explain stage produced nothing.
pub fn degraded_explanation(model: &ModelId) -> String {
    format!(
        "Generated using {}. (Explanation unavailable due to high traffic)",
        model
    )
}

/// Use case for running the three-stage pipeline against one model
pub struct RunPipelineUseCase<G: LlmGateway + 'static> {
    stages: StageRunner<G>,
    progress: Arc<dyn ProgressNotifier>,
}

impl<G: LlmGateway + 'static> RunPipelineUseCase<G> {
    pub fn new(stages: StageRunner<G>) -> Self {
        Self {
            stages,
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Execute one pipeline attempt. Never errors: failures are outcomes.
    pub async fn execute(
        &self,
        user_prompt: &str,
        history: &[ChatMessage],
        credential: Option<&ApiKey>,
        model: &ModelId,
    ) -> PipelineOutcome {
        // Step 1: Plan
        let plan = match self
            .stages
            .plan(user_prompt, history, credential, model)
            .await
        {
            Ok(plan) => {
                self.progress.on_stage_complete(model, Stage::Plan, true);
                plan
            }
            Err(failure) => {
                self.progress.on_stage_complete(model, Stage::Plan, false);
                return PipelineOutcome::failed(Stage::Plan, failure);
            }
        };

        // Step 2 & 3: Generate and Explain run as independent tasks
        let generate = {
            let stages = self.stages.clone();
            let plan = plan.clone();
            let credential = credential.cloned();
            let model = model.clone();
            tokio::spawn(async move {
                stages
                    .generate_code(&plan, credential.as_ref(), &model)
                    .await
            })
        };

        let explain = {
            let stages = self.stages.clone();
            let plan = plan.clone();
            let prompt = user_prompt.to_string();
            let credential = credential.cloned();
            let model = model.clone();
            tokio::spawn(async move {
                stages
                    .explain(&plan, &prompt, credential.as_ref(), &model)
                    .await
            })
        };

        // Join barrier: wait for both regardless of which fails first
        let (code_result, explanation_result) = tokio::join!(generate, explain);
        let code_result = flatten_join(code_result);
        let explanation_result = flatten_join(explanation_result);

        self.progress
            .on_stage_complete(model, Stage::Generate, code_result.is_ok());
        self.progress
            .on_stage_complete(model, Stage::Explain, explanation_result.is_ok());

        let code = match code_result {
            Ok(code) => code,
            Err(failure) => return PipelineOutcome::failed(Stage::Generate, failure),
        };

        let explanation = match explanation_result {
            Ok(text) => text,
            Err(failure) => {
                warn!("[{}] Explanation unavailable: {}", model, failure);
                degraded_explanation(model)
            }
        };

        info!("[{}] Pipeline succeeded", model);
        PipelineOutcome::Success(GeneratedUi {
            code,
            explanation,
            plan,
            model: model.clone(),
        })
    }
}

fn flatten_join<T>(joined: Result<Result<T, StageFailure>, JoinError>) -> Result<T, StageFailure> {
    joined.unwrap_or_else(|e| Err(StageFailure::Fatal(format!("Stage task failed: {}", e))))
}
