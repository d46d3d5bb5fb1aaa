//! Model transport
//!
//! Issues one prompt + system instruction call to one named model with
//! bounded retry. Rate-limit, overload and timeout failures are retried with
//! exponential backoff; any other failure ends the call at once.

use crate::config::RetryPolicy;
use crate::ports::llm_gateway::{GatewayError, LlmGateway, RetryClass};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use dezin_domain::{ApiKey, ModelId, StageFailure};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Retrying caller for a single model.
///
/// `Ok(None)` is the soft failure: the model produced nothing and the error
/// carried no retryable classification. Callers decide what "nothing" means
/// for their stage.
pub struct ModelTransport<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    policy: RetryPolicy,
    default_credential: Option<ApiKey>,
    progress: Arc<dyn ProgressNotifier>,
}

impl<G: LlmGateway + 'static> Clone for ModelTransport<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            policy: self.policy.clone(),
            default_credential: self.default_credential.clone(),
            progress: Arc::clone(&self.progress),
        }
    }
}

impl<G: LlmGateway + 'static> ModelTransport<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            policy: RetryPolicy::default(),
            default_credential: None,
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Process-wide credential used when a call does not supply one.
    pub fn with_default_credential(mut self, credential: Option<ApiKey>) -> Self {
        self.default_credential = credential;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn resolve_credential(&self, explicit: Option<&ApiKey>) -> Option<ApiKey> {
        ApiKey::resolve(explicit, self.default_credential.as_ref())
    }

    /// Call `model` once per attempt until it answers or the policy gives up.
    pub async fn call(
        &self,
        prompt: &str,
        system_instruction: &str,
        credential: Option<&ApiKey>,
        model: &ModelId,
    ) -> Result<Option<String>, StageFailure> {
        let Some(credential) = self.resolve_credential(credential) else {
            return Err(StageFailure::MissingCredential);
        };

        for attempt in 0..self.policy.max_attempts {
            let error = match self
                .send_once(prompt, system_instruction, &credential, model)
                .await
            {
                Ok(text) if text.is_empty() => {
                    warn!("[{}] Empty completion", model);
                    return Ok(None);
                }
                Ok(text) => return Ok(Some(text)),
                Err(error) => error,
            };

            let class = error.retry_class();
            if class.is_some() && self.policy.has_attempts_after(attempt) {
                let delay = self.policy.backoff_delay(attempt);
                info!("[{}] Retrying in {}s...", model, delay.as_secs_f64());
                debug!("[{}] Attempt {} failed: {}", model, attempt + 1, error);
                self.progress.on_retry(model, attempt + 1, delay);
                tokio::time::sleep(delay).await;
                continue;
            }

            return match class {
                Some(RetryClass::RateLimit) => Err(StageFailure::RateLimited {
                    model: model.clone(),
                    retry_hint: error.retry_hint().map(str::to_string),
                }),
                Some(RetryClass::Overload) => Err(StageFailure::overloaded(model)),
                Some(RetryClass::Timeout) => Err(StageFailure::TimedOut {
                    model: model.clone(),
                }),
                None => {
                    warn!("[{}] Call failed without retry: {}", model, error);
                    Ok(None)
                }
            };
        }

        // Only reachable with a zero-attempt policy.
        Err(StageFailure::rate_limited(model))
    }

    async fn send_once(
        &self,
        prompt: &str,
        system_instruction: &str,
        credential: &ApiKey,
        model: &ModelId,
    ) -> Result<String, GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(model, system_instruction, credential)
            .await?;

        match self.policy.call_timeout {
            Some(limit) => tokio::time::timeout(limit, session.send(prompt))
                .await
                .map_err(|_| GatewayError::Timeout)?,
            None => session.send(prompt).await,
        }
    }
}
