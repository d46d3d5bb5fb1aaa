//! Gemini session implementation
//!
//! One session is one model plus one system instruction. `generateContent`
//! is stateless, so every `send` is an independent single-turn request.

use super::error::GeminiError;
use super::types::{GenerateContentRequest, GenerateContentResponse, parse_error_body};
use async_trait::async_trait;
use dezin_application::{GatewayError, LlmSession};
use dezin_domain::{ApiKey, ModelId};
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiSession {
    client: reqwest::Client,
    endpoint: String,
    model: ModelId,
    system_prompt: String,
    credential: ApiKey,
}

impl GeminiSession {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        model: ModelId,
        system_prompt: String,
        credential: ApiKey,
    ) -> Self {
        Self {
            client,
            endpoint,
            model,
            system_prompt,
            credential,
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::new(&self.system_prompt, prompt);

        debug!(model = %self.model, chars = prompt.len(), "Calling Gemini generateContent");

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, self.credential.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (message, retry_hint) = parse_error_body(&body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
                retry_hint,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(parsed.text())
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &ModelId {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.generate(content).await.map_err(GatewayError::from)
    }
}
