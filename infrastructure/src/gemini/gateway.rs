//! Gemini LLM Gateway implementation

use super::session::GeminiSession;
use async_trait::async_trait;
use dezin_application::{GatewayError, LlmGateway, LlmSession};
use dezin_domain::{ApiKey, ModelId};
use tracing::{debug, info};

/// Public Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// LLM Gateway implementation for the Gemini REST API
pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiGateway {
    /// Create a gateway against the public endpoint
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a gateway against a custom endpoint (proxies, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("dezin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("GeminiGateway initialized ({})", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `generateContent` URL for `model`
    pub fn endpoint(&self, model: &ModelId) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &ModelId,
        system_prompt: &str,
        credential: &ApiKey,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        debug!("Creating Gemini session for {}", model);
        Ok(Box::new(GeminiSession::new(
            self.client.clone(),
            self.endpoint(model),
            model.clone(),
            system_prompt.to_string(),
            credential.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_for_model() {
        let gateway = GeminiGateway::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8080");
        assert_eq!(
            gateway.endpoint(&ModelId::new("gemini-2.5-flash")),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_default_endpoint() {
        let gateway = GeminiGateway::new().unwrap();
        assert_eq!(gateway.base_url(), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_session_is_bound_to_model() {
        let gateway = GeminiGateway::new().unwrap();
        let model = ModelId::new("gemini-2.0-flash");
        let session = gateway
            .create_session_with_system_prompt(&model, "system", &ApiKey::new("k").unwrap())
            .await
            .unwrap();
        assert_eq!(session.model(), &model);
    }
}
