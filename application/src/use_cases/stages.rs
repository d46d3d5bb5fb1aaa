//! Stage runners
//!
//! The three single-purpose stages built on [`ModelTransport`]:
//! Plan parses a structured UI plan, Generate post-processes raw text into
//! source code, Explain passes text through.

use super::transport::ModelTransport;
use crate::ports::llm_gateway::LlmGateway;
use dezin_domain::{
    ApiKey, ChatMessage, ModelId, PlanDocument, PromptTemplate, StageFailure, extract_plan_json,
    strip_code_fences,
};
use tracing::{debug, info, warn};

/// Runs Plan, Generate and Explain against a given model.
pub struct StageRunner<G: LlmGateway + 'static> {
    transport: ModelTransport<G>,
}

impl<G: LlmGateway + 'static> Clone for StageRunner<G> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
        }
    }
}

impl<G: LlmGateway + 'static> StageRunner<G> {
    pub fn new(transport: ModelTransport<G>) -> Self {
        Self { transport }
    }

    /// Plan stage: request plus full history in, parsed plan out.
    pub async fn plan(
        &self,
        user_prompt: &str,
        history: &[ChatMessage],
        credential: Option<&ApiKey>,
        model: &ModelId,
    ) -> Result<PlanDocument, StageFailure> {
        info!("[Planner] Received request for model: '{}'", model);
        let prompt = PromptTemplate::plan_prompt(user_prompt, history);

        let response = self
            .transport
            .call(&prompt, PromptTemplate::planner_system(), credential, model)
            .await?
            .ok_or_else(|| StageFailure::parse("API returned empty response"))?;

        let value = extract_plan_json(&response).map_err(|e| {
            warn!("[Planner] Failed to parse planner response from {}: {}", model, e);
            StageFailure::parse(format!("Failed to parse planner JSON: {}", e))
        })?;

        if value.is_null() {
            return Err(StageFailure::parse("Planner returned null"));
        }

        debug!("[Planner] {} produced a plan", model);
        Ok(PlanDocument::new(value))
    }

    /// Generate stage: plan in, fence-free component source out.
    pub async fn generate_code(
        &self,
        plan: &PlanDocument,
        credential: Option<&ApiKey>,
        model: &ModelId,
    ) -> Result<String, StageFailure> {
        let prompt = PromptTemplate::generate_prompt(plan);

        let response = self
            .transport
            .call(&prompt, PromptTemplate::generator_system(), credential, model)
            .await?
            .ok_or_else(|| StageFailure::parse("Code generation failed — no response"))?;

        Ok(strip_code_fences(&response))
    }

    /// Explain stage: plan and original request in, rationale text out.
    pub async fn explain(
        &self,
        plan: &PlanDocument,
        user_prompt: &str,
        credential: Option<&ApiKey>,
        model: &ModelId,
    ) -> Result<String, StageFailure> {
        let prompt = PromptTemplate::explain_prompt(plan, user_prompt);

        self.transport
            .call(&prompt, PromptTemplate::explainer_system(), credential, model)
            .await?
            .ok_or_else(|| StageFailure::parse("Explanation generation failed — no response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::testing::{PLAN_JSON, ScriptedGateway, Step, rate_limited, test_key};
    use dezin_domain::{ErrorClass, Stage};
    use serde_json::json;
    use std::sync::Arc;

    const MODEL: &str = "flash";

    fn runner(gateway: ScriptedGateway) -> StageRunner<ScriptedGateway> {
        StageRunner::new(ModelTransport::new(Arc::new(gateway)))
    }

    fn plan_doc() -> PlanDocument {
        PlanDocument::new(serde_json::from_str(PLAN_JSON).unwrap())
    }

    async fn run_plan(runner: &StageRunner<ScriptedGateway>) -> Result<PlanDocument, StageFailure> {
        let key = test_key();
        runner
            .plan("a dashboard", &[], Some(&key), &ModelId::new(MODEL))
            .await
    }

    #[tokio::test]
    async fn test_plan_extracts_json_from_prose() {
        let runner = runner(ScriptedGateway::new().script(
            MODEL,
            Stage::Plan,
            vec![Step::reply(r#"here is the plan: {"type":"div"} thanks"#)],
        ));

        let plan = run_plan(&runner).await.unwrap();
        assert_eq!(plan.as_value(), &json!({"type": "div"}));
    }

    #[tokio::test]
    async fn test_plan_empty_response_is_parse_failure() {
        let runner = runner(ScriptedGateway::new().script(
            MODEL,
            Stage::Plan,
            vec![Step::fail(GatewayError::http(400, "bad request"))],
        ));

        let failure = run_plan(&runner).await.unwrap_err();
        assert_eq!(failure.class(), ErrorClass::ParseFailure);
        assert_eq!(failure.to_string(), "API returned empty response");
    }

    #[tokio::test]
    async fn test_plan_invalid_json_includes_parser_diagnostic() {
        let runner = runner(ScriptedGateway::new().script(
            MODEL,
            Stage::Plan,
            vec![Step::reply("{ this is not json }")],
        ));

        let failure = run_plan(&runner).await.unwrap_err();
        assert_eq!(failure.class(), ErrorClass::ParseFailure);
        assert!(failure.to_string().starts_with("Failed to parse planner JSON: "));
        assert!(failure.to_string().len() > "Failed to parse planner JSON: ".len());
    }

    #[tokio::test]
    async fn test_plan_null_is_rejected() {
        let runner = runner(ScriptedGateway::new().script(
            MODEL,
            Stage::Plan,
            vec![Step::reply("null")],
        ));

        let failure = run_plan(&runner).await.unwrap_err();
        assert_eq!(failure, StageFailure::parse("Planner returned null"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_plan_rate_limit_propagates() {
        let runner = runner(ScriptedGateway::new().script(
            MODEL,
            Stage::Plan,
            vec![Step::fail(rate_limited())],
        ));

        let failure = run_plan(&runner).await.unwrap_err();
        assert_eq!(failure.class(), ErrorClass::RateLimited);
    }

    #[tokio::test]
    async fn test_generate_strips_fences() {
        let runner = runner(ScriptedGateway::new().script(
            MODEL,
            Stage::Generate,
            vec![Step::reply("```jsx\nconst X=1;\n```")],
        ));
        let key = test_key();

        let code = runner
            .generate_code(&plan_doc(), Some(&key), &ModelId::new(MODEL))
            .await
            .unwrap();
        assert_eq!(code, "\nconst X=1;\n");
    }

    #[tokio::test]
    async fn test_generate_without_text_fails() {
        let runner = runner(ScriptedGateway::new().script(
            MODEL,
            Stage::Generate,
            vec![Step::reply("")],
        ));
        let key = test_key();

        let failure = runner
            .generate_code(&plan_doc(), Some(&key), &ModelId::new(MODEL))
            .await
            .unwrap_err();
        assert_eq!(failure, StageFailure::parse("Code generation failed — no response"));
    }

    #[tokio::test]
    async fn test_explain_passes_text_through() {
        let runner = runner(ScriptedGateway::new().script(
            MODEL,
            Stage::Explain,
            vec![Step::reply("A sidebar keeps navigation visible.")],
        ));
        let key = test_key();

        let text = runner
            .explain(&plan_doc(), "a dashboard", Some(&key), &ModelId::new(MODEL))
            .await
            .unwrap();
        assert_eq!(text, "A sidebar keeps navigation visible.");
    }

    #[tokio::test]
    async fn test_explain_without_text_fails() {
        let runner = runner(ScriptedGateway::new());
        let key = test_key();

        let failure = runner
            .explain(&plan_doc(), "a dashboard", Some(&key), &ModelId::new(MODEL))
            .await
            .unwrap_err();
        assert_eq!(failure.class(), ErrorClass::ParseFailure);
    }
}
