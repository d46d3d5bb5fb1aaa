//! Generation entities - the request, the per-model outcome and the final result.

use super::failure::{ErrorClass, Stage, StageFailure};
use crate::core::credential::ApiKey;
use crate::core::model::ModelId;
use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Inbound request for one UI generation
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The user's latest request
    pub prompt: String,
    /// Prior conversation, oldest first
    pub history: Vec<ChatMessage>,
    /// Explicit credential; falls back to configuration when absent
    pub credential: Option<ApiKey>,
    /// Model the user picked
    pub model: ModelId,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, model: ModelId) -> Self {
        Self {
            prompt: prompt.into(),
            history: Vec::new(),
            credential: None,
            model,
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_credential(mut self, credential: Option<ApiKey>) -> Self {
        self.credential = credential;
        self
    }
}

/// Structured UI plan returned by the Plan stage.
///
/// Opaque to orchestration apart from the `layout` field surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanDocument(serde_json::Value);

impl PlanDocument {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn layout(&self) -> Option<&serde_json::Value> {
        self.0.get("layout")
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Compact JSON form embedded in downstream prompts
    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }
}

/// Composite result of a successful pipeline attempt
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedUi {
    pub code: String,
    pub explanation: String,
    pub plan: PlanDocument,
    pub model: ModelId,
}

/// Outcome of running the pipeline against one candidate model
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Success(GeneratedUi),
    Failure { stage: Stage, failure: StageFailure },
}

impl PipelineOutcome {
    pub fn failed(stage: Stage, failure: StageFailure) -> Self {
        PipelineOutcome::Failure { stage, failure }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success(_))
    }
}

/// Record of one failed stage for one model; kept for the length of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptRecord {
    pub model: ModelId,
    pub stage: Stage,
    pub error_class: ErrorClass,
    pub raw_reason: String,
}

impl AttemptRecord {
    const QUOTA_REASON: &'static str = "Quota limit reached";

    pub fn new(model: ModelId, stage: Stage, failure: &StageFailure) -> Self {
        Self {
            model,
            stage,
            error_class: failure.class(),
            raw_reason: failure.to_string(),
        }
    }

    /// Reason as shown to the user: rate limits collapse to a quota phrase.
    pub fn display_reason(&self) -> &str {
        if self.error_class == ErrorClass::RateLimited {
            Self::QUOTA_REASON
        } else {
            &self.raw_reason
        }
    }
}

/// Successful outward payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiResponse {
    pub message: String,
    pub code: String,
    pub layout: Option<serde_json::Value>,
    pub model: ModelId,
}

/// Value handed back to the caller for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestResult {
    Success(UiResponse),
    Failure {
        #[serde(rename = "error")]
        aggregated_message: String,
    },
}

impl RequestResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestResult::Success(_))
    }

    pub fn model(&self) -> Option<&ModelId> {
        match self {
            RequestResult::Success(response) => Some(&response.model),
            RequestResult::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RequestResult::Success(response) => &response.message,
            RequestResult::Failure { aggregated_message } => aggregated_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_layout_extraction() {
        let plan = PlanDocument::new(json!({"type": "div", "layout": "sidebar"}));
        assert_eq!(plan.layout(), Some(&json!("sidebar")));

        let plan = PlanDocument::new(json!({"type": "div"}));
        assert_eq!(plan.layout(), None);
    }

    #[test]
    fn test_attempt_record_reasons() {
        let model = ModelId::new("pro");
        let record = AttemptRecord::new(
            model.clone(),
            Stage::Plan,
            &StageFailure::rate_limited(&model),
        );
        assert_eq!(record.error_class, ErrorClass::RateLimited);
        assert_eq!(record.raw_reason, "RATE_LIMIT:pro");
        assert_eq!(record.display_reason(), "Quota limit reached");

        let record = AttemptRecord::new(
            model.clone(),
            Stage::Generate,
            &StageFailure::overloaded(&model),
        );
        assert_eq!(record.display_reason(), "MODEL_OVERLOAD:pro");

        let record = AttemptRecord::new(model, Stage::Plan, &StageFailure::parse("bad json"));
        assert_eq!(record.display_reason(), "bad json");
    }

    #[test]
    fn test_request_result_wire_shapes() {
        let success = RequestResult::Success(UiResponse {
            message: "done".into(),
            code: "const X = 1;".into(),
            layout: None,
            model: ModelId::new("flash"),
        });
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({"message": "done", "code": "const X = 1;", "layout": null, "model": "flash"})
        );

        let failure = RequestResult::Failure {
            aggregated_message: "everything failed".into(),
        };
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({"error": "everything failed"})
        );
        assert!(!failure.is_success());
        assert_eq!(failure.message(), "everything failed");
    }

    #[test]
    fn test_chat_message_roles_serialize_lowercase() {
        let history: Vec<ChatMessage> =
            serde_json::from_str(r#"[{"role":"user","content":"hi"},{"role":"assistant","content":"ok"}]"#)
                .unwrap();
        assert_eq!(history[0], ChatMessage::user("hi"));
        assert_eq!(history[1], ChatMessage::assistant("ok"));
    }
}
