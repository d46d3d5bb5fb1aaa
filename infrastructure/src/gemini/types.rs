//! Wire types for `models/{model}:generateContent`
//!
//! Only the fields the adapter reads or writes are modelled; everything
//! else in the provider payload is ignored.

use serde::{Deserialize, Serialize};

const RETRY_INFO_TYPE: &str = "type.googleapis.com/google.rpc.RetryInfo";

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// One user turn under an optional system instruction.
    pub fn new(system_instruction: &str, prompt: &str) -> Self {
        let system_instruction =
            (!system_instruction.is_empty()).then(|| Content::text(None, system_instruction));
        Self {
            system_instruction,
            contents: vec![Content::text(Some("user"), prompt)],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated. Empty when the model
    /// produced no text (blocked prompt, no candidates).
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// ─── Error body ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

impl ErrorBody {
    /// `retryDelay` from a `google.rpc.RetryInfo` detail, e.g. `"35s"`.
    pub fn retry_delay(&self) -> Option<String> {
        self.details
            .iter()
            .filter(|d| d.get("@type").and_then(|t| t.as_str()) == Some(RETRY_INFO_TYPE))
            .find_map(|d| d.get("retryDelay").and_then(|v| v.as_str()))
            .map(str::to_string)
    }
}

/// Message and retry hint from a non-2xx body. Falls back to the raw body
/// when it is not the documented error envelope.
pub fn parse_error_body(body: &str) -> (String, Option<String>) {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = match &envelope.error.status {
                Some(status) if !envelope.error.message.is_empty() => {
                    format!("{} ({})", envelope.error.message, status)
                }
                Some(status) => status.clone(),
                None => envelope.error.message.clone(),
            };
            (message, envelope.error.retry_delay())
        }
        Err(_) => (body.trim().to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest::new("be brief", "make a navbar");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "systemInstruction": {"parts": [{"text": "be brief"}]},
                "contents": [{"role": "user", "parts": [{"text": "make a navbar"}]}]
            })
        );
    }

    #[test]
    fn test_request_without_system_instruction() {
        let request = GenerateContentRequest::new("", "hi");
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "const A"}, {"text": " = 1;"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"totalTokenCount": 12}
        }))
        .unwrap();

        assert_eq!(response.text(), "const A = 1;");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_parse_error_body_with_retry_info() {
        let body = json!({
            "error": {
                "code": 429,
                "message": "You exceeded your current quota.",
                "status": "RESOURCE_EXHAUSTED",
                "details": [
                    {"@type": "type.googleapis.com/google.rpc.QuotaFailure", "violations": []},
                    {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "35s"}
                ]
            }
        })
        .to_string();

        let (message, hint) = parse_error_body(&body);

        assert_eq!(message, "You exceeded your current quota. (RESOURCE_EXHAUSTED)");
        assert_eq!(hint.as_deref(), Some("35s"));
    }

    #[test]
    fn test_parse_error_body_falls_back_to_raw_text() {
        let (message, hint) = parse_error_body("  upstream connect error  ");
        assert_eq!(message, "upstream connect error");
        assert!(hint.is_none());
    }
}
