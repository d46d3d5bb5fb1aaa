//! Text post-processing for model responses.
//!
//! Plan responses are expected to be JSON but models often wrap them in prose
//! or fences. Code responses are expected to be bare source but sometimes
//! arrive fenced anyway.

/// Fence markers removed from generated code, most specific first.
const CODE_FENCES: [&str; 3] = ["```jsx", "```javascript", "```"];

/// Extract the JSON value embedded in a plan response.
///
/// Takes the span from the first `{` to the last `}`. The span is not
/// bracket-balanced: stray braces in surrounding prose, or several objects in
/// one response, select a wider span that usually fails to parse. When the
/// response has no such span it is parsed as a whole.
pub fn extract_plan_json(response: &str) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(json_object_span(response).unwrap_or(response))
}

fn json_object_span(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

/// Remove code fence markers, leaving the enclosed text verbatim.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCES
        .iter()
        .fold(raw.to_string(), |code, fence| code.replace(fence, ""))
}
