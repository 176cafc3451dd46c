//! Turns a provider's raw JSON response into display text.
//!
//! Provider response schemas drift between API versions, so extraction is
//! layered: a structured path for the known shape, then a depth-first search
//! for any `text` field, then a truncation warning, then the raw JSON itself.
//! Each layer runs only when the previous one found nothing.

use serde_json::Value;

/// Returned when generation stopped at the token limit before any text was
/// produced.
pub const TRUNCATION_WARNING: &str = "The model stopped early because it reached the maximum \
                                      output token limit before returning any text. Try \
                                      raising the max output tokens or shortening the input.";

/// Label prefixed to the pretty-printed JSON when no text could be found.
pub const RAW_RESPONSE_LABEL: &str = "Unparsed raw response from provider:";

/// Which provider response layout to expect on the structured path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseShape {
    /// `candidates[0].content.parts[*].text`, finish reason `MAX_TOKENS`.
    #[default]
    Gemini,
    /// `choices[0].message.content`, finish reason `length`.
    OpenAIChat,
}

impl ResponseShape {
    fn first_candidate(self, raw: &Value) -> Option<&Value> {
        let key = match self {
            Self::Gemini => "candidates",
            Self::OpenAIChat => "choices",
        };
        raw.get(key)?.as_array()?.first()
    }

    fn structured_text(self, raw: &Value) -> Option<String> {
        let candidate = self.first_candidate(raw)?;
        let text = match self {
            Self::Gemini => join_part_texts(candidate.get("content")?.get("parts")?)?,
            Self::OpenAIChat => match candidate.get("message")?.get("content")? {
                Value::String(content) => content.clone(),
                parts @ Value::Array(_) => join_part_texts(parts)?,
                _ => return None,
            },
        };
        non_blank(&text)
    }

    fn is_truncated(self, raw: &Value) -> bool {
        let Some(candidate) = self.first_candidate(raw) else {
            return false;
        };
        let (key, marker) = match self {
            Self::Gemini => ("finishReason", "MAX_TOKENS"),
            Self::OpenAIChat => ("finish_reason", "length"),
        };
        candidate.get(key).and_then(Value::as_str) == Some(marker)
    }
}

/// Normalize a Gemini-shaped response.
#[must_use]
pub fn normalize(raw: &Value) -> String {
    normalize_with(ResponseShape::Gemini, raw)
}

#[must_use]
pub fn normalize_with(shape: ResponseShape, raw: &Value) -> String {
    if let Some(text) = shape.structured_text(raw) {
        return text;
    }
    if let Some(text) = find_first_text(raw) {
        return text;
    }
    if shape.is_truncated(raw) {
        return TRUNCATION_WARNING.to_string();
    }
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    format!("{RAW_RESPONSE_LABEL}\n{pretty}")
}

/// Depth-first search for the first non-blank string stored under a key named
/// `text`. Object entries are visited in wire order (a `text` string is taken
/// before descending into the entry's value), array elements in index order.
#[must_use]
pub fn find_first_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.iter().find_map(|(key, child)| match child {
            Value::String(text) if key == "text" => non_blank(text),
            _ => find_first_text(child),
        }),
        Value::Array(items) => items.iter().find_map(find_first_text),
        _ => None,
    }
}

fn join_part_texts(parts: &Value) -> Option<String> {
    let texts: Vec<&str> = parts
        .as_array()?
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    Some(texts.join("\n"))
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn returns_single_part_text() {
        let raw = json!({"candidates":[{"content":{"parts":[{"text":"hello"}]}}]});
        assert_eq!(normalize(&raw), "hello");
    }

    #[test]
    fn joins_all_parts_of_first_candidate_and_trims() {
        let raw = json!({
            "candidates": [
                {"content": {"parts": [{"text": "  first"}, {"inlineData": {}}, {"text": "second\n"}]}},
                {"content": {"parts": [{"text": "other candidate"}]}}
            ]
        });
        assert_eq!(normalize(&raw), "first\nsecond");
    }

    #[test]
    fn falls_back_to_first_text_in_traversal_order() {
        let raw = json!({
            "candidates": [{"content": {"parts": []}}],
            "metadata": {"notes": [{"label": "x"}, {"text": "from metadata"}]},
            "text": "top level but later"
        });
        assert_eq!(normalize(&raw), "from metadata");
    }

    #[test]
    fn traversal_visits_object_entries_before_later_siblings() {
        let raw = json!({
            "a": {"b": {"text": "deep first"}},
            "text": "shallow second"
        });
        assert_eq!(find_first_text(&raw).as_deref(), Some("deep first"));
    }

    #[test]
    fn skips_blank_and_non_string_text_fields() {
        let raw = json!({
            "text": {"text": "   "},
            "items": [{"text": 3}, {"text": "found"}]
        });
        assert_eq!(find_first_text(&raw).as_deref(), Some("found"));
    }

    #[test]
    fn reports_truncation_when_no_text_present() {
        let raw = json!({"candidates":[{"content":{"role":"model"},"finishReason":"MAX_TOKENS"}]});
        assert_eq!(normalize(&raw), TRUNCATION_WARNING);
    }

    #[test]
    fn text_wins_over_truncation_marker() {
        let raw = json!({"candidates":[{"content":{"parts":[{"text":"partial"}]},"finishReason":"MAX_TOKENS"}]});
        assert_eq!(normalize(&raw), "partial");
    }

    #[test]
    fn embeds_raw_json_when_nothing_found() {
        let raw = json!({"candidates":[{"finishReason":"SAFETY"}],"modelVersion":"x-1"});
        let output = normalize(&raw);
        assert!(output.starts_with(RAW_RESPONSE_LABEL));
        assert!(output.contains("\"finishReason\": \"SAFETY\""));
        assert!(output.contains("\"modelVersion\": \"x-1\""));
    }

    #[test]
    fn empty_object_is_never_empty_output() {
        let output = normalize(&json!({}));
        assert!(!output.is_empty());
        assert!(output.contains("{}"));
    }

    #[test]
    fn openai_string_content() {
        let raw = json!({"choices":[{"message":{"role":"assistant","content":" Hi there "},"finish_reason":"stop"}]});
        assert_eq!(normalize_with(ResponseShape::OpenAIChat, &raw), "Hi there");
    }

    #[test]
    fn openai_part_list_content() {
        let raw = json!({"choices":[{"message":{"content":[{"type":"text","text":"a"},{"type":"text","text":"b"}]}}]});
        assert_eq!(normalize_with(ResponseShape::OpenAIChat, &raw), "a\nb");
    }

    #[test]
    fn openai_length_finish_reason_with_null_content() {
        let raw = json!({"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"length"}]});
        assert_eq!(
            normalize_with(ResponseShape::OpenAIChat, &raw),
            TRUNCATION_WARNING
        );
    }

    #[test]
    fn gemini_marker_is_ignored_for_openai_shape() {
        let raw = json!({"choices":[{"finishReason":"MAX_TOKENS"}]});
        let output = normalize_with(ResponseShape::OpenAIChat, &raw);
        assert!(output.starts_with(RAW_RESPONSE_LABEL));
    }
}
