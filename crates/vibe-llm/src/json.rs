//! Pull a JSON object out of free-form model output
//!
//! Models often wrap JSON in markdown fences or surround it with prose.

use serde::de::DeserializeOwned;
use tracing::debug;

/// Find the JSON payload in a model reply
///
/// Tries, in order: a ```json fence, a plain fence holding an object or
/// array, the first balanced `{...}` span, then the whole trimmed text.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let body = &text[start + 7..];
        if let Some(end) = body.find("```") {
            return Some(body[..end].trim());
        }
    }

    if let Some(start) = text.find("```") {
        let body = &text[start + 3..];
        if let Some(end) = body.find("```") {
            let candidate = body[..end].trim();
            if candidate.starts_with('{') || candidate.starts_with('[') {
                return Some(candidate);
            }
        }
    }

    if let Some(start) = text.find('{') {
        let mut depth = 0usize;
        for (i, c) in text[start..].char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(&text[start..=start + i]);
                    }
                }
                _ => {}
            }
        }
    }

    let trimmed = text.trim();
    let looks_like_json = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    looks_like_json.then_some(trimmed)
}

/// Extract and deserialize a JSON reply, `None` when either step fails
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Option<T> {
    let json = extract_json(text)?;
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Model reply is not valid JSON: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_fenced_json() {
        let text = "Sure!\n```json\n{\"a\": 1}\n```\nDone.";
        assert_eq!(extract_json(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_plain_fence() {
        let text = "```\n[1, 2]\n```";
        assert_eq!(extract_json(text), Some("[1, 2]"));
    }

    #[test]
    fn test_embedded_object() {
        let text = "Decision: {\"x\": {\"y\": true}} end";
        assert_eq!(extract_json(text), Some("{\"x\": {\"y\": true}}"));
    }

    #[test]
    fn test_no_json() {
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("{ unbalanced"), None);
    }

    #[test]
    fn test_parse_json_reply() {
        let value: Option<Value> = parse_json_reply("ok {\"call_taapi\": false}");
        assert_eq!(value, Some(serde_json::json!({"call_taapi": false})));

        let bad: Option<Value> = parse_json_reply("{not json}");
        assert!(bad.is_none());
    }
}
