//! Response envelope returned by the generation provider.
//!
//! The provider API has returned the generated text under different nesting
//! across versions and modes, so every level of the envelope is optional.
//! Unknown fields are retained so the raw-dump fallback reproduces the full
//! response object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw generation response, shape not controlled by this service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Nested `response` wrapper emitted by some client-library response shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<CandidateContent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerationResult {
    /// Extract the generated text from the first location that yields one:
    ///
    /// 1. `response.candidates[0].content.parts[0].text`
    /// 2. `candidates[0].content.parts[0].text`
    /// 3. `response.candidates[0].content.text`
    ///
    /// Falls back to a pretty-printed dump of the whole envelope, so callers
    /// always get a string.
    pub fn extract_text(&self) -> String {
        self.response
            .as_ref()
            .and_then(|r| first_part_text(r.candidates.as_deref()))
            .or_else(|| first_part_text(self.candidates.as_deref()))
            .or_else(|| {
                self.response
                    .as_ref()
                    .and_then(|r| first_content_text(r.candidates.as_deref()))
            })
            .map(str::to_owned)
            .unwrap_or_else(|| self.dump())
    }

    fn dump(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn first_part_text(candidates: Option<&[Candidate]>) -> Option<&str> {
    candidates?
        .first()?
        .content
        .as_ref()?
        .parts
        .as_deref()?
        .first()?
        .text
        .as_deref()
}

fn first_content_text(candidates: Option<&[Candidate]>) -> Option<&str> {
    candidates?.first()?.content.as_ref()?.text.as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> GenerationResult {
        serde_json::from_value(value).expect("envelope should deserialize")
    }

    #[test]
    fn nested_response_path_wins_over_all_others() {
        let result = envelope(json!({
            "response": {
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "from path one" }],
                        "text": "from path three"
                    }
                }]
            },
            "candidates": [{
                "content": { "parts": [{ "text": "from path two" }] }
            }]
        }));

        assert_eq!(result.extract_text(), "from path one");
    }

    #[test]
    fn unnested_candidates_path_used_when_response_missing() {
        let result = envelope(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hi there" }] }
            }]
        }));

        assert_eq!(result.extract_text(), "hi there");
    }

    #[test]
    fn content_text_path_used_when_parts_missing() {
        let result = envelope(json!({
            "response": {
                "candidates": [{
                    "content": { "text": "no parts here" }
                }]
            }
        }));

        assert_eq!(result.extract_text(), "no parts here");
    }

    #[test]
    fn fallback_dumps_full_envelope() {
        let result = envelope(json!({
            "promptFeedback": { "blockReason": "SAFETY" },
            "usageMetadata": { "totalTokenCount": 12 }
        }));

        let dump = result.extract_text();
        assert!(!dump.is_empty());
        assert!(dump.contains("promptFeedback"));
        assert!(dump.contains("SAFETY"));
        assert!(dump.contains("usageMetadata"));
        // Deterministic for a given input
        assert_eq!(dump, result.extract_text());
    }

    #[test]
    fn nulls_and_empty_lists_degrade_to_dump() {
        for value in [
            json!({}),
            json!({ "candidates": null }),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "content": null }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "inlineData": {} }] } }] }),
            json!({ "response": { "candidates": [{}] }, "deep": { "a": { "b": [null] } } }),
        ] {
            let result = envelope(value);
            assert!(!result.extract_text().is_empty());
        }
    }

    #[test]
    fn dump_survives_roundtrip_of_unknown_fields() {
        let raw = json!({
            "modelVersion": "gemini-2.5-flash",
            "candidates": [{
                "finishReason": "STOP",
                "content": { "role": "model" }
            }]
        });
        let result = envelope(raw);
        let dump = result.extract_text();

        let parsed: serde_json::Value =
            serde_json::from_str(&dump).expect("dump should be valid JSON");
        assert_eq!(parsed["modelVersion"], "gemini-2.5-flash");
        assert_eq!(parsed["candidates"][0]["finishReason"], "STOP");
    }
}
