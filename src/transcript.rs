use serde_json::Value;
use std::fs;
use std::path::Path;

pub const FALLBACK_MESSAGE: &str = "Done";

pub trait TranscriptReader {
    /// Never fails; returns [`FALLBACK_MESSAGE`] when nothing usable is found.
    fn last_assistant_message(&self, path: &Path) -> String;
}

/// Reads the host's JSON Lines transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonlTranscript;

impl TranscriptReader for JsonlTranscript {
    fn last_assistant_message(&self, path: &Path) -> String {
        match fs::read_to_string(path) {
            Ok(raw) => last_assistant_text(&raw).unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "transcript unreadable");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

/// Scans from the newest line back to the first assistant turn with text.
pub fn last_assistant_text(raw: &str) -> Option<String> {
    raw.lines()
        .rev()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .filter(|entry| entry.get("type").and_then(Value::as_str) == Some("assistant"))
        .find_map(|entry| entry.pointer("/message/content").and_then(content_text))
}

fn content_text(content: &Value) -> Option<String> {
    let text = match content {
        Value::String(text) => text.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        _ => return None,
    };
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
