//! Turns hook input into the text that gets announced.

use crate::config::{Config, Style};
use crate::events::{NotificationType, StopInput};
use crate::summarize::Summarizer;
use crate::transcript::{TranscriptReader, FALLBACK_MESSAGE};
use regex::Regex;
use std::sync::OnceLock;

pub const ALERT_STOP_MESSAGE: &str = "Claude is done";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    Alert,
    Ping,
}

/// How a resolved message reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sound(SoundKind),
    Speech,
    Silent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub content: String,
    pub delivery: Delivery,
}

pub fn stop_message(
    input: &StopInput,
    config: &Config,
    transcript: &dyn TranscriptReader,
    summarizer: &dyn Summarizer,
) -> Message {
    match config.style {
        // Fixed text keeps repeated alerts deduplicable without touching the transcript.
        Style::Alerts => Message {
            content: ALERT_STOP_MESSAGE.to_string(),
            delivery: Delivery::Sound(SoundKind::Alert),
        },
        Style::Silent => Message {
            content: FALLBACK_MESSAGE.to_string(),
            delivery: Delivery::Silent,
        },
        Style::Tts => {
            let content = match &input.transcript_path {
                None => FALLBACK_MESSAGE.to_string(),
                Some(path) => {
                    let raw = transcript.last_assistant_message(path);
                    fit_to_budget(&raw, config, summarizer)
                }
            };
            let content = if content.trim().is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                content
            };
            Message {
                content,
                delivery: Delivery::Speech,
            }
        }
    }
}

pub fn notification_message(kind: Option<NotificationType>, style: Style) -> Message {
    let content = match kind {
        Some(NotificationType::PermissionPrompt) => "Claude needs permission",
        Some(NotificationType::ElicitationDialog) => "Claude needs more information",
        None => "Claude is waiting for input",
    };
    let delivery = match style {
        Style::Alerts => Delivery::Sound(SoundKind::Ping),
        Style::Tts => Delivery::Speech,
        Style::Silent => Delivery::Silent,
    };
    Message {
        content: content.to_string(),
        delivery,
    }
}

/// Short text is cleaned and spoken as is; long text is summarized, or
/// truncated when the summarizer gives nothing back.
pub fn fit_to_budget(raw: &str, config: &Config, summarizer: &dyn Summarizer) -> String {
    // Hooks skip validation, so a hand-edited zero still yields one word.
    let max_words = config.preferences.max_words.max(1) as usize;
    let word_count = count_words(raw);
    if word_count <= max_words {
        return clean_for_speech(raw);
    }

    tracing::debug!(word_count, max_words, "message over budget; summarizing");
    let prompt = config.preferences.summary_prompt.as_deref();
    match summarizer.summarize(raw, max_words, prompt) {
        Some(summary) => summary,
        None => {
            tracing::debug!("summarizer returned nothing; truncating");
            truncate_to_words(&clean_for_speech(raw), max_words)
        }
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn truncate_to_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    format!("{}...", words[..max_words].join(" "))
}

struct SpeechPatterns {
    code_block: Regex,
    inline_code: Regex,
    heading: Regex,
    emphasis: Regex,
    link: Regex,
    bullet: Regex,
    numbered: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static SpeechPatterns {
    static PATTERNS: OnceLock<SpeechPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| SpeechPatterns {
        code_block: Regex::new(r"(?s)```.*?```").expect("valid regex"),
        inline_code: Regex::new(r"`[^`]+`").expect("valid regex"),
        heading: Regex::new(r"(?m)^#{1,6}\s+").expect("valid regex"),
        emphasis: Regex::new(r"\*{1,2}([^*]+)\*{1,2}").expect("valid regex"),
        link: Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"),
        bullet: Regex::new(r"(?m)^\s*[-*]\s+").expect("valid regex"),
        numbered: Regex::new(r"(?m)^\s*\d+\.\s+").expect("valid regex"),
        whitespace: Regex::new(r"\s+").expect("valid regex"),
    })
}

/// Strips markdown so the text reads naturally when spoken.
pub fn clean_for_speech(text: &str) -> String {
    let p = patterns();
    let text = p.code_block.replace_all(text, " (code block) ");
    let text = p.inline_code.replace_all(&text, "");
    let text = p.heading.replace_all(&text, "");
    let text = p.emphasis.replace_all(&text, "${1}");
    let text = p.link.replace_all(&text, "${1}");
    let text = p.bullet.replace_all(&text, "");
    let text = p.numbered.replace_all(&text, "");
    let text = p.whitespace.replace_all(&text, " ");
    text.trim().to_string()
}
