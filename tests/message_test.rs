use herald::config::{Config, Style};
use herald::events::{NotificationType, StopInput};
use herald::message::{
    clean_for_speech, count_words, fit_to_budget, notification_message, stop_message,
    truncate_to_words, Delivery, SoundKind,
};
use herald::summarize::{build_prompt, Summarizer};
use herald::transcript::TranscriptReader;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

struct CannedSummary(Option<&'static str>, RefCell<Vec<(usize, Option<String>)>>);

impl CannedSummary {
    fn new(summary: Option<&'static str>) -> Self {
        Self(summary, RefCell::new(Vec::new()))
    }
}

impl Summarizer for CannedSummary {
    fn summarize(&self, _text: &str, max_words: usize, prompt: Option<&str>) -> Option<String> {
        self.1.borrow_mut().push((max_words, prompt.map(str::to_string)));
        self.0.map(str::to_string)
    }
}

struct CannedTranscript(&'static str, RefCell<Vec<PathBuf>>);

impl TranscriptReader for CannedTranscript {
    fn last_assistant_message(&self, path: &Path) -> String {
        self.1.borrow_mut().push(path.to_path_buf());
        self.0.to_string()
    }
}

fn config(style: Style, max_words: u32) -> Config {
    let mut config = Config::default();
    config.style = style;
    config.preferences.max_words = max_words;
    config
}

#[test]
fn clean_leaves_plain_prose_alone() {
    let text = "I fixed the failing test and updated the docs.";
    assert_eq!(clean_for_speech(text), text);
}

#[test]
fn clean_replaces_fenced_code() {
    let text = "Run this:\n```rust\nfn main() {}\n```\nThen rebuild.";
    assert_eq!(clean_for_speech(text), "Run this: (code block) Then rebuild.");
}

#[test]
fn clean_unwraps_markdown() {
    assert_eq!(clean_for_speech("**bold**"), "bold");
    assert_eq!(clean_for_speech("an *italic* word"), "an italic word");
    assert_eq!(clean_for_speech("see [the docs](https://example.com)"), "see the docs");
    assert_eq!(clean_for_speech("call `run()` now"), "call now");
    assert_eq!(clean_for_speech("## Summary\nAll good"), "Summary All good");
    assert_eq!(clean_for_speech("- one\n- two\n1. three"), "one two three");
}

#[test]
fn truncate_keeps_first_words_with_ellipsis() {
    assert_eq!(truncate_to_words("a b c d e", 3), "a b c...");
    assert_eq!(truncate_to_words("a b", 3), "a b");
    assert_eq!(count_words("  a \n b\tc "), 3);
}

#[test]
fn short_text_is_cleaned_verbatim() {
    let summarizer = CannedSummary::new(Some("unused"));
    let out = fit_to_budget("All **done** here", &config(Style::Tts, 5), &summarizer);

    assert_eq!(out, "All done here");
    assert!(summarizer.1.borrow().is_empty());
}

#[test]
fn long_text_uses_summary() {
    let summarizer = CannedSummary::new(Some("Short summary"));
    let mut cfg = config(Style::Tts, 3);
    cfg.preferences.summary_prompt = Some("Be terse".to_string());

    let out = fit_to_budget("one two three four five", &cfg, &summarizer);

    assert_eq!(out, "Short summary");
    assert_eq!(
        summarizer.1.borrow().as_slice(),
        &[(3, Some("Be terse".to_string()))]
    );
}

#[test]
fn long_text_falls_back_to_truncation() {
    let summarizer = CannedSummary::new(None);
    let out = fit_to_budget("one **two** three four five", &config(Style::Tts, 3), &summarizer);

    assert_eq!(out, "one two three...");
}

#[test]
fn zero_budget_is_treated_as_one_word() {
    let summarizer = CannedSummary::new(None);
    let out = fit_to_budget("Tests pass now", &config(Style::Tts, 0), &summarizer);

    assert_eq!(out, "Tests...");
    assert_eq!(summarizer.1.borrow()[0].0, 1);
    assert_eq!(fit_to_budget("Done", &config(Style::Tts, 0), &summarizer), "Done");
}

#[test]
fn alerts_stop_message_skips_transcript() {
    let transcript = CannedTranscript("should not be read", RefCell::new(Vec::new()));
    let input = StopInput {
        transcript_path: Some(PathBuf::from("/tmp/t.jsonl")),
        ..StopInput::default()
    };

    let message = stop_message(&input, &config(Style::Alerts, 50), &transcript, &CannedSummary::new(None));

    assert_eq!(message.content, "Claude is done");
    assert_eq!(message.delivery, Delivery::Sound(SoundKind::Alert));
    assert!(transcript.1.borrow().is_empty());
}

#[test]
fn tts_stop_without_transcript_says_done() {
    let transcript = CannedTranscript("unused", RefCell::new(Vec::new()));
    let message = stop_message(
        &StopInput::default(),
        &config(Style::Tts, 50),
        &transcript,
        &CannedSummary::new(None),
    );

    assert_eq!(message.content, "Done");
    assert_eq!(message.delivery, Delivery::Speech);
}

#[test]
fn tts_stop_speaks_cleaned_transcript_text() {
    let transcript = CannedTranscript("Tests **pass** now.", RefCell::new(Vec::new()));
    let input = StopInput {
        transcript_path: Some(PathBuf::from("/tmp/t.jsonl")),
        ..StopInput::default()
    };

    let message = stop_message(&input, &config(Style::Tts, 50), &transcript, &CannedSummary::new(None));

    assert_eq!(message.content, "Tests pass now.");
    assert_eq!(transcript.1.borrow().as_slice(), &[PathBuf::from("/tmp/t.jsonl")]);
}

#[test]
fn tts_stop_falls_back_when_cleaning_empties_text() {
    let transcript = CannedTranscript("`only_code`", RefCell::new(Vec::new()));
    let input = StopInput {
        transcript_path: Some(PathBuf::from("/tmp/t.jsonl")),
        ..StopInput::default()
    };

    let message = stop_message(&input, &config(Style::Tts, 50), &transcript, &CannedSummary::new(None));

    assert_eq!(message.content, "Done");
}

#[test]
fn notification_messages_by_type() {
    let permission = notification_message(Some(NotificationType::PermissionPrompt), Style::Alerts);
    assert_eq!(permission.content, "Claude needs permission");
    assert_eq!(permission.delivery, Delivery::Sound(SoundKind::Ping));

    let elicitation = notification_message(Some(NotificationType::ElicitationDialog), Style::Tts);
    assert_eq!(elicitation.content, "Claude needs more information");
    assert_eq!(elicitation.delivery, Delivery::Speech);

    let other = notification_message(None, Style::Silent);
    assert_eq!(other.content, "Claude is waiting for input");
    assert_eq!(other.delivery, Delivery::Silent);
}

#[test]
fn summary_prompts() {
    let default = build_prompt("TEXT", 25, None);
    assert!(default.contains("under 25 words"));
    assert!(default.ends_with("Text to summarize:\nTEXT"));

    let custom = build_prompt("TEXT", 10, Some("Sound like a pirate"));
    assert_eq!(
        custom,
        "Sound like a pirate\n\nKeep response under 10 words.\n\nText:\nTEXT"
    );
}
