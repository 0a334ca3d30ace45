use crate::config::SummarizerConfig;
use anyhow::Context;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Set on the summarizer child so hooks it fires do not announce.
pub const SUMMARIZING_ENV: &str = "HERALD_SUMMARIZING";

pub const DEFAULT_PROMPT: &str = "Summarize this for text-to-speech output. Requirements:
- Keep it under {max_words} words
- Write in natural spoken language (no bullet points, no markdown)
- Spell out abbreviations and acronyms
- Avoid special characters, code snippets, or URLs
- Focus on the key outcome or action taken
- Make it sound conversational, as if briefly telling someone what happened

Text to summarize:
";

pub trait Summarizer {
    /// `None` on any failure; never errors past this boundary.
    fn summarize(&self, text: &str, max_words: usize, prompt: Option<&str>) -> Option<String>;
}

pub fn build_prompt(text: &str, max_words: usize, custom: Option<&str>) -> String {
    let header = match custom {
        Some(custom) => format!("{custom}\n\nKeep response under {max_words} words.\n\nText:\n"),
        None => DEFAULT_PROMPT.replace("{max_words}", &max_words.to_string()),
    };
    header + text
}

/// Runs the assistant CLI in print mode with tools disabled.
#[derive(Debug, Clone)]
pub struct CommandSummarizer {
    command: String,
    timeout: Duration,
}

impl CommandSummarizer {
    pub fn new(config: &SummarizerConfig) -> Self {
        Self {
            command: config.command.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    fn run(&self, prompt: &str) -> anyhow::Result<Option<String>> {
        let mut child = Command::new(&self.command)
            .arg("-p")
            .arg(prompt)
            .arg("--tools")
            .arg("")
            .env(SUMMARIZING_ENV, "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("spawn {}", self.command))?;

        let stdout = child.stdout.take().context("capture summarizer stdout")?;
        let reader = thread::spawn(move || {
            let mut buf = String::new();
            let mut handle = stdout;
            let _ = handle.read_to_string(&mut buf);
            buf
        });

        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait().context("poll summarizer")? {
                let output = reader.join().unwrap_or_default();
                if !status.success() {
                    anyhow::bail!("summarizer exited with status {status}");
                }
                let output = output.trim();
                return Ok((!output.is_empty()).then(|| output.to_string()));
            }

            if start.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                let _ = reader.join();
                anyhow::bail!("summarizer timed out after {}s", self.timeout.as_secs());
            }

            thread::sleep(Duration::from_millis(50));
        }
    }
}

impl Summarizer for CommandSummarizer {
    fn summarize(&self, text: &str, max_words: usize, prompt: Option<&str>) -> Option<String> {
        let prompt = build_prompt(text, max_words, prompt);
        match self.run(&prompt) {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(error = ?err, "summarize failed");
                None
            }
        }
    }
}
