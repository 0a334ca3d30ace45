use super::provider::SpeechProvider;
use super::{command_on_path, run_to_completion};
use std::process::Command;

/// macOS `say`.
pub struct SayProvider;

impl SpeechProvider for SayProvider {
    fn name(&self) -> &str {
        "macOS Say"
    }

    fn speak(&self, text: &str) {
        let mut cmd = Command::new("say");
        cmd.arg(text);
        run_to_completion(self.name(), cmd);
    }

    fn is_available(&self) -> bool {
        command_on_path("say")
    }
}
