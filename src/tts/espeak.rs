use super::provider::SpeechProvider;
use super::{command_on_path, run_to_completion};
use std::process::Command;

pub struct EspeakProvider;

impl SpeechProvider for EspeakProvider {
    fn name(&self) -> &str {
        "eSpeak"
    }

    fn speak(&self, text: &str) {
        let mut cmd = Command::new("espeak");
        cmd.arg("--").arg(text);
        run_to_completion(self.name(), cmd);
    }

    fn is_available(&self) -> bool {
        command_on_path("espeak")
    }
}
