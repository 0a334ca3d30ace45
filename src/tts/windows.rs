use super::provider::SpeechProvider;
use super::run_to_completion;
use std::process::Command;

/// PowerShell `System.Speech` synthesizer.
pub struct WindowsProvider;

impl WindowsProvider {
    pub fn script(text: &str) -> String {
        let escaped = text.replace('\'', "''");
        format!(
            "Add-Type -AssemblyName System.Speech; \
             (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{escaped}')"
        )
    }
}

impl SpeechProvider for WindowsProvider {
    fn name(&self) -> &str {
        "Windows SAPI"
    }

    fn speak(&self, text: &str) {
        let mut cmd = Command::new("powershell");
        cmd.arg("-NoProfile").arg("-Command").arg(Self::script(text));
        run_to_completion(self.name(), cmd);
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "windows")
    }
}
