pub mod elevenlabs;
pub mod espeak;
pub mod provider;
pub mod say;
pub mod windows;

use crate::config::TtsConfig;
use provider::ProviderKind;
use serde::Serialize;
use std::process::{Command, Stdio};

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    pub display_name: Option<String>,
    pub available: bool,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Checks every known provider against the given settings.
pub fn providers_info(config: &TtsConfig) -> Vec<ProviderInfo> {
    ProviderKind::ALL
        .into_iter()
        .map(|kind| {
            let selected = config.provider_kind().is_ok_and(|selected| selected == kind);
            match kind.build(config) {
                Ok(provider) => ProviderInfo {
                    name: kind.to_string(),
                    display_name: Some(provider.name().to_string()),
                    available: provider.is_available(),
                    selected,
                    error: None,
                },
                Err(err) => ProviderInfo {
                    name: kind.to_string(),
                    display_name: None,
                    available: false,
                    selected,
                    error: Some(err.to_string()),
                },
            }
        })
        .collect()
}

/// Waits for a speech command, logging instead of failing.
pub(crate) fn run_to_completion(provider: &str, mut cmd: Command) {
    cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    match cmd.status() {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!(provider, %status, "speech command failed"),
        Err(err) => tracing::warn!(provider, error = %err, "speech command could not start"),
    }
}

pub(crate) fn command_on_path(program: &str) -> bool {
    let finder = if cfg!(target_os = "windows") { "where" } else { "which" };
    Command::new(finder)
        .arg(program)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
