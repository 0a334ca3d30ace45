use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Payload of the host's turn-stop hook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopInput {
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

/// Payload of the host's notification hook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationInput {
    #[serde(default)]
    pub notification_type: String,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    PermissionPrompt,
    ElicitationDialog,
}

impl NotificationType {
    /// Only these subtypes are announced; everything else is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "permission_prompt" => Some(Self::PermissionPrompt),
            "elicitation_dialog" => Some(Self::ElicitationDialog),
            _ => None,
        }
    }
}

impl StopInput {
    pub fn from_payload(payload: Option<&str>) -> Self {
        parse_payload(payload, "stop")
    }

    pub fn project_name(&self) -> Option<String> {
        project_name(self.cwd.as_deref())
    }
}

impl NotificationInput {
    pub fn from_payload(payload: Option<&str>) -> Self {
        parse_payload(payload, "notification")
    }

    pub fn project_name(&self) -> Option<String> {
        project_name(self.cwd.as_deref())
    }
}

fn parse_payload<T: for<'de> Deserialize<'de> + Default>(payload: Option<&str>, hook: &str) -> T {
    let Some(raw) = payload else {
        return T::default();
    };
    match serde_json::from_str(raw) {
        Ok(input) => input,
        Err(err) => {
            tracing::debug!(hook, error = %err, "hook payload is not valid JSON; using empty input");
            T::default()
        }
    }
}

fn project_name(cwd: Option<&Path>) -> Option<String> {
    cwd?.file_name().map(|name| name.to_string_lossy().into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Disabled,
    InvalidType,
    Duplicate,
    NoLock,
    Played,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Reason::Disabled => "disabled",
            Reason::InvalidType => "invalid_type",
            Reason::Duplicate => "duplicate",
            Reason::NoLock => "no_lock",
            Reason::Played => "played",
        };
        f.write_str(name)
    }
}

/// Terminal state of one hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub handled: bool,
    pub reason: Reason,
}

impl Outcome {
    pub fn played() -> Self {
        Self {
            handled: true,
            reason: Reason::Played,
        }
    }

    pub fn rejected(reason: Reason) -> Self {
        Self {
            handled: false,
            reason,
        }
    }
}
