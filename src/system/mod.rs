//! Fire-and-forget desktop side effects: sounds and editor focus.

use crate::audio::earcon;
use crate::message::SoundKind;
use std::process::{Command, Stdio};

pub trait Desktop {
    fn play_sound(&self, kind: SoundKind);
    fn activate_editor(&self, project: Option<&str>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDesktop;

impl Desktop for SystemDesktop {
    fn play_sound(&self, kind: SoundKind) {
        earcon::play(kind);
    }

    fn activate_editor(&self, project: Option<&str>) {
        spawn_detached(activate_command(project));
    }
}

/// Starts `cmd` and lets it run on its own; the child is never awaited.
pub fn spawn_detached(mut cmd: Command) {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let spawned = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(err) = spawned {
        tracing::debug!(program, error = %err, "detached command failed to start");
    }
}

fn activate_command(project: Option<&str>) -> Command {
    if cfg!(target_os = "macos") {
        let script = match project {
            Some(project) => format!(
                r#"tell application "System Events"
  tell process "Code"
    set frontmost to true
    repeat with w in windows
      if name of w contains "{}" then
        perform action "AXRaise" of w
        exit repeat
      end if
    end repeat
  end tell
end tell"#,
                project.replace('"', "")
            ),
            None => r#"tell application "Visual Studio Code" to activate"#.to_string(),
        };
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg(script);
        cmd
    } else if cfg!(target_os = "windows") {
        let title = project.unwrap_or("Visual Studio Code").replace('\'', "''");
        let script = format!(
            "$shell = New-Object -ComObject WScript.Shell; $shell.AppActivate('{title}')"
        );
        let mut cmd = Command::new("powershell");
        cmd.arg("-NoProfile").arg("-Command").arg(script);
        cmd
    } else {
        let mut cmd = Command::new("wmctrl");
        cmd.arg("-a").arg(project.unwrap_or("Visual Studio Code"));
        cmd
    }
}
