use anyhow::{bail, Context};
use std::path::Path;
use std::process::{Command, Stdio};

/// Plays an audio file and waits for the player to exit.
pub fn play_file(path: &Path) -> anyhow::Result<()> {
    let player = if cfg!(target_os = "macos") { "afplay" } else { "mpg123" };
    let mut cmd = Command::new(player);
    if player == "mpg123" {
        cmd.arg("-q");
    }
    let status = cmd
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("play audio with {player}: {}", path.display()))?;

    if !status.success() {
        bail!("{player} exited with status {status}");
    }

    Ok(())
}
