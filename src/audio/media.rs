//! Quiets other audio while herald speaks.

use std::process::{Command, Stdio};

/// What [`MediaControl::duck`] changed, so it can be put back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaState {
    /// Output volume (0-100) before ducking.
    Volume(u8),
    /// An MPRIS player was playing and has been paused.
    Paused,
}

pub trait MediaControl {
    fn duck(&self) -> Option<MediaState>;
    fn restore(&self, state: MediaState);
}

struct MediaGuard<'a> {
    media: &'a dyn MediaControl,
    state: Option<MediaState>,
}

impl Drop for MediaGuard<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.media.restore(state);
        }
    }
}

/// Runs `f` with other audio ducked; restores on every exit path.
pub fn with_media_control<T>(media: &dyn MediaControl, f: impl FnOnce() -> T) -> T {
    let _guard = MediaGuard {
        media,
        state: media.duck(),
    };
    f()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMedia;

impl MediaControl for SystemMedia {
    fn duck(&self) -> Option<MediaState> {
        if cfg!(target_os = "macos") {
            let volume: u8 = output("osascript", &["-e", "output volume of (get volume settings)"])?
                .parse()
                .ok()?;
            if volume == 0 {
                return None;
            }
            let lowered = format!("set volume output volume {}", volume / 3);
            output("osascript", &["-e", &lowered])?;
            Some(MediaState::Volume(volume))
        } else if cfg!(target_os = "linux") {
            if output("playerctl", &["status"])?.as_str() != "Playing" {
                return None;
            }
            output("playerctl", &["pause"])?;
            Some(MediaState::Paused)
        } else {
            None
        }
    }

    fn restore(&self, state: MediaState) {
        let restored = match state {
            MediaState::Volume(volume) => {
                let script = format!("set volume output volume {volume}");
                output("osascript", &["-e", &script])
            }
            MediaState::Paused => output("playerctl", &["play"]),
        };
        if restored.is_none() {
            tracing::debug!(?state, "media restore failed");
        }
    }
}

fn output(program: &str, args: &[&str]) -> Option<String> {
    let out = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
}
