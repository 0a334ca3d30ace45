use crate::message::SoundKind;
use crate::system::spawn_detached;
use std::process::Command;

/// Fires the platform's alert or ping sound without waiting for it.
pub fn play(kind: SoundKind) {
    spawn_detached(sound_command(kind));
}

fn sound_command(kind: SoundKind) -> Command {
    if cfg!(target_os = "macos") {
        let sound = match kind {
            SoundKind::Alert => "/System/Library/Sounds/Glass.aiff",
            SoundKind::Ping => "/System/Library/Sounds/Ping.aiff",
        };
        let mut cmd = Command::new("afplay");
        cmd.arg(sound);
        cmd
    } else if cfg!(target_os = "windows") {
        let sound = match kind {
            SoundKind::Alert => "[System.Media.SystemSounds]::Exclamation.Play()",
            SoundKind::Ping => "[System.Media.SystemSounds]::Asterisk.Play()",
        };
        let mut cmd = Command::new("powershell");
        cmd.arg("-NoProfile").arg("-Command").arg(sound);
        cmd
    } else {
        let sound = match kind {
            SoundKind::Alert => "/usr/share/sounds/freedesktop/stereo/complete.oga",
            SoundKind::Ping => "/usr/share/sounds/freedesktop/stereo/message.oga",
        };
        let mut cmd = Command::new("paplay");
        cmd.arg(sound);
        cmd
    }
}
