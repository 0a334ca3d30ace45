//! The two hook flows: resolve a message, take the unified lock, drop
//! repeats, announce, release.

use crate::audio::media::{with_media_control, MediaControl, SystemMedia};
use crate::config::{herald_dir, Config, TtsConfig};
use crate::coord::{hash_content, lock::WAIT_TIMEOUT, DedupStore, ExclusiveLock, FileLock, HistoryStore, LockGuard};
use crate::events::{NotificationInput, NotificationType, Outcome, Reason, StopInput};
use crate::message::{self, Delivery, Message};
use crate::summarize::{CommandSummarizer, Summarizer};
use crate::system::{Desktop, SystemDesktop};
use crate::transcript::{JsonlTranscript, TranscriptReader};
use crate::tts::provider::SpeechProvider;
use std::time::Duration;

/// Lock is held this much longer after a sound so back-to-back alerts don't overlap.
pub const ALERT_SPACING: Duration = Duration::from_secs(1);

/// Everything a handler touches outside its own logic.
pub trait Capabilities {
    fn lock(&self) -> &dyn ExclusiveLock;
    fn history(&self) -> &dyn DedupStore;
    fn transcript(&self) -> &dyn TranscriptReader;
    fn summarizer(&self) -> &dyn Summarizer;
    fn desktop(&self) -> &dyn Desktop;
    fn media(&self) -> &dyn MediaControl;
    fn speaker(&self, tts: &TtsConfig) -> anyhow::Result<Box<dyn SpeechProvider>>;

    fn lock_timeout(&self) -> Duration {
        WAIT_TIMEOUT
    }

    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// When focus moves to the editor relative to speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusOrder {
    BeforeSpeech,
    AfterSpeech,
}

pub fn handle_stop(input: &StopInput, config: &Config, caps: &dyn Capabilities) -> anyhow::Result<Outcome> {
    if !config.enabled {
        return Ok(Outcome::rejected(Reason::Disabled));
    }

    let message = message::stop_message(input, config, caps.transcript(), caps.summarizer());
    let project = input.project_name();
    announce(&message, config, project.as_deref(), FocusOrder::BeforeSpeech, caps)
}

pub fn handle_notification(
    input: &NotificationInput,
    config: &Config,
    caps: &dyn Capabilities,
) -> anyhow::Result<Outcome> {
    if !config.enabled {
        return Ok(Outcome::rejected(Reason::Disabled));
    }

    let Some(kind) = NotificationType::parse(&input.notification_type) else {
        tracing::debug!(notification_type = %input.notification_type, "ignoring notification type");
        return Ok(Outcome::rejected(Reason::InvalidType));
    };

    let message = message::notification_message(Some(kind), config.style);
    let project = input.project_name();
    announce(&message, config, project.as_deref(), FocusOrder::AfterSpeech, caps)
}

fn announce(
    message: &Message,
    config: &Config,
    project: Option<&str>,
    focus: FocusOrder,
    caps: &dyn Capabilities,
) -> anyhow::Result<Outcome> {
    let hash = hash_content(&message.content);

    let Some(_guard) = LockGuard::wait(caps.lock(), caps.lock_timeout()) else {
        tracing::info!("could not acquire lock; skipping announcement");
        return Ok(Outcome::rejected(Reason::NoLock));
    };

    // Silent announcements are not recorded, so they never mask a later audible one.
    if message.delivery != Delivery::Silent && !caps.history().check_and_record(&hash) {
        tracing::debug!(%hash, "duplicate announcement suppressed");
        return Ok(Outcome::rejected(Reason::Duplicate));
    }

    tracing::debug!(delivery = ?message.delivery, content = %message.content, "announcing");
    // Errors leave through `?` after the guard has released the lock.
    dispatch(message, config, project, focus, caps)?;
    Ok(Outcome::played())
}

fn dispatch(
    message: &Message,
    config: &Config,
    project: Option<&str>,
    focus: FocusOrder,
    caps: &dyn Capabilities,
) -> anyhow::Result<()> {
    let activate = config.preferences.activate_editor;

    match message.delivery {
        Delivery::Silent => {}
        Delivery::Sound(kind) => {
            caps.desktop().play_sound(kind);
            if activate {
                caps.desktop().activate_editor(project);
            }
            caps.pause(ALERT_SPACING);
        }
        Delivery::Speech => {
            let speaker = caps.speaker(&config.tts)?;
            if activate && focus == FocusOrder::BeforeSpeech {
                caps.desktop().activate_editor(project);
            }
            with_media_control(caps.media(), || speaker.speak(&message.content));
            if activate && focus == FocusOrder::AfterSpeech {
                caps.desktop().activate_editor(project);
            }
        }
    }

    Ok(())
}

/// Production capabilities: files in the herald directory and real OS commands.
pub struct SystemCapabilities {
    lock: FileLock,
    history: HistoryStore,
    transcript: JsonlTranscript,
    summarizer: CommandSummarizer,
    desktop: SystemDesktop,
    media: SystemMedia,
}

impl SystemCapabilities {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let dir = herald_dir()?;
        Ok(Self {
            lock: FileLock::in_dir(&dir),
            history: HistoryStore::in_dir(&dir),
            transcript: JsonlTranscript,
            summarizer: CommandSummarizer::new(&config.summarizer),
            desktop: SystemDesktop,
            media: SystemMedia,
        })
    }
}

impl Capabilities for SystemCapabilities {
    fn lock(&self) -> &dyn ExclusiveLock {
        &self.lock
    }

    fn history(&self) -> &dyn DedupStore {
        &self.history
    }

    fn transcript(&self) -> &dyn TranscriptReader {
        &self.transcript
    }

    fn summarizer(&self) -> &dyn Summarizer {
        &self.summarizer
    }

    fn desktop(&self) -> &dyn Desktop {
        &self.desktop
    }

    fn media(&self) -> &dyn MediaControl {
        &self.media
    }

    fn speaker(&self, tts: &TtsConfig) -> anyhow::Result<Box<dyn SpeechProvider>> {
        Ok(tts.build_provider()?)
    }
}
