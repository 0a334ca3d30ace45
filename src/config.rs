use crate::tts::provider::{ProviderError, ProviderKind, SpeechProvider};
use anyhow::{bail, Context};
use clap::ValueEnum;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the herald state directory. Used by tests and sandboxed hosts.
pub const HOME_ENV: &str = "HERALD_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Tts,
    #[default]
    Alerts,
    Silent,
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Style::Tts => "tts",
            Style::Alerts => "alerts",
            Style::Silent => "silent",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Provider name as written in the file; resolved when speech is needed.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub elevenlabs: Option<ElevenLabsConfig>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl TtsConfig {
    pub fn provider_kind(&self) -> Result<ProviderKind, ProviderError> {
        self.provider.parse()
    }

    pub fn build_provider(&self) -> Result<Box<dyn SpeechProvider>, ProviderError> {
        self.provider_kind()?.build(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ElevenLabsConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub voice_id: String,
    #[serde(default)]
    pub model_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_max_words")]
    pub max_words: u32,
    #[serde(default)]
    pub summary_prompt: Option<String>,
    #[serde(default)]
    pub activate_editor: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    #[serde(default = "default_summarizer_command")]
    pub command: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            return Self::load_from_path(&path);
        }
        Ok(Self::default())
    }

    /// Hook entry points never fail on a broken config file; they announce
    /// with defaults instead.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = ?err, "config unreadable; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::default_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("write config at {}", path.display()))
    }

    pub fn init_default() -> anyhow::Result<PathBuf> {
        Self::default().save()
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(herald_dir()?.join("config.json"))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.preferences.max_words == 0 {
            bail!("max_words requires a positive number");
        }

        if self.tts.provider_kind()? == ProviderKind::ElevenLabs {
            match &self.tts.elevenlabs {
                Some(creds) if !creds.api_key.is_empty() && !creds.voice_id.is_empty() => {}
                _ => bail!("elevenlabs provider requires tts.elevenlabs.apiKey and voiceId"),
            }
        }

        if self.summarizer.command.trim().is_empty() {
            bail!("summarizer.command must not be empty");
        }

        Ok(())
    }
}

/// Directory holding the config, lock and history files.
pub fn herald_dir() -> anyhow::Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let base = BaseDirs::new().context("unable to resolve home directory")?;
    Ok(base.home_dir().join(".config").join("herald"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            style: Style::default(),
            tts: TtsConfig::default(),
            preferences: Preferences::default(),
            summarizer: SummarizerConfig::default(),
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            elevenlabs: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
            summary_prompt: None,
            activate_editor: false,
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            command: default_summarizer_command(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_provider() -> String {
    ProviderKind::platform_default().to_string()
}

fn default_max_words() -> u32 {
    50
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_summarizer_command() -> String {
    "claude".to_string()
}
