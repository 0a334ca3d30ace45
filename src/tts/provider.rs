use crate::config::TtsConfig;
use std::str::FromStr;

use super::{elevenlabs, espeak::EspeakProvider, say::SayProvider, windows::WindowsProvider};

pub trait SpeechProvider {
    fn name(&self) -> &str;
    /// Blocks until speech has finished or failed. Failures are logged, not returned.
    fn speak(&self, text: &str);
    fn is_available(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("unknown TTS provider: {0}")]
    UnknownProvider(String),
    #[error("{provider} provider requires {field}")]
    MissingCredentials {
        provider: &'static str,
        field: &'static str,
    },
    #[error("{0} provider not enabled; rebuild with --features {0}")]
    NotEnabled(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    MacOs,
    Windows,
    Espeak,
    ElevenLabs,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::MacOs,
        ProviderKind::Windows,
        ProviderKind::Espeak,
        ProviderKind::ElevenLabs,
    ];

    pub fn platform_default() -> Self {
        if cfg!(target_os = "windows") {
            ProviderKind::Windows
        } else if cfg!(target_os = "linux") {
            ProviderKind::Espeak
        } else {
            ProviderKind::MacOs
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::MacOs => "macos",
            ProviderKind::Windows => "windows",
            ProviderKind::Espeak => "espeak",
            ProviderKind::ElevenLabs => "elevenlabs",
        }
    }

    pub fn build(self, config: &TtsConfig) -> Result<Box<dyn SpeechProvider>, ProviderError> {
        match self {
            ProviderKind::MacOs => Ok(Box::new(SayProvider)),
            ProviderKind::Windows => Ok(Box::new(WindowsProvider)),
            ProviderKind::Espeak => Ok(Box::new(EspeakProvider)),
            ProviderKind::ElevenLabs => elevenlabs::build(config),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name.trim())
            .ok_or_else(|| ProviderError::UnknownProvider(name.to_string()))
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
