use super::provider::{ProviderError, SpeechProvider};
use crate::config::TtsConfig;

pub fn build(config: &TtsConfig) -> Result<Box<dyn SpeechProvider>, ProviderError> {
    let creds = config.elevenlabs.clone().unwrap_or_default();
    if creds.api_key.is_empty() {
        return Err(ProviderError::MissingCredentials {
            provider: "elevenlabs",
            field: "an API key",
        });
    }
    if creds.voice_id.is_empty() {
        return Err(ProviderError::MissingCredentials {
            provider: "elevenlabs",
            field: "a voice ID",
        });
    }

    #[cfg(feature = "elevenlabs")]
    {
        Ok(Box::new(imp::ElevenLabsProvider::new(creds, config.timeout_seconds)))
    }
    #[cfg(not(feature = "elevenlabs"))]
    {
        Err(ProviderError::NotEnabled("elevenlabs"))
    }
}

#[cfg(feature = "elevenlabs")]
mod imp {
    use crate::audio::renderer;
    use crate::config::ElevenLabsConfig;
    use crate::tts::provider::SpeechProvider;
    use anyhow::{bail, Context};
    use std::io::Write;
    use std::time::Duration;

    const API_BASE: &str = "https://api.elevenlabs.io/v1";
    const DEFAULT_MODEL: &str = "eleven_monolingual_v1";

    pub struct ElevenLabsProvider {
        creds: ElevenLabsConfig,
        timeout: Duration,
    }

    impl ElevenLabsProvider {
        pub fn new(creds: ElevenLabsConfig, timeout_seconds: u64) -> Self {
            Self {
                creds,
                timeout: Duration::from_secs(timeout_seconds),
            }
        }

        fn client(&self) -> anyhow::Result<reqwest::blocking::Client> {
            reqwest::blocking::Client::builder()
                .timeout(self.timeout)
                .build()
                .context("build http client")
        }

        fn synthesize(&self, text: &str) -> anyhow::Result<Vec<u8>> {
            let model = self.creds.model_id.as_deref().unwrap_or(DEFAULT_MODEL);
            let body = serde_json::json!({
                "text": text,
                "model_id": model,
                "voice_settings": { "stability": 0.5, "similarity_boost": 0.5 },
            });

            let response = self
                .client()?
                .post(format!("{API_BASE}/text-to-speech/{}", self.creds.voice_id))
                .header("xi-api-key", &self.creds.api_key)
                .json(&body)
                .send()
                .context("send elevenlabs request")?;

            let status = response.status();
            if !status.is_success() {
                let detail = response.text().unwrap_or_default();
                bail!("elevenlabs API error: {status} - {detail}");
            }

            let bytes = response.bytes().context("read elevenlabs audio")?;
            Ok(bytes.to_vec())
        }

        fn speak_inner(&self, text: &str) -> anyhow::Result<()> {
            let audio = self.synthesize(text)?;
            let mut temp = tempfile::Builder::new()
                .prefix("herald-")
                .suffix(".mp3")
                .tempfile()
                .context("create temp file")?;
            temp.write_all(&audio).context("write audio bytes")?;
            temp.flush()?;
            renderer::play_file(temp.path())
        }
    }

    impl SpeechProvider for ElevenLabsProvider {
        fn name(&self) -> &str {
            "ElevenLabs"
        }

        fn speak(&self, text: &str) {
            if let Err(err) = self.speak_inner(text) {
                tracing::warn!(error = ?err, "elevenlabs speech failed");
            }
        }

        fn is_available(&self) -> bool {
            let Ok(client) = self.client() else {
                return false;
            };
            client
                .get(format!("{API_BASE}/user"))
                .header("xi-api-key", &self.creds.api_key)
                .send()
                .map(|response| response.status().is_success())
                .unwrap_or(false)
        }
    }
}
