use action_providers::ProviderConfig;
use anyhow::{Context, Result};
use command_router::{RouterConfig, DEFAULT_WAKE_WORDS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use voice_io::plugin::{AudioBackendKind, RecognizerKind, TtsBackendKind};
use voice_io::{RecognizerConfig, TtsConfig};

pub const STT_KEY_VAR: &str = "JARVIS_STT_KEY";
pub const STT_ENDPOINT_VAR: &str = "JARVIS_STT_ENDPOINT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Voice,
    Text,
}

/// Capture limits, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenSettings {
    pub timeout_ms: u64,
    pub phrase_limit_ms: u64,
    pub calibration_ms: u64,
}

impl Default for ListenSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            phrase_limit_ms: 8_000,
            calibration_ms: 600,
        }
    }
}

impl ListenSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn phrase_limit(&self) -> Duration {
        Duration::from_millis(self.phrase_limit_ms)
    }

    pub fn calibration(&self) -> Duration {
        Duration::from_millis(self.calibration_ms)
    }
}

/// Static assistant options, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix for printed lines and the online announcement
    pub name: String,
    /// Addressed in the greeting and farewell when set
    pub user_name: Option<String>,
    pub wake_words: Vec<String>,
    pub input: InputMode,
    pub tts: TtsConfig,
    pub tts_backend: TtsBackendKind,
    pub audio_backend: AudioBackendKind,
    pub recognizer_backend: RecognizerKind,
    pub recognizer: RecognizerConfig,
    pub listen: ListenSettings,
    pub summary_sentences: u8,
    pub providers: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "Jarvis".to_string(),
            user_name: None,
            wake_words: DEFAULT_WAKE_WORDS.iter().map(|w| w.to_string()).collect(),
            input: InputMode::Voice,
            tts: TtsConfig::default(),
            tts_backend: TtsBackendKind::default(),
            audio_backend: AudioBackendKind::default(),
            recognizer_backend: RecognizerKind::default(),
            recognizer: RecognizerConfig::default(),
            listen: ListenSettings::default(),
            summary_sentences: 2,
            providers: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Defaults, or the JSON file at `path` layered over them. A path that was
    /// asked for but cannot be read is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Recognizer key and endpoint overrides from the environment.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(STT_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            self.recognizer.key = Some(key);
        }
        if let Some(endpoint) = lookup(STT_ENDPOINT_VAR).filter(|e| !e.trim().is_empty()) {
            self.recognizer.endpoint = endpoint;
        }
    }

    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            wake_words: self.wake_words.clone(),
            user_name: self.user_name.clone(),
            summary_sentences: self.summary_sentences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_fixed_configuration() {
        let cfg = Config::default();
        assert_eq!(cfg.name, "Jarvis");
        assert_eq!(cfg.wake_words, ["jarvis", "hey jarvis"]);
        assert_eq!(cfg.input, InputMode::Voice);
        assert_eq!(cfg.tts.rate_wpm, 180);
        assert_eq!(cfg.listen.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.listen.phrase_limit(), Duration::from_secs(8));
        assert_eq!(cfg.listen.calibration(), Duration::from_millis(600));
        assert_eq!(cfg.recognizer.language, "en-US");
        assert_eq!(cfg.summary_sentences, 2);
        assert_eq!(cfg.router_config(), RouterConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = serde_json::from_str(
            r#"{"input": "text", "user_name": "Sam", "tts": {"rate_wpm": 160}, "listen": {"timeout_ms": 3000}}"#,
        )
        .unwrap();
        assert_eq!(cfg.input, InputMode::Text);
        assert_eq!(cfg.user_name.as_deref(), Some("Sam"));
        assert_eq!(cfg.tts.rate_wpm, 160);
        assert_eq!(cfg.listen.timeout_ms, 3000);
        assert_eq!(cfg.listen.phrase_limit_ms, 8000);
        assert_eq!(cfg.wake_words, ["jarvis", "hey jarvis"]);
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn load_reads_requested_file() {
        let path = std::env::temp_dir().join(format!("jarvis-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"name": "Friday", "wake_words": ["friday"]}"#).unwrap();
        let cfg = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(cfg.name, "Friday");
        assert_eq!(cfg.router_config().wake_words, ["friday"]);
    }

    #[test]
    fn missing_requested_file_is_an_error() {
        let path = std::env::temp_dir().join("jarvis-config-does-not-exist.json");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn env_overrides_recognizer() {
        let vars: HashMap<&str, &str> = [(STT_KEY_VAR, "abc123"), (STT_ENDPOINT_VAR, " ")].into();
        let mut cfg = Config::default();
        cfg.apply_env_with(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(cfg.recognizer.key.as_deref(), Some("abc123"));
        // blank values are ignored
        assert_eq!(cfg.recognizer.endpoint, RecognizerConfig::default().endpoint);
    }
}
