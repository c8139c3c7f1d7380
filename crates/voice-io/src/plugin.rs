use crate::{AudioSource, Recognizer, RecognizerConfig, Result, SpeechEngine, SystemTts, TtsConfig};
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsBackendKind {
    #[default]
    System,
    Mock,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioBackendKind {
    #[default]
    Microphone,
    Mock,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerKind {
    #[default]
    Google,
    Mock,
}

pub fn new_speech_engine(kind: TtsBackendKind, cfg: TtsConfig) -> Result<Box<dyn SpeechEngine>> {
    match kind {
        TtsBackendKind::System => Ok(Box::new(SystemTts::new(cfg))),
        TtsBackendKind::Mock => {
            #[cfg(feature = "mock")]
            {
                Ok(Box::new(crate::MockTts::new(cfg)))
            }
            #[cfg(not(feature = "mock"))]
            {
                Err(crate::VoiceError::Unsupported("mock feature not enabled"))
            }
        }
    }
}

pub fn new_audio_source(
    kind: AudioBackendKind,
    interrupt: Arc<AtomicBool>,
) -> Result<Box<dyn AudioSource>> {
    match kind {
        AudioBackendKind::Microphone => {
            #[cfg(feature = "audio")]
            {
                Ok(Box::new(crate::mic::MicSource::new().with_interrupt(interrupt)))
            }
            #[cfg(not(feature = "audio"))]
            {
                let _ = interrupt;
                Err(crate::VoiceError::Unsupported("audio feature not enabled"))
            }
        }
        AudioBackendKind::Mock => {
            let _ = interrupt;
            #[cfg(feature = "mock")]
            {
                Ok(Box::new(crate::ScriptedSource::default()))
            }
            #[cfg(not(feature = "mock"))]
            {
                Err(crate::VoiceError::Unsupported("mock feature not enabled"))
            }
        }
    }
}

pub fn new_recognizer(kind: RecognizerKind, cfg: &RecognizerConfig) -> Result<Box<dyn Recognizer>> {
    match kind {
        RecognizerKind::Google => {
            #[cfg(feature = "google-stt")]
            {
                crate::GoogleRecognizer::new(cfg.clone()).map(|r| Box::new(r) as Box<dyn Recognizer>)
            }
            #[cfg(not(feature = "google-stt"))]
            {
                let _ = cfg;
                Err(crate::VoiceError::Unsupported("google-stt feature not enabled"))
            }
        }
        RecognizerKind::Mock => {
            #[cfg(feature = "mock")]
            {
                Ok(Box::new(crate::ScriptedRecognizer::default()))
            }
            #[cfg(not(feature = "mock"))]
            {
                Err(crate::VoiceError::Unsupported("mock feature not enabled"))
            }
        }
    }
}
