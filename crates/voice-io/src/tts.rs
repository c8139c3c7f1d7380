//! Text-to-speech through the platform's own synthesizer.

use crate::{Result, SpeechEngine, TtsConfig, VoiceError};
use std::process::Command;
use tracing::{debug, warn};

/// Rate that maps onto SAPI's neutral `Rate = 0`.
const SAPI_NEUTRAL_WPM: i32 = 180;
const SAPI_WPM_PER_STEP: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Synth {
    /// macOS `say`
    Say,
    /// `espeak-ng` or `espeak`
    Espeak(&'static str),
    /// Windows PowerShell with System.Speech
    PowerShell,
    Unavailable,
}

pub struct SystemTts {
    config: TtsConfig,
    synth: Synth,
}

impl SystemTts {
    fn detect() -> Synth {
        if cfg!(target_os = "macos") {
            Synth::Say
        } else if cfg!(target_os = "windows") {
            Synth::PowerShell
        } else if which::which("espeak-ng").is_ok() {
            Synth::Espeak("espeak-ng")
        } else if which::which("espeak").is_ok() {
            Synth::Espeak("espeak")
        } else {
            Synth::Unavailable
        }
    }

    fn command(&self, text: &str) -> Option<Command> {
        let (program, args) = command_line(self.synth, &self.config, text)?;
        let mut cmd = Command::new(program);
        cmd.args(args);
        Some(cmd)
    }
}

impl SpeechEngine for SystemTts {
    fn new(config: TtsConfig) -> Self
    where
        Self: Sized,
    {
        let synth = Self::detect();
        if synth == Synth::Unavailable {
            warn!("no speech synthesizer found; responses will only be printed");
        } else {
            debug!(?synth, rate = config.rate_wpm, "speech synthesizer selected");
        }
        Self { config, synth }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        let mut cmd = self
            .command(text)
            .ok_or_else(|| VoiceError::Synthesis("no speech synthesizer available".into()))?;
        let status = cmd
            .status()
            .map_err(|e| VoiceError::Synthesis(format!("spawn: {e}")))?;
        if !status.success() {
            return Err(VoiceError::Synthesis(format!("synthesizer exited with {status}")));
        }
        Ok(())
    }
}

fn command_line(
    synth: Synth,
    config: &TtsConfig,
    text: &str,
) -> Option<(&'static str, Vec<String>)> {
    let rate = config.rate_wpm.to_string();
    match synth {
        Synth::Say => {
            let mut args = vec!["-r".to_string(), rate];
            if let Some(voice) = &config.voice {
                args.push("-v".into());
                args.push(voice.clone());
            }
            args.push("--".into());
            args.push(text.to_string());
            Some(("say", args))
        }
        Synth::Espeak(program) => {
            let mut args = vec!["-s".to_string(), rate];
            if let Some(voice) = &config.voice {
                args.push("-v".into());
                args.push(voice.clone());
            }
            args.push("--".into());
            args.push(text.to_string());
            Some((program, args))
        }
        Synth::PowerShell => {
            let mut script = String::from(
                "Add-Type -AssemblyName System.Speech; \
                 $synth = New-Object System.Speech.Synthesis.SpeechSynthesizer; ",
            );
            if let Some(voice) = &config.voice {
                script.push_str(&format!("$synth.SelectVoice('{}'); ", escape_ps(voice)));
            }
            script.push_str(&format!(
                "$synth.Rate = {}; $synth.Speak('{}');",
                sapi_rate(config.rate_wpm),
                escape_ps(text)
            ));
            Some(("powershell", vec!["-NoProfile".into(), "-Command".into(), script]))
        }
        Synth::Unavailable => None,
    }
}

/// Map words per minute onto SAPI's -10..=10 rate scale.
fn sapi_rate(rate_wpm: u32) -> i32 {
    let wpm = i32::try_from(rate_wpm).unwrap_or(i32::MAX);
    (wpm.saturating_sub(SAPI_NEUTRAL_WPM) / SAPI_WPM_PER_STEP).clamp(-10, 10)
}

fn escape_ps(text: &str) -> String {
    text.replace('\'', "''").replace(['\n', '\r'], " ")
}
