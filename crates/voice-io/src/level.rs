//! Energy-based voice activity helpers used by microphone capture.

use std::time::Duration;

/// Lowest energy threshold accepted after calibration, in i16 RMS units.
pub const ENERGY_FLOOR: f32 = 300.0;

/// Ratio between the calibrated threshold and the measured ambient level.
pub const DYNAMIC_ENERGY_RATIO: f32 = 1.5;

/// Trailing quiet that ends a phrase.
pub const PAUSE_THRESHOLD: Duration = Duration::from_millis(800);

pub fn rms(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt() as f32
}

/// Threshold above which a chunk counts as speech, given ambient noise.
pub fn ambient_threshold(ambient: &[i16]) -> f32 {
    (rms(ambient) * DYNAMIC_ENERGY_RATIO).max(ENERGY_FLOOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseState {
    /// No chunk has crossed the threshold yet
    Waiting,
    Recording,
    Complete,
}

/// Accumulates chunks from speech onset until a pause or the phrase limit.
#[derive(Debug)]
pub struct PhraseDetector {
    threshold: f32,
    sample_rate_hz: u32,
    phrase_limit: Duration,
    pause: Duration,
    samples: Vec<i16>,
    quiet_samples: usize,
    state: PhraseState,
}

impl PhraseDetector {
    pub fn new(threshold: f32, sample_rate_hz: u32, phrase_limit: Duration) -> Self {
        Self {
            threshold,
            sample_rate_hz: sample_rate_hz.max(1),
            phrase_limit,
            pause: PAUSE_THRESHOLD,
            samples: Vec::new(),
            quiet_samples: 0,
            state: PhraseState::Waiting,
        }
    }

    pub fn state(&self) -> PhraseState {
        self.state
    }

    pub fn push(&mut self, chunk: &[i16]) -> PhraseState {
        let loud = rms(chunk) > self.threshold;
        match self.state {
            PhraseState::Complete => {}
            PhraseState::Waiting => {
                if loud {
                    self.samples.extend_from_slice(chunk);
                    self.state = PhraseState::Recording;
                    self.check_limit();
                }
            }
            PhraseState::Recording => {
                self.samples.extend_from_slice(chunk);
                if loud {
                    self.quiet_samples = 0;
                } else {
                    self.quiet_samples += chunk.len();
                }
                if self.quiet_samples >= self.samples_for(self.pause) {
                    self.state = PhraseState::Complete;
                }
                self.check_limit();
            }
        }
        self.state
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    fn check_limit(&mut self) {
        if self.samples.len() >= self.samples_for(self.phrase_limit) {
            self.state = PhraseState::Complete;
        }
    }

    fn samples_for(&self, span: Duration) -> usize {
        (span.as_millis() * self.sample_rate_hz as u128 / 1000) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(len: usize, amplitude: i16) -> Vec<i16> {
        (0..len)
            .map(|i| if i % 2 == 0 { amplitude } else { -amplitude })
            .collect()
    }

    #[test]
    fn rms_of_square_wave_is_amplitude() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&tone(100, 1000)) - 1000.0).abs() < 0.01);
    }

    #[test]
    fn threshold_never_drops_below_floor() {
        assert_eq!(ambient_threshold(&[0; 64]), ENERGY_FLOOR);
        let noisy = ambient_threshold(&tone(64, 1000));
        assert!((noisy - 1500.0).abs() < 0.01);
    }

    #[test]
    fn quiet_chunks_keep_waiting() {
        let mut detector = PhraseDetector::new(500.0, 1000, Duration::from_secs(8));
        assert_eq!(detector.push(&tone(100, 10)), PhraseState::Waiting);
        assert!(detector.into_samples().is_empty());
    }

    #[test]
    fn phrase_ends_after_trailing_pause() {
        let mut detector = PhraseDetector::new(500.0, 1000, Duration::from_secs(8));
        assert_eq!(detector.push(&tone(100, 2000)), PhraseState::Recording);
        assert_eq!(detector.push(&tone(500, 10)), PhraseState::Recording);
        // a loud chunk resets the pause counter
        assert_eq!(detector.push(&tone(100, 2000)), PhraseState::Recording);
        assert_eq!(detector.push(&tone(700, 10)), PhraseState::Recording);
        assert_eq!(detector.push(&tone(100, 10)), PhraseState::Complete);
        assert_eq!(detector.into_samples().len(), 1500);
    }

    #[test]
    fn phrase_limit_cuts_long_speech() {
        let mut detector = PhraseDetector::new(500.0, 1000, Duration::from_secs(1));
        assert_eq!(detector.push(&tone(600, 2000)), PhraseState::Recording);
        assert_eq!(detector.push(&tone(600, 2000)), PhraseState::Complete);
        assert_eq!(detector.push(&tone(600, 2000)), PhraseState::Complete);
        assert_eq!(detector.into_samples().len(), 1200);
    }
}
