//! Default-microphone capture with ambient calibration and energy endpointing.

use crate::level::{ambient_threshold, PhraseDetector, PhraseState};
use crate::{AudioSource, CapturedAudio, ListenConfig, Result, VoiceError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Samples buffered in the callback before a chunk is handed over.
const CHUNK_SAMPLES: usize = 1024;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct MicStream {
    _stream: cpal::Stream,
}

pub struct MicConfig {
    pub sample_rate_hz: u32,
    pub channels: u16,
}

pub fn start_default_input_i16() -> Result<(MicStream, MicConfig, Receiver<Vec<i16>>)> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(VoiceError::NoInputDevice)?;
    let config = device
        .default_input_config()
        .map_err(|e| VoiceError::Stream(format!("input config: {e}")))?;
    let sample_rate = config.sample_rate().0;
    let channels = config.channels();

    let (tx, rx) = mpsc::channel::<Vec<i16>>();

    let stream = match config.sample_format() {
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), channels, tx)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), channels, tx)?,
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), channels, tx)?,
        other => {
            return Err(VoiceError::Stream(format!(
                "unsupported sample format: {other:?}"
            )))
        }
    };
    stream
        .play()
        .map_err(|e| VoiceError::Stream(format!("stream play: {e}")))?;
    Ok((
        MicStream { _stream: stream },
        MicConfig {
            sample_rate_hz: sample_rate,
            channels,
        },
        rx,
    ))
}

trait IntoPcm16: Copy {
    fn into_pcm16(self) -> i16;
}

impl IntoPcm16 for i16 {
    fn into_pcm16(self) -> i16 {
        self
    }
}

impl IntoPcm16 for u16 {
    fn into_pcm16(self) -> i16 {
        (self as i32 - 32768) as i16
    }
}

impl IntoPcm16 for f32 {
    fn into_pcm16(self) -> i16 {
        (self.clamp(-1.0, 1.0) * 32767.0) as i16
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: u16,
    tx: Sender<Vec<i16>>,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + IntoPcm16,
{
    let channels = channels.max(1) as usize;
    let mut buf = Vec::<i16>::with_capacity(CHUNK_SAMPLES * 2);
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                // first channel only
                buf.extend(data.chunks_exact(channels).map(|frame| frame[0].into_pcm16()));
                if buf.len() >= CHUNK_SAMPLES {
                    let _ = tx.send(std::mem::take(&mut buf));
                }
            },
            |err| warn!("input stream error: {err}"),
            None,
        )
        .map_err(|e| VoiceError::Stream(format!("build input stream: {e}")))
}

/// Opens the default input device for each capture and releases it before
/// returning.
#[derive(Default)]
pub struct MicSource {
    interrupt: Option<Arc<AtomicBool>>,
}

impl MicSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort waiting or recording as soon as `flag` is raised.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn calibrate(&self, rx: &Receiver<Vec<i16>>, span: Duration) -> Result<f32> {
        let deadline = Instant::now() + span;
        let mut ambient = Vec::new();
        while Instant::now() < deadline && !self.interrupted() {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(chunk) => ambient.extend_from_slice(&chunk),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(VoiceError::Stream("input stream closed".into()))
                }
            }
        }
        Ok(ambient_threshold(&ambient))
    }
}

impl AudioSource for MicSource {
    fn capture(&mut self, config: &ListenConfig) -> Result<Option<CapturedAudio>> {
        let (stream, mic, rx) = start_default_input_i16()?;
        let threshold = self.calibrate(&rx, config.calibration)?;
        debug!(
            threshold,
            sample_rate = mic.sample_rate_hz,
            channels = mic.channels,
            "microphone calibrated"
        );
        println!("Listening... (speak now)");

        let mut detector = PhraseDetector::new(threshold, mic.sample_rate_hz, config.phrase_time_limit);
        let started = Instant::now();
        loop {
            if self.interrupted() {
                return Ok(None);
            }
            if detector.state() == PhraseState::Waiting && started.elapsed() >= config.timeout {
                return Ok(None);
            }
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(chunk) => {
                    if detector.push(&chunk) == PhraseState::Complete {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(VoiceError::Stream("input stream closed".into()))
                }
            }
        }
        drop(stream);

        Ok(Some(CapturedAudio::new(
            detector.into_samples(),
            mic.sample_rate_hz,
        )))
    }
}
