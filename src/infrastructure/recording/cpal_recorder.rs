//! Cross-platform audio recorder using cpal
//!
//! Captures mono i16 at the device sample rate on a background thread and
//! writes the clip to disk as FLAC when the capture ends.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::JoinHandle;
use std::time::Instant;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use tokio::fs;

use super::flac_encoder::encode_to_flac;
use crate::application::ports::{
    AudioMode, CaptureHandle, Permission, RecordedClip, Recorder, RecordingError,
};
use crate::domain::recording::Duration;

/// How often the capture thread refreshes the elapsed counter
const TICK_MS: u64 = 100;

/// Smallest block a FLAC frame may carry
const MIN_BLOCK_SAMPLES: u32 = 16;

/// State shared with the capture thread
struct Capture {
    /// Recorded audio samples (mono, i16, at device sample rate)
    buffer: StdMutex<Vec<i16>>,
    /// Cleared to stop the stream
    is_recording: AtomicBool,
    elapsed_ms: AtomicU64,
}

/// The single capture in flight
struct ActiveCapture {
    handle: CaptureHandle,
    sample_rate: u32,
    thread: JoinHandle<()>,
}

/// Audio recorder using cpal's default input device.
///
/// The stream lives on its own thread since `cpal::Stream` is not `Send`.
pub struct CpalRecorder {
    output_dir: PathBuf,
    max_duration: Duration,
    capture: Arc<Capture>,
    active: StdMutex<Option<ActiveCapture>>,
    next_handle: AtomicU64,
}

impl CpalRecorder {
    /// Recorder writing clips into `output_dir`, stopping any capture that
    /// runs past `max_duration`
    pub fn new(output_dir: impl Into<PathBuf>, max_duration: Duration) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_duration,
            capture: Arc::new(Capture {
                buffer: StdMutex::new(Vec::new()),
                is_recording: AtomicBool::new(false),
                elapsed_ms: AtomicU64::new(0),
            }),
            active: StdMutex::new(None),
            next_handle: AtomicU64::new(1),
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick the device's default config, preferring i16 or f32 samples
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let default = device
            .default_input_config()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get config: {}", e)))?;

        let sample_format = default.sample_format();
        if sample_format != SampleFormat::I16 && sample_format != SampleFormat::F32 {
            return Err(RecordingError::StartFailed(format!(
                "Unsupported sample format {:?}",
                sample_format
            )));
        }

        let config = StreamConfig {
            channels: default.channels(),
            sample_rate: default.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Mix interleaved channels down to mono
    fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels <= 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / chunk.len() as i32) as i16
            })
            .collect()
    }

    fn push_samples(capture: &Capture, mono: &[i16]) {
        if let Ok(mut buffer) = capture.buffer.lock() {
            buffer.extend_from_slice(mono);
        }
    }

    /// Build the input stream and keep it alive until recording stops.
    /// Reports the sample rate (or the start error) through `started`.
    fn run_capture(
        capture: Arc<Capture>,
        max_duration: Duration,
        started: mpsc::Sender<Result<u32, RecordingError>>,
    ) {
        let setup = Self::get_input_device().and_then(|device| {
            let (config, sample_format) = Self::get_input_config(&device)?;
            let channels = config.channels;
            let on_error = |err: cpal::StreamError| log::error!("Audio stream error: {}", err);

            let stream = match sample_format {
                SampleFormat::I16 => {
                    let capture = Arc::clone(&capture);
                    device.build_input_stream(
                        &config,
                        move |data: &[i16], _: &cpal::InputCallbackInfo| {
                            if capture.is_recording.load(Ordering::SeqCst) {
                                Self::push_samples(&capture, &Self::stereo_to_mono(data, channels));
                            }
                        },
                        on_error,
                        None,
                    )
                }
                _ => {
                    let capture = Arc::clone(&capture);
                    device.build_input_stream(
                        &config,
                        move |data: &[f32], _: &cpal::InputCallbackInfo| {
                            if capture.is_recording.load(Ordering::SeqCst) {
                                let i16_data: Vec<i16> =
                                    data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                Self::push_samples(
                                    &capture,
                                    &Self::stereo_to_mono(&i16_data, channels),
                                );
                            }
                        },
                        on_error,
                        None,
                    )
                }
            }
            .map_err(|e| RecordingError::DeviceBusy(e.to_string()))?;

            stream
                .play()
                .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

            Ok((stream, config.sample_rate.0))
        });

        let stream = match setup {
            Ok((stream, sample_rate)) => {
                let _ = started.send(Ok(sample_rate));
                stream
            }
            Err(e) => {
                capture.is_recording.store(false, Ordering::SeqCst);
                let _ = started.send(Err(e));
                return;
            }
        };

        let start = Instant::now();
        let limit_ms = max_duration.as_millis();

        // Keep recording until stopped or the safety limit is reached
        while capture.is_recording.load(Ordering::SeqCst) {
            let elapsed = start.elapsed().as_millis() as u64;
            capture.elapsed_ms.store(elapsed.min(limit_ms), Ordering::SeqCst);
            if elapsed >= limit_ms {
                log::warn!("Recording reached the {} limit, stopping capture", max_duration);
                capture.is_recording.store(false, Ordering::SeqCst);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(TICK_MS));
        }

        drop(stream);
    }

    fn take_active(&self, handle: CaptureHandle) -> Result<ActiveCapture, RecordingError> {
        let mut active = self
            .active
            .lock()
            .map_err(|_| RecordingError::FinalizeFailed("recorder state poisoned".into()))?;

        match active.take() {
            Some(current) if current.handle == handle => Ok(current),
            other => {
                *active = other;
                Err(RecordingError::UnknownHandle(handle.0))
            }
        }
    }

    /// Length of the captured audio, plus the samples to encode. A capture
    /// stopped before the first callback is kept as a 0 ms clip holding one
    /// short block of silence, since FLAC needs at least one frame.
    fn finalize_samples(samples: Vec<i16>, sample_rate: u32) -> (Vec<i16>, Duration) {
        let rate = u64::from(sample_rate.max(1));
        let duration = Duration::from_millis(samples.len() as u64 * 1000 / rate);
        if samples.is_empty() {
            log::warn!("No audio data captured, saving an empty clip");
            let silence = (sample_rate / 100).max(MIN_BLOCK_SAMPLES) as usize;
            return (vec![0; silence], duration);
        }
        (samples, duration)
    }

    fn clip_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%3f");
        self.output_dir.join(format!("clip_{}.flac", stamp))
    }
}

#[async_trait]
impl Recorder for CpalRecorder {
    /// Desktop hosts have no runtime prompt; a missing input device is the
    /// only refusal.
    async fn request_permission(&self) -> Result<Permission, RecordingError> {
        tokio::task::spawn_blocking(|| Self::get_input_device().map(|_| Permission::Granted))
            .await
            .map_err(|e| RecordingError::StartFailed(format!("Task join error: {}", e)))?
    }

    async fn configure(&self, mode: AudioMode) -> Result<(), RecordingError> {
        log::debug!("Audio mode {:?} needs no host configuration", mode);
        Ok(())
    }

    async fn begin(&self) -> Result<CaptureHandle, RecordingError> {
        {
            let active = self
                .active
                .lock()
                .map_err(|_| RecordingError::StartFailed("recorder state poisoned".into()))?;
            if active.is_some() {
                return Err(RecordingError::DeviceBusy(
                    "Recording already in progress".into(),
                ));
            }
        }

        if let Ok(mut buffer) = self.capture.buffer.lock() {
            buffer.clear();
        }
        self.capture.elapsed_ms.store(0, Ordering::SeqCst);
        self.capture.is_recording.store(true, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel();
        let capture = Arc::clone(&self.capture);
        let max_duration = self.max_duration;
        let thread = std::thread::spawn(move || Self::run_capture(capture, max_duration, tx));

        let sample_rate = tokio::task::spawn_blocking(move || rx.recv())
            .await
            .map_err(|e| RecordingError::StartFailed(format!("Task join error: {}", e)))?
            .map_err(|_| RecordingError::StartFailed("Capture thread exited".into()))??;

        let handle = CaptureHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        let mut active = self
            .active
            .lock()
            .map_err(|_| RecordingError::StartFailed("recorder state poisoned".into()))?;
        *active = Some(ActiveCapture {
            handle,
            sample_rate,
            thread,
        });

        log::debug!("Capturing at {} Hz (handle {})", sample_rate, handle.0);
        Ok(handle)
    }

    async fn end(&self, handle: CaptureHandle) -> Result<RecordedClip, RecordingError> {
        let ActiveCapture {
            sample_rate, thread, ..
        } = self.take_active(handle)?;
        self.capture.is_recording.store(false, Ordering::SeqCst);

        tokio::task::spawn_blocking(move || thread.join())
            .await
            .map_err(|e| RecordingError::FinalizeFailed(format!("Task join error: {}", e)))?
            .map_err(|_| RecordingError::FinalizeFailed("Capture thread panicked".into()))?;
        self.capture.elapsed_ms.store(0, Ordering::SeqCst);

        let samples = self
            .capture
            .buffer
            .lock()
            .map(|mut buffer| std::mem::take(&mut *buffer))
            .map_err(|_| RecordingError::FinalizeFailed("sample buffer poisoned".into()))?;

        let (samples, duration) = Self::finalize_samples(samples, sample_rate);

        // Encoding is CPU-bound
        let encoded = tokio::task::spawn_blocking(move || encode_to_flac(&samples, sample_rate))
            .await
            .map_err(|e| RecordingError::FinalizeFailed(format!("Encode task error: {}", e)))?
            .map_err(|e| RecordingError::FinalizeFailed(e.to_string()))?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| RecordingError::FinalizeFailed(e.to_string()))?;
        let path = self.clip_path();
        fs::write(&path, &encoded)
            .await
            .map_err(|e| RecordingError::FinalizeFailed(e.to_string()))?;

        log::debug!("Wrote {} bytes to {}", encoded.len(), path.display());
        Ok(RecordedClip {
            uri: path.to_string_lossy().into_owned(),
            duration,
            size_bytes: Some(encoded.len() as u64),
        })
    }

    fn elapsed(&self) -> Duration {
        Duration::from_millis(self.capture.elapsed_ms.load(Ordering::SeqCst))
    }
}
