use crate::{AudioMode, CaptureService, CoreResult, PermissionStatus, QualityPreset, RecorderError};

use std::{
    fs::{self, File},
    io::{self, BufWriter},
    panic::Location,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

pub(crate) type SharedWriter = Arc<Mutex<Option<WavWriter<BufWriter<File>>>>>;

/// Capture service backed by the default cpal input device.
///
/// Each capture is written to `recording-<session id>.wav` in the output
/// directory.
pub struct CpalCaptureService {
    output_dir: PathBuf,
    mode: AudioMode,
}

/// An active cpal capture session.
///
/// Dropping it without finalizing stops the stream; the WAV header is
/// patched on a best-effort basis by the writer's own drop.
pub struct CpalRecording {
    session_id: Uuid,
    path: PathBuf,
    stream: Option<Stream>,
    writer: SharedWriter,
    /// Set before the stream is dropped so no in-flight callback writes
    /// after finalization takes the writer.
    shutdown: Arc<AtomicBool>,
    write_failed: Arc<AtomicBool>,
}

impl CpalRecording {
    /// Session id used for log correlation and the file name.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Path of the file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CpalRecording {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if self.stream.take().is_some() {
            warn!(
                session_id = %self.session_id,
                path = ?self.path,
                "Recording dropped without finalize, capture stopped"
            );
        }
    }
}

impl CpalCaptureService {
    /// Create a service that writes recordings into `output_dir`.
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            mode: AudioMode::default(),
        }
    }

    /// Directory new recordings are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[track_caller]
    fn default_device() -> CoreResult<Device> {
        cpal::default_host()
            .default_input_device()
            .ok_or(RecorderError::NoMicrophoneFound {
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl CaptureService for CpalCaptureService {
    type Handle = CpalRecording;

    #[instrument(skip(self))]
    async fn request_permission(&mut self) -> CoreResult<PermissionStatus> {
        // Desktop hosts have no separate prompt; access shows up as an
        // input device whose configuration can be queried.
        let Some(device) = cpal::default_host().default_input_device() else {
            warn!("No input device available, treating as permission denied");
            return Ok(PermissionStatus::Denied);
        };

        match device.default_input_config() {
            Ok(_) => {
                debug!(device_id = ?device.id(), "Microphone access granted");
                Ok(PermissionStatus::Granted)
            }
            Err(e) => {
                warn!(error = %e, "Input device refused configuration query");
                Ok(PermissionStatus::Denied)
            }
        }
    }

    #[instrument(skip(self))]
    async fn configure(&mut self, mode: AudioMode) -> CoreResult<()> {
        if mode.plays_in_silent_mode {
            debug!("Silent mode flag has no effect on this host");
        }
        self.mode = mode;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn start_capture(&mut self, preset: QualityPreset) -> CoreResult<CpalRecording> {
        if !self.mode.allows_recording {
            return Err(RecorderError::RecordingNotAllowed {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let device = Self::default_device()?;

        let supported = device
            .default_input_config()
            .map_err(|e| RecorderError::DeviceError {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let config: StreamConfig = supported.into();
        let target_channels = preset.channels();

        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir)?;
            debug!(output_dir = ?self.output_dir, "Created recordings directory");
        }

        let session_id = Uuid::new_v4();
        let path = self.output_dir.join(format!("recording-{}.wav", session_id));

        let spec = WavSpec {
            channels: target_channels,
            sample_rate: config.sample_rate,
            bits_per_sample: preset.bits_per_sample(),
            sample_format: SampleFormat::Int,
        };
        let writer: SharedWriter = Arc::new(Mutex::new(Some(WavWriter::create(&path, spec)?)));

        let shutdown = Arc::new(AtomicBool::new(false));
        let write_failed = Arc::new(AtomicBool::new(false));

        let stream = match build_stream(
            &device,
            &config,
            target_channels,
            Arc::clone(&writer),
            Arc::clone(&shutdown),
            Arc::clone(&write_failed),
        ) {
            Ok(stream) => stream,
            Err(e) => {
                // Leave no empty file behind for a capture that never ran.
                discard_recording(&writer, &path);
                return Err(e);
            }
        };

        info!(
            session_id = %session_id,
            device_id = ?device.id(),
            sample_rate = config.sample_rate,
            device_channels = config.channels,
            preset = %preset,
            path = ?path,
            "Audio capture started"
        );

        Ok(CpalRecording {
            session_id,
            path,
            stream: Some(stream),
            writer,
            shutdown,
            write_failed,
        })
    }

    #[instrument(skip(self, handle), fields(session_id = %handle.session_id))]
    async fn finalize_capture(&mut self, mut handle: CpalRecording) -> CoreResult<String> {
        handle.shutdown.store(true, Ordering::Release);

        if let Some(stream) = handle.stream.take() {
            drop(stream);
            // Give a callback that raced the flag time to return.
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        finish_recording(&handle.writer, &handle.write_failed, &handle.path)
    }
}

/// Finalize the WAV file at `path` and return its `file://` URI.
///
/// On any failure the file is removed, so a failed stop leaves no
/// recording behind.
#[track_caller]
pub(crate) fn finish_recording(
    writer: &SharedWriter,
    write_failed: &AtomicBool,
    path: &Path,
) -> CoreResult<String> {
    let result = write_out(writer, write_failed, path);
    if result.is_err() {
        discard_recording(writer, path);
    }
    result
}

#[track_caller]
fn write_out(writer: &SharedWriter, write_failed: &AtomicBool, path: &Path) -> CoreResult<String> {
    let wav = writer
        .lock()
        .map_err(|e| RecorderError::CaptureFailed {
            reason: format!("Failed to lock writer: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?
        .take()
        .ok_or_else(|| RecorderError::CaptureFailed {
            reason: "Recording was already finalized".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let sample_count = wav.len();
    wav.finalize()?;

    if write_failed.load(Ordering::Acquire) {
        return Err(RecorderError::CaptureFailed {
            reason: format!("Audio data was lost while writing {:?}", path),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let absolute = fs::canonicalize(path)?;
    let uri = format!("file://{}", absolute.display());

    info!(sample_count = sample_count, uri = %uri, "Audio capture finalized");

    Ok(uri)
}

/// Close the writer if still open and delete its file.
pub(crate) fn discard_recording(writer: &SharedWriter, path: &Path) {
    drop(writer.lock().unwrap_or_else(PoisonError::into_inner).take());

    match fs::remove_file(path) {
        Ok(()) => warn!(path = ?path, "Removed unfinished recording"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(error = %e, path = ?path, "Failed to remove unfinished recording"),
    }
}

#[track_caller]
fn build_stream(
    device: &Device,
    config: &StreamConfig,
    target_channels: u16,
    writer: SharedWriter,
    shutdown: Arc<AtomicBool>,
    write_failed: Arc<AtomicBool>,
) -> CoreResult<Stream> {
    let device_channels = usize::from(config.channels.max(1));
    let mut pcm = Vec::with_capacity(4096);

    let stream = device
        .build_input_stream(
            config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if shutdown.load(Ordering::Acquire) {
                    return;
                }

                pcm.clear();
                for frame in data.chunks(device_channels) {
                    push_frame(frame, target_channels, &mut pcm);
                }

                // A poisoned lock still guards a usable writer.
                let mut guard = writer.lock().unwrap_or_else(|e| {
                    error!("Writer lock poisoned, recovering: {}", e);
                    e.into_inner()
                });
                let Some(wav) = guard.as_mut() else {
                    return;
                };
                for &sample in &pcm {
                    if let Err(e) = wav.write_sample(sample) {
                        if !write_failed.swap(true, Ordering::AcqRel) {
                            error!("Failed to write audio sample: {}", e);
                        }
                        return;
                    }
                }
            },
            |err| {
                error!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| RecorderError::DeviceError {
            reason: format!("Failed to build stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    stream.play().map_err(|e| RecorderError::DeviceError {
        reason: format!("Failed to start stream: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(stream)
}

/// Convert one interleaved f32 frame to `target_channels` i16 samples.
///
/// Mono output averages every input channel; stereo output keeps the first
/// two channels and duplicates a mono input.
pub(crate) fn push_frame(frame: &[f32], target_channels: u16, out: &mut Vec<i16>) {
    if frame.is_empty() {
        return;
    }

    if target_channels == 1 {
        let sum: f32 = frame.iter().sum();
        out.push(to_pcm(sum / frame.len() as f32));
        return;
    }

    let left = frame[0];
    let right = frame.get(1).copied().unwrap_or(left);
    out.push(to_pcm(left));
    out.push(to_pcm(right));
}

fn to_pcm(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}
