use crate::{
    AudioMode, CaptureService, CpalCaptureService, PermissionStatus, QualityPreset, RecorderError,
    capture::{SharedWriter, discard_recording, finish_recording, push_frame},
};

use std::{
    path::PathBuf,
    str::FromStr,
    sync::{Arc, Mutex, atomic::AtomicBool},
};

use hound::{SampleFormat, WavSpec, WavWriter};

#[allow(clippy::unwrap_used)]
fn open_writer(tag: &str) -> (PathBuf, SharedWriter) {
    let dir = std::env::temp_dir().join(format!("voice-notes-{}-{}", tag, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("recording.wav");
    let spec = WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut wav = WavWriter::create(&path, spec).unwrap();
    wav.write_sample(0_i16).unwrap();
    (path, Arc::new(Mutex::new(Some(wav))))
}

/// WHAT: Mono output averages every input channel
/// WHY: Low quality recordings must not drop the right channel
#[test]
fn given_stereo_frame_when_converting_to_mono_then_channels_averaged() {
    // Given: A stereo frame
    let mut out = Vec::new();

    // When: Converting to one channel
    push_frame(&[0.5, -0.5], 1, &mut out);
    push_frame(&[1.0, 1.0], 1, &mut out);

    // Then: Silence and full scale
    assert_eq!(out, vec![0, i16::MAX]);
}

/// WHAT: Stereo output duplicates a mono device
/// WHY: High quality files are always two channels
#[test]
fn given_mono_frame_when_converting_to_stereo_then_duplicated() {
    // Given: A single-channel frame
    let mut out = Vec::new();

    // When: Converting to two channels
    push_frame(&[-1.0], 2, &mut out);

    // Then: Both channels carry the sample
    assert_eq!(out, vec![-i16::MAX, -i16::MAX]);
}

/// WHAT: Extra device channels are dropped for stereo and samples clamped
/// WHY: Multi-channel interfaces and hot signals must not corrupt output
#[test]
fn given_four_channel_hot_frame_when_converting_to_stereo_then_first_two_clamped() {
    // Given: A four-channel frame exceeding full scale
    let mut out = Vec::new();

    // When: Converting to two channels
    push_frame(&[2.0, -3.0, 0.1, 0.1], 2, &mut out);

    // Then: Only the first two channels, clamped
    assert_eq!(out, vec![i16::MAX, -i16::MAX]);
}

/// WHAT: Empty frames produce nothing
/// WHY: A zero-channel chunk must not write a stray sample
#[test]
fn given_empty_frame_when_converting_then_no_output() {
    let mut out = Vec::new();
    push_frame(&[], 2, &mut out);
    assert!(out.is_empty());
}

/// WHAT: A clean finalize keeps the file and returns its file URI
/// WHY: The note's uri must point at a readable recording
#[test]
#[allow(clippy::unwrap_used)]
fn given_clean_capture_when_finishing_then_file_kept_and_uri_returned() {
    // Given: An open writer with no write errors
    let (path, writer) = open_writer("finish-ok");

    // When: Finishing the recording
    let uri = finish_recording(&writer, &AtomicBool::new(false), &path).unwrap();

    // Then: The file stays and the URI names it
    assert!(path.exists());
    assert!(uri.starts_with("file://"));
    assert!(uri.ends_with("recording.wav"));
    assert!(writer.lock().unwrap().is_none());
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

/// WHAT: Lost samples fail the finalize and delete the file
/// WHY: A failed stop produces no note, so its file would be orphaned
#[test]
#[allow(clippy::unwrap_used)]
fn given_lost_samples_when_finishing_then_error_and_file_removed() {
    // Given: A writer whose callback reported a write failure
    let (path, writer) = open_writer("finish-lost");

    // When: Finishing the recording
    let result = finish_recording(&writer, &AtomicBool::new(true), &path);

    // Then: Capture failure and no file left behind
    assert!(matches!(result, Err(ref e) if e.is_capture_failure()));
    assert!(!path.exists());
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

/// WHAT: Finishing twice fails without leaving the file behind
/// WHY: A writer that is already gone must still not orphan its file
#[test]
#[allow(clippy::unwrap_used)]
fn given_taken_writer_when_finishing_then_error_and_file_removed() {
    // Given: A writer that was already taken out and closed
    let (path, writer) = open_writer("finish-taken");
    writer.lock().unwrap().take().unwrap().finalize().unwrap();

    // When: Finishing the recording
    let result = finish_recording(&writer, &AtomicBool::new(false), &path);

    // Then: Capture failure and the file is gone
    assert!(matches!(result, Err(ref e) if e.is_capture_failure()));
    assert!(!path.exists());
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

/// WHAT: Discarding tolerates a file that no longer exists
/// WHY: Cleanup runs on error paths and must never fail itself
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_file_when_discarding_then_nothing_recreated() {
    // Given: A closed writer whose file was already removed
    let (path, writer) = open_writer("discard-missing");
    writer.lock().unwrap().take().unwrap().finalize().unwrap();
    std::fs::remove_file(&path).unwrap();

    // When: Discarding the recording
    discard_recording(&writer, &path);

    // Then: No file appears
    assert!(!path.exists());
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

/// WHAT: Preset names parse case-insensitively
/// WHY: Configuration files are hand edited
#[test]
fn given_preset_names_when_parsing_then_recognized() {
    assert_eq!(QualityPreset::from_str("high"), Ok(QualityPreset::HighQuality));
    assert_eq!(QualityPreset::from_str(" LOW "), Ok(QualityPreset::LowQuality));
    assert_eq!(QualityPreset::HighQuality.to_string(), "high");
    assert!(QualityPreset::from_str("lossless").is_err());
}

/// WHAT: High quality is stereo, low quality is mono
/// WHY: The preset is the only knob the recorder passes to capture
#[test]
fn given_presets_when_inspecting_then_channel_layout_matches() {
    assert_eq!(QualityPreset::default(), QualityPreset::HighQuality);
    assert_eq!(QualityPreset::HighQuality.channels(), 2);
    assert_eq!(QualityPreset::LowQuality.channels(), 1);
    assert_eq!(QualityPreset::LowQuality.bits_per_sample(), 16);
}

/// WHAT: Capture refuses to start when the mode disallows recording
/// WHY: The audio mode gate applies before any device is touched
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recording_disallowed_when_starting_capture_then_not_allowed_error() {
    // Given: A service configured to disallow recording
    let mut service = CpalCaptureService::new(std::env::temp_dir().join("voice-notes-test"));
    service
        .configure(AudioMode {
            allows_recording: false,
            plays_in_silent_mode: false,
        })
        .await
        .unwrap();

    // When: Starting a capture
    let result = service.start_capture(QualityPreset::HighQuality).await;

    // Then: Rejected before opening a device
    assert!(matches!(
        result,
        Err(RecorderError::RecordingNotAllowed { .. })
    ));
}

/// WHAT: A short capture on real hardware finalizes to a WAV file URI
/// WHY: Exercises the cpal stream and hound writer end to end
#[tokio::test]
#[allow(clippy::unwrap_used)]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
async fn given_microphone_when_capturing_briefly_then_wav_file_written() {
    // Given: A service writing into a scratch directory
    let dir = std::env::temp_dir().join(format!("voice-notes-it-{}", uuid::Uuid::new_v4()));
    let mut service = CpalCaptureService::new(&dir);
    assert_eq!(
        service.request_permission().await.unwrap(),
        PermissionStatus::Granted
    );

    // When: Recording for a moment and finalizing
    let handle = service
        .start_capture(QualityPreset::LowQuality)
        .await
        .unwrap();
    let path = handle.path().to_path_buf();
    std::thread::sleep(std::time::Duration::from_millis(300));
    let uri = service.finalize_capture(handle).await.unwrap();

    // Then: The URI points at a readable mono WAV
    assert!(uri.starts_with("file://"));
    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 1);
    let _ = std::fs::remove_dir_all(&dir);
}
