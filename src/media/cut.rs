//! Lossless video cutting via FFmpeg stream copy.
//!
//! FFmpeg is an opaque subprocess here: no decoding or re-encoding happens in
//! this crate. `-c copy` repackages the existing streams, so cuts are fast
//! and land on the nearest keyframes.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{ClipError, Result};

/// Check that FFmpeg is installed and accessible.
pub fn check_ffmpeg() -> Result<()> {
    let output = Command::new("ffmpeg").arg("-version").output().map_err(|e| {
        ClipError::VideoCut(format!(
            "FFmpeg not found. Please install FFmpeg and ensure it's in your PATH. Error: {e}"
        ))
    })?;

    if !output.status.success() {
        return Err(ClipError::VideoCut("FFmpeg check failed".to_string()));
    }

    debug!("FFmpeg is available");
    Ok(())
}

/// Check that FFprobe is installed and accessible.
pub fn check_ffprobe() -> Result<()> {
    let output = Command::new("ffprobe").arg("-version").output().map_err(|e| {
        ClipError::VideoCut(format!(
            "FFprobe not found. Please install FFmpeg (includes FFprobe). Error: {e}"
        ))
    })?;

    if !output.status.success() {
        return Err(ClipError::VideoCut("FFprobe check failed".to_string()));
    }

    debug!("FFprobe is available");
    Ok(())
}

/// Get media duration using FFprobe.
pub fn probe_duration(input: &Path) -> Result<Duration> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(input)
        .output()
        .map_err(|e| ClipError::VideoCut(format!("Failed to run FFprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClipError::VideoCut(format!("FFprobe failed: {stderr}")));
    }

    let duration_str = String::from_utf8_lossy(&output.stdout);
    let duration_secs: f64 = duration_str.trim().parse().map_err(|e| {
        ClipError::VideoCut(format!(
            "Failed to parse duration '{}': {e}",
            duration_str.trim()
        ))
    })?;

    Ok(Duration::from_secs_f64(duration_secs))
}

/// Cut `[start, end)` out of a video with a stream copy, writing to `output`.
pub async fn cut_video(
    input: &Path,
    start: Duration,
    end: Duration,
    output: &Path,
) -> Result<()> {
    check_ffmpeg()?;

    if !input.exists() {
        return Err(ClipError::FileNotFound(input.display().to_string()));
    }
    if end <= start {
        return Err(ClipError::InvalidRange { start, end });
    }

    let clip_len = end - start;
    let start_secs = format!("{:.3}", start.as_secs_f64());
    let duration_secs = format!("{:.3}", clip_len.as_secs_f64());

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    info!(
        "Cutting {} at {}s for {}s (stream copy)",
        input.display(),
        start_secs,
        duration_secs
    );

    let cut = Command::new("ffmpeg")
        .args(["-y", "-ss"])
        .arg(&start_secs)
        .arg("-i")
        .arg(input)
        .arg("-t")
        .arg(&duration_secs)
        .args(["-c", "copy"])
        .arg(output)
        .output()
        .map_err(|e| ClipError::VideoCut(format!("Failed to run FFmpeg: {e}")))?;

    if !cut.status.success() {
        let stderr = String::from_utf8_lossy(&cut.stderr);
        return Err(ClipError::VideoCut(format!(
            "FFmpeg exited with {}: {}",
            cut.status,
            stderr.trim()
        )));
    }

    if !output.exists() {
        return Err(ClipError::VideoCut(
            "Output file was not created".to_string(),
        ));
    }

    info!("Clip written to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ffmpeg_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_check_ffmpeg() {
        if !ffmpeg_available() {
            eprintln!("Skipping test: FFmpeg not available");
            return;
        }
        assert!(check_ffmpeg().is_ok());
    }

    #[tokio::test]
    async fn test_cut_rejects_missing_input() {
        if !ffmpeg_available() {
            eprintln!("Skipping test: FFmpeg not available");
            return;
        }

        let result = cut_video(
            Path::new("/nonexistent/video.mp4"),
            Duration::ZERO,
            Duration::from_secs(5),
            Path::new("/tmp/clip.mp4"),
        )
        .await;

        assert!(matches!(result, Err(ClipError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_cut_rejects_inverted_range() {
        if !ffmpeg_available() {
            eprintln!("Skipping test: FFmpeg not available");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("video.mp4");
        std::fs::write(&input, b"not a real video").unwrap();

        let result = cut_video(
            &input,
            Duration::from_secs(10),
            Duration::from_secs(5),
            &dir.path().join("clip.mp4"),
        )
        .await;

        assert!(matches!(result, Err(ClipError::InvalidRange { .. })));
    }
}
