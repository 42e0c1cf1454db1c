//! Video acquisition via yt-dlp.
//!
//! yt-dlp is an opaque subprocess: this module asks it for metadata, lets it
//! download the media plus English VTT captions, then locates the files it
//! wrote. A missing caption file is not an error; plenty of videos have none.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{ClipError, Result};
use crate::media::VideoInfo;
use crate::util::{ensure_dir, validate_url};

/// Best ≤1080p mp4 with m4a audio, falling back to whatever is available.
const FORMAT_SELECTOR: &str =
    "bestvideo[height<=1080][ext=mp4]+bestaudio[ext=m4a]/best[height<=1080][ext=mp4]/best";

/// Download behavior knobs.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Caption language to request (manual subs with auto subs as fallback).
    pub caption_lang: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            caption_lang: "en".to_string(),
        }
    }
}

/// The slice of yt-dlp's `-J` metadata this crate cares about.
#[derive(Debug, Deserialize)]
struct VideoMetadata {
    id: String,
    title: String,
    #[serde(default)]
    duration: f64,
}

/// Check that yt-dlp is installed and accessible.
pub fn check_yt_dlp() -> Result<()> {
    let output = Command::new("yt-dlp").arg("--version").output().map_err(|e| {
        ClipError::Download(format!(
            "yt-dlp not found. Install it with: pip install yt-dlp. Error: {e}"
        ))
    })?;

    if !output.status.success() {
        return Err(ClipError::Download("yt-dlp check failed".to_string()));
    }

    debug!("yt-dlp is available");
    Ok(())
}

/// Fetch metadata for a video without downloading it.
fn fetch_metadata(url: &str) -> Result<VideoMetadata> {
    let output = Command::new("yt-dlp")
        .args(["-J", "--no-warnings"])
        .arg(url)
        .output()
        .map_err(|e| ClipError::Download(format!("Failed to run yt-dlp: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClipError::Download(format!(
            "yt-dlp metadata query failed: {}",
            stderr.trim()
        )));
    }

    let metadata: VideoMetadata = serde_json::from_slice(&output.stdout)?;
    Ok(metadata)
}

/// Download a video and its captions into `output_dir`.
///
/// Files are named by video id to sidestep special characters in titles; the
/// title comes back in the returned [`VideoInfo`] for display and for
/// building clip filenames.
pub async fn download_video(
    url: &str,
    output_dir: &Path,
    options: &DownloadOptions,
) -> Result<VideoInfo> {
    if !validate_url(url) {
        return Err(ClipError::Download(format!("Invalid YouTube URL: {url}")));
    }

    check_yt_dlp()?;
    ensure_dir(output_dir)?;

    info!("Fetching metadata for {url}");
    let metadata = fetch_metadata(url)?;
    info!("Downloading \"{}\" ({})", metadata.title, metadata.id);

    let template = output_dir.join("%(id)s.%(ext)s");
    let output = Command::new("yt-dlp")
        .args(["-f", FORMAT_SELECTOR])
        .arg("-o")
        .arg(&template)
        .args([
            "--write-subs",
            "--write-auto-subs",
            "--sub-langs",
            &options.caption_lang,
            "--sub-format",
            "vtt",
            "--no-write-thumbnail",
        ])
        .arg(url)
        .output()
        .map_err(|e| ClipError::Download(format!("Failed to run yt-dlp: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ClipError::Download(format!(
            "yt-dlp exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let video_path = find_video_file(output_dir, &metadata.id)?;
    let caption_path = find_caption_file(output_dir, &metadata.id, &options.caption_lang);
    if caption_path.is_none() {
        warn!("No {} captions found for {}", options.caption_lang, metadata.id);
    }

    let size_bytes = std::fs::metadata(&video_path)?.len();
    info!("Downloaded {} ({} bytes)", video_path.display(), size_bytes);

    Ok(VideoInfo {
        video_path,
        caption_path,
        id: metadata.id,
        title: metadata.title,
        duration: Duration::from_secs_f64(metadata.duration),
        size_bytes,
    })
}

/// Locate the downloaded media file for a video id, whatever its container.
fn find_video_file(dir: &Path, id: &str) -> Result<PathBuf> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(&format!("{id}.")) && !name.ends_with(".vtt") {
            return Ok(path);
        }
    }
    Err(ClipError::Download(format!(
        "Video file for {id} not found after download"
    )))
}

fn find_caption_file(dir: &Path, id: &str, lang: &str) -> Option<PathBuf> {
    for candidate in [format!("{id}.{lang}.vtt"), format!("{id}.vtt")] {
        let path = dir.join(candidate);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_download_rejects_bad_url() {
        let dir = tempfile::tempdir().unwrap();
        let result = download_video("not a url", dir.path(), &DownloadOptions::default()).await;
        assert!(matches!(result, Err(ClipError::Download(_))));
    }

    #[test]
    fn test_find_video_file_skips_captions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc123.en.vtt"), "WEBVTT\n").unwrap();
        std::fs::write(dir.path().join("abc123.mp4"), b"video").unwrap();

        let found = find_video_file(dir.path(), "abc123").unwrap();
        assert_eq!(found.file_name().unwrap(), "abc123.mp4");
    }

    #[test]
    fn test_find_video_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_video_file(dir.path(), "missing").is_err());
    }

    #[test]
    fn test_find_caption_file_prefers_language_suffix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc123.en.vtt"), "WEBVTT\n").unwrap();

        let found = find_caption_file(dir.path(), "abc123", "en").unwrap();
        assert_eq!(found.file_name().unwrap(), "abc123.en.vtt");

        assert!(find_caption_file(dir.path(), "abc123", "fr").is_none());
    }
}
