//! Filesystem and naming helpers shared across the pipeline.

use crate::error::Result;
use chrono::Local;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid regex"));
static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));
static YOUTUBE_URLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:www\.)?(?:youtube\.com/watch\?v=[\w-]+|youtu\.be/[\w-]+|youtube\.com/embed/[\w-]+)",
    )
    .expect("valid regex")
});

/// Turn a video title into a safe filename: illegal characters and spaces
/// become underscores, runs collapse, and the result is capped at
/// `max_length` characters preserving any extension.
pub fn sanitize_filename(name: &str, max_length: usize) -> String {
    let cleaned = ILLEGAL_CHARS.replace_all(name, "_");
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == ' ').replace(' ', "_");
    let cleaned = UNDERSCORE_RUNS
        .replace_all(&cleaned, "_")
        .trim_matches('_')
        .to_string();

    if cleaned.chars().count() <= max_length {
        return cleaned;
    }

    let (stem, ext) = match cleaned.rfind('.') {
        Some(pos) if pos > 0 => cleaned.split_at(pos),
        _ => (cleaned.as_str(), ""),
    };
    let keep = max_length.saturating_sub(ext.chars().count());
    let truncated: String = stem.chars().take(keep).collect();
    format!("{truncated}{ext}")
}

/// Whether a URL looks like a supported YouTube watch/short/embed link.
pub fn validate_url(url: &str) -> bool {
    YOUTUBE_URLS.is_match(url)
}

/// Human-readable byte size, e.g. `1.5 KB`.
pub fn format_file_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} PB")
}

/// Create a timestamped working directory under `base`, e.g.
/// `youtube-clips/20260830_143022`.
pub fn create_output_dir(base: &Path) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let dir = base.join(stamp);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Ensure a directory exists, creating it and its parents if needed.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}
