pub mod cut;
pub mod download;

pub use cut::{check_ffmpeg, check_ffprobe, cut_video, probe_duration};
pub use download::{check_yt_dlp, download_video, DownloadOptions};

use std::path::PathBuf;
use std::time::Duration;

/// What the downloader hands back for one video.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub video_path: PathBuf,
    /// VTT caption file, when the video has one.
    pub caption_path: Option<PathBuf>,
    pub id: String,
    pub title: String,
    pub duration: Duration,
    pub size_bytes: u64,
}
