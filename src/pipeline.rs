//! The clip pipeline: parse captions, extract the window, cut the video,
//! optionally translate, and write the clip's SRT next to it.

use crate::caption::merge::bilingual;
use crate::caption::parse::parse_track;
use crate::caption::srt::write_srt;
use crate::caption::timecode::format_clock;
use crate::caption::{extract, CaptionTrack};
use crate::config::Config;
use crate::error::{ClipError, Result};
use crate::media::cut_video;
use crate::translate::{translate_track, Translator};
use crate::util::sanitize_filename;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Per-clip settings.
#[derive(Debug, Clone)]
pub struct ClipRequest {
    pub video: PathBuf,
    pub captions: PathBuf,
    pub window_start: Duration,
    pub window_end: Duration,
    pub output_dir: PathBuf,
    /// Basename for the outputs; defaults to the video stem plus `_clip`.
    pub name: Option<String>,
    /// Target language for bilingual captions; None skips translation.
    pub translate_to: Option<String>,
    pub show_progress: bool,
}

/// Timing and count statistics for one pipeline run.
#[derive(Debug, Clone)]
pub struct ClipStats {
    pub total_time: Duration,
    pub cut_time: Duration,
    pub cue_count: usize,
    pub skipped_blocks: usize,
    pub clip_duration: Duration,
}

/// What the pipeline produced.
#[derive(Debug)]
pub struct ClipOutcome {
    pub clip_path: PathBuf,
    pub captions_path: PathBuf,
    pub track: CaptionTrack,
    pub stats: ClipStats,
}

/// Cut one clip and its captions out of a downloaded video.
///
/// An input caption file that yields no cues is fatal: a clip without
/// captions is not what this pipeline exists to make.
pub async fn clip_segment(
    request: &ClipRequest,
    config: &Config,
    translator: Option<&dyn Translator>,
) -> Result<ClipOutcome> {
    let start_time = Instant::now();

    if !request.video.exists() {
        return Err(ClipError::FileNotFound(request.video.display().to_string()));
    }
    if !request.captions.exists() {
        return Err(ClipError::FileNotFound(
            request.captions.display().to_string(),
        ));
    }

    let (clip_path, captions_path) = output_paths(request, config);

    // Stage 1: parse the caption document.
    info!("Stage 1/4: Parsing captions from {}", request.captions.display());
    let doc = std::fs::read_to_string(&request.captions)?;
    let report = parse_track(&doc);
    let skipped_blocks = report.skipped.len();
    if skipped_blocks > 0 {
        warn!("Skipped {skipped_blocks} malformed caption block(s)");
    }
    let track = report.require_cues(&request.captions.display().to_string())?;
    info!("Parsed {} cues", track.len());

    // Stage 2: extract and rebase the window.
    info!(
        "Stage 2/4: Extracting window {} - {}",
        format_clock(request.window_start),
        format_clock(request.window_end)
    );
    let clipped = extract::extract(&track, request.window_start, request.window_end)?;
    if clipped.is_empty() {
        warn!("No cues fall inside the requested window");
    }

    // Stage 3: stream-copy cut.
    info!("Stage 3/4: Cutting video (stream copy)");
    let spinner = progress_spinner(request.show_progress, "Cutting video...");
    let cut_start = Instant::now();
    cut_video(
        &request.video,
        request.window_start,
        request.window_end,
        &clip_path,
    )
    .await?;
    let cut_time = cut_start.elapsed();
    if let Some(pb) = spinner {
        pb.finish_with_message(format!("Cut complete ({:.2}s)", cut_time.as_secs_f64()));
    }

    // Stage 4: optional translation, then serialize.
    let final_track = match (translator, request.translate_to.as_deref()) {
        (Some(translator), Some(target_lang)) => {
            info!("Stage 4/4: Translating captions to {target_lang}");
            let spinner = progress_spinner(request.show_progress, "Translating captions...");
            let translated = translate_track(
                translator,
                &clipped,
                target_lang,
                config.translation_batch_size,
            )
            .await?;
            if let Some(pb) = spinner {
                pb.finish_with_message("Translation complete");
            }
            bilingual(&translated, config.primary_first)?
        }
        _ => {
            info!("Stage 4/4: Writing captions");
            clipped
        }
    };

    write_srt(&final_track, &captions_path)?;
    info!(
        "Wrote {} cues to {}",
        final_track.len(),
        captions_path.display()
    );

    let stats = ClipStats {
        total_time: start_time.elapsed(),
        cut_time,
        cue_count: final_track.len(),
        skipped_blocks,
        clip_duration: request.window_end - request.window_start,
    };

    Ok(ClipOutcome {
        clip_path,
        captions_path,
        track: final_track,
        stats,
    })
}

/// Derive clip and caption output paths from the request.
fn output_paths(request: &ClipRequest, config: &Config) -> (PathBuf, PathBuf) {
    let stem = match &request.name {
        Some(name) => sanitize_filename(name, config.max_filename_length),
        None => {
            let video_stem = request
                .video
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "clip".to_string());
            format!("{video_stem}_clip")
        }
    };

    let ext = request
        .video
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mp4".to_string());

    (
        request.output_dir.join(format!("{stem}.{ext}")),
        request.output_dir.join(format!("{stem}.srt")),
    )
}

fn progress_spinner(show: bool, message: &str) -> Option<ProgressBar> {
    if !show {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Print a human-facing summary of a finished clip.
pub fn print_summary(outcome: &ClipOutcome) {
    println!();
    println!("Clip complete");
    println!("  Video:     {}", outcome.clip_path.display());
    println!("  Captions:  {}", outcome.captions_path.display());
    println!("  Cues:      {}", outcome.stats.cue_count);
    println!(
        "  Length:    {}",
        format_clock(outcome.stats.clip_duration)
    );
    println!(
        "  Timing:    cut {:.2}s, total {:.2}s",
        outcome.stats.cut_time.as_secs_f64(),
        outcome.stats.total_time.as_secs_f64()
    );
    if outcome.stats.skipped_blocks > 0 {
        println!(
            "  Note:      {} malformed caption block(s) skipped",
            outcome.stats.skipped_blocks
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn request(video: &str, name: Option<&str>) -> ClipRequest {
        ClipRequest {
            video: PathBuf::from(video),
            captions: PathBuf::from("/tmp/captions.vtt"),
            window_start: Duration::ZERO,
            window_end: Duration::from_secs(10),
            output_dir: PathBuf::from("/out"),
            name: name.map(String::from),
            translate_to: None,
            show_progress: false,
        }
    }

    #[test]
    fn test_output_paths_default_stem() {
        let config = Config::default();
        let (clip, srt) = output_paths(&request("/videos/abc123.mp4", None), &config);
        assert_eq!(clip, Path::new("/out/abc123_clip.mp4"));
        assert_eq!(srt, Path::new("/out/abc123_clip.srt"));
    }

    #[test]
    fn test_output_paths_named_clip_sanitized() {
        let config = Config::default();
        let (clip, srt) = output_paths(
            &request("/videos/abc123.webm", Some("AGI: the curve?")),
            &config,
        );
        assert_eq!(clip, Path::new("/out/AGI_the_curve.webm"));
        assert_eq!(srt, Path::new("/out/AGI_the_curve.srt"));
    }

    #[tokio::test]
    async fn test_clip_segment_missing_inputs() {
        let config = Config::default();
        let result = clip_segment(&request("/nonexistent/video.mp4", None), &config, None).await;
        assert!(matches!(result, Err(ClipError::FileNotFound(_))));
    }
}
