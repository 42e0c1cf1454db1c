//! Chapter-analysis payload preparation.
//!
//! The collaborator that proposes chapter boundaries wants the whole track as
//! timestamped text plus a few size hints. Building that payload is
//! deterministic and belongs here; the chaptering itself does not.

use crate::caption::timecode::{format_clock, format_timestamp};
use crate::caption::CaptionTrack;
use crate::error::{ClipError, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Default target chapter length: three minutes.
pub const DEFAULT_CHAPTER_DURATION: Duration = Duration::from_secs(180);

/// Structured input for the chaptering collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisData {
    /// One `[HH:MM:SS.mmm] text` line per cue.
    pub subtitle_text: String,
    pub total_duration: f64,
    pub total_duration_display: String,
    pub subtitle_count: usize,
    pub target_chapter_duration: u64,
    pub estimated_chapters: usize,
}

/// Build the analysis payload for a parsed track.
pub fn prepare_analysis(track: &CaptionTrack, target_chapter: Duration) -> Result<AnalysisData> {
    if track.is_empty() {
        return Err(ClipError::EmptyTrack("analysis input".to_string()));
    }

    let lines: Vec<String> = track
        .iter()
        .map(|cue| {
            format!(
                "[{}] {}",
                format_timestamp(cue.start(), true, false),
                cue.text.replace('\n', " ")
            )
        })
        .collect();

    let total = track.span();
    let target_secs = target_chapter.as_secs().max(1);
    let estimated = ((total.as_secs() / target_secs) as usize).max(1);

    info!(
        "Prepared analysis: {} cues over {}, ~{} chapter(s)",
        track.len(),
        format_clock(total),
        estimated
    );

    Ok(AnalysisData {
        subtitle_text: lines.join("\n"),
        total_duration: total.as_secs_f64(),
        total_duration_display: format_clock(total),
        subtitle_count: track.len(),
        target_chapter_duration: target_secs,
        estimated_chapters: estimated,
    })
}

/// Save analysis data as pretty JSON for handoff to the collaborator.
pub fn save_analysis(data: &AnalysisData, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(data)?)?;
    info!("Analysis data saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::CaptionInterval;

    fn sample_track() -> CaptionTrack {
        CaptionTrack::new(vec![
            CaptionInterval::new(Duration::ZERO, Duration::from_secs_f64(3.5), "Hello world")
                .unwrap(),
            CaptionInterval::new(
                Duration::from_secs_f64(3.5),
                Duration::from_secs(400),
                "Long tail",
            )
            .unwrap(),
        ])
    }

    #[test]
    fn test_prepare_analysis() {
        let data = prepare_analysis(&sample_track(), DEFAULT_CHAPTER_DURATION).unwrap();

        assert_eq!(data.subtitle_count, 2);
        assert_eq!(data.estimated_chapters, 2); // 400s / 180s
        assert!(data.subtitle_text.starts_with("[00:00:00.000] Hello world"));
        assert_eq!(data.total_duration, 400.0);
    }

    #[test]
    fn test_prepare_analysis_flattens_multiline_cues() {
        let track = CaptionTrack::new(vec![CaptionInterval::new(
            Duration::ZERO,
            Duration::from_secs(3),
            "Hi\n你好",
        )
        .unwrap()]);

        let data = prepare_analysis(&track, DEFAULT_CHAPTER_DURATION).unwrap();
        assert!(data.subtitle_text.contains("Hi 你好"));
    }

    #[test]
    fn test_prepare_analysis_empty_track() {
        let result = prepare_analysis(&CaptionTrack::default(), DEFAULT_CHAPTER_DURATION);
        assert!(matches!(result, Err(ClipError::EmptyTrack(_))));
    }

    #[test]
    fn test_at_least_one_chapter() {
        let track = CaptionTrack::new(vec![CaptionInterval::new(
            Duration::ZERO,
            Duration::from_secs(10),
            "short",
        )
        .unwrap()]);

        let data = prepare_analysis(&track, DEFAULT_CHAPTER_DURATION).unwrap();
        assert_eq!(data.estimated_chapters, 1);
    }

    #[test]
    fn test_save_analysis_writes_json() {
        let data = prepare_analysis(&sample_track(), DEFAULT_CHAPTER_DURATION).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");

        save_analysis(&data, &path).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"subtitle_count\": 2"));
    }
}
