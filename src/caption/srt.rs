//! SRT serialization.

use crate::caption::timecode::format_timestamp;
use crate::caption::CaptionTrack;
use crate::error::Result;
use std::path::Path;

/// Render a track as an SRT document: sequential labels from 1, comma
/// timestamps with a mandatory hour field, text lines as-is, blank-line
/// separators.
pub fn to_srt(track: &CaptionTrack) -> String {
    let mut out = String::new();

    for (i, cue) in track.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(cue.start(), true, true),
            format_timestamp(cue.end(), true, true),
            cue.text
        ));
    }

    out
}

/// Serialize a track to an SRT file, creating parent directories as needed.
pub fn write_srt(track: &CaptionTrack, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_srt(track))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::CaptionInterval;
    use std::time::Duration;

    fn cue(start_ms: u64, end_ms: u64, text: &str) -> CaptionInterval {
        CaptionInterval::new(
            Duration::from_millis(start_ms),
            Duration::from_millis(end_ms),
            text,
        )
        .unwrap()
    }

    #[test]
    fn test_srt_output_shape() {
        let track = CaptionTrack::new(vec![
            cue(1500, 4000, "Hello, world!"),
            cue(4500, 7000, "This is a test."),
        ]);

        let output = to_srt(&track);

        assert_eq!(
            output,
            "1\n00:00:01,500 --> 00:00:04,000\nHello, world!\n\n2\n00:00:04,500 --> 00:00:07,000\nThis is a test.\n\n"
        );
    }

    #[test]
    fn test_srt_preserves_embedded_line_breaks() {
        let track = CaptionTrack::new(vec![cue(0, 3000, "Hi\n你好")]);
        let output = to_srt(&track);
        assert!(output.contains("Hi\n你好\n\n"));
    }

    #[test]
    fn test_srt_empty_track() {
        assert_eq!(to_srt(&CaptionTrack::default()), "");
    }

    #[test]
    fn test_labels_are_sequential_from_one() {
        let track = CaptionTrack::new(vec![
            cue(0, 1000, "a"),
            cue(1000, 2000, "b"),
            cue(2000, 3000, "c"),
        ]);
        let output = to_srt(&track);
        assert!(output.starts_with("1\n"));
        assert!(output.contains("\n\n2\n"));
        assert!(output.contains("\n\n3\n"));
    }

    #[test]
    fn test_write_srt_round_trips_through_parser() {
        let track = CaptionTrack::new(vec![cue(2000, 5500, "Round trip")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clips").join("out.srt");

        write_srt(&track, &path).unwrap();

        let doc = std::fs::read_to_string(&path).unwrap();
        let report = crate::caption::parse::parse_track(&doc);
        assert_eq!(report.track, track);
    }
}
