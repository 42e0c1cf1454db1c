pub mod extract;
pub mod merge;
pub mod parse;
pub mod srt;
pub mod timecode;

use crate::error::{ClipError, Result};
use std::time::Duration;

/// One timestamped cue within a caption track.
///
/// `end > start` is enforced at construction, so downstream stages never have
/// to re-validate interval shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionInterval {
    start: Duration,
    end: Duration,
    pub text: String,
    /// Second-language text, present only between translation and
    /// bilingual rendering.
    pub translation: Option<String>,
}

impl CaptionInterval {
    pub fn new(start: Duration, end: Duration, text: impl Into<String>) -> Result<Self> {
        if end <= start {
            return Err(ClipError::InvalidInterval { start, end });
        }
        Ok(Self {
            start,
            end,
            text: text.into(),
            translation: None,
        })
    }

    pub fn start(&self) -> Duration {
        self.start
    }

    pub fn end(&self) -> Duration {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    /// Rebuild this cue with new endpoints, keeping text and translation.
    pub(crate) fn rebased(&self, start: Duration, end: Duration) -> Result<Self> {
        let mut cue = Self::new(start, end, self.text.clone())?;
        cue.translation = self.translation.clone();
        Ok(cue)
    }
}

/// An ordered sequence of caption cues synchronized to one media timeline.
///
/// Cues stay in parse order; overlapping cues are legal and no stage
/// reorders them. Each pipeline stage consumes a track and produces a new
/// one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptionTrack {
    pub cues: Vec<CaptionInterval>,
}

impl CaptionTrack {
    pub fn new(cues: Vec<CaptionInterval>) -> Self {
        Self { cues }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaptionInterval> {
        self.cues.iter()
    }

    /// End timestamp of the last cue, i.e. the covered span of the track.
    pub fn span(&self) -> Duration {
        self.cues.last().map(|c| c.end()).unwrap_or_default()
    }
}

impl IntoIterator for CaptionTrack {
    type Item = CaptionInterval;
    type IntoIter = std::vec::IntoIter<CaptionInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_rejects_inverted_endpoints() {
        let result = CaptionInterval::new(
            Duration::from_secs(5),
            Duration::from_secs(3),
            "backwards",
        );
        assert!(matches!(result, Err(ClipError::InvalidInterval { .. })));
    }

    #[test]
    fn test_interval_rejects_zero_length() {
        let result =
            CaptionInterval::new(Duration::from_secs(5), Duration::from_secs(5), "empty");
        assert!(result.is_err());
    }

    #[test]
    fn test_interval_duration() {
        let cue = CaptionInterval::new(
            Duration::from_millis(1500),
            Duration::from_millis(4000),
            "Hello",
        )
        .unwrap();
        assert_eq!(cue.duration(), Duration::from_millis(2500));
    }

    #[test]
    fn test_with_translation() {
        let cue = CaptionInterval::new(Duration::ZERO, Duration::from_secs(3), "Hi")
            .unwrap()
            .with_translation("你好");
        assert_eq!(cue.translation.as_deref(), Some("你好"));
    }

    #[test]
    fn test_track_span() {
        let track = CaptionTrack::new(vec![
            CaptionInterval::new(Duration::ZERO, Duration::from_secs(3), "a").unwrap(),
            CaptionInterval::new(Duration::from_secs(3), Duration::from_secs(7), "b").unwrap(),
        ]);
        assert_eq!(track.span(), Duration::from_secs(7));
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn test_empty_track_span() {
        assert_eq!(CaptionTrack::default().span(), Duration::ZERO);
    }
}
