//! Extraction of a caption sub-window, with timestamps rebased to the
//! window origin. This is what makes a stream-copy cut and its caption file
//! agree on a timeline.

use crate::caption::CaptionTrack;
#[cfg(test)]
use crate::caption::CaptionInterval;
use crate::error::{ClipError, Result};
use std::time::Duration;
use tracing::debug;

/// Extract the cues overlapping `[window_start, window_end)` and rebase them
/// so the window start becomes time zero.
///
/// Cues fully inside the window keep their length; cues that straddle a
/// boundary are clipped to it; disjoint cues are dropped. Relative cue order
/// is preserved.
pub fn extract(
    track: &CaptionTrack,
    window_start: Duration,
    window_end: Duration,
) -> Result<CaptionTrack> {
    if window_end <= window_start {
        return Err(ClipError::InvalidRange {
            start: window_start,
            end: window_end,
        });
    }

    let window_len = window_end - window_start;
    let mut cues = Vec::new();

    for cue in track.iter() {
        if cue.start() >= window_start && cue.end() <= window_end {
            // Fully inside: rebase both endpoints.
            cues.push(cue.rebased(cue.start() - window_start, cue.end() - window_start)?);
        } else if cue.start() < window_end && cue.end() > window_start {
            // Partial overlap: rebase and clip to the window.
            let start = cue.start().saturating_sub(window_start);
            let end = window_len.min(cue.end() - window_start);
            cues.push(cue.rebased(start, end)?);
        }
        // Disjoint cues are dropped.
    }

    debug!(
        "Extracted {} of {} cues for window {:?}..{:?}",
        cues.len(),
        track.len(),
        window_start,
        window_end
    );

    Ok(CaptionTrack::new(cues))
}
