//! Bilingual caption merging.
//!
//! Two parallel tracks are assumed positionally aligned: same source video,
//! same cue set, one translated. Alignment is by index, not by timestamp;
//! mismatched lengths truncate to the shorter track and are reported so the
//! caller can review the result.

use crate::caption::{CaptionInterval, CaptionTrack};
use crate::error::Result;
use tracing::warn;

/// Track lengths that did not line up during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub primary: usize,
    pub secondary: usize,
}

/// A merged bilingual track plus any length-mismatch warning.
#[derive(Debug, Clone)]
pub struct Merged {
    pub track: CaptionTrack,
    pub mismatch: Option<LengthMismatch>,
}

/// Merge two positionally aligned tracks into one bilingual track.
///
/// Cue `i` takes its timing from `primary[i]` unconditionally; the two texts
/// are joined with a line break, primary text first when `primary_first`.
pub fn merge(primary: &CaptionTrack, secondary: &CaptionTrack, primary_first: bool) -> Result<Merged> {
    let mismatch = if primary.len() != secondary.len() {
        warn!(
            "Track lengths differ: {} primary vs {} secondary cues, merging over the shorter",
            primary.len(),
            secondary.len()
        );
        Some(LengthMismatch {
            primary: primary.len(),
            secondary: secondary.len(),
        })
    } else {
        None
    };

    let mut cues = Vec::with_capacity(primary.len().min(secondary.len()));
    for (first, second) in primary.iter().zip(secondary.iter()) {
        let text = join_texts(&first.text, &second.text, primary_first);
        cues.push(CaptionInterval::new(first.start(), first.end(), text)?);
    }

    Ok(Merged {
        track: CaptionTrack::new(cues),
        mismatch,
    })
}

/// Render a translated track (cues carrying `translation`) into a single
/// bilingual track. Cues without a translation keep their original text.
pub fn bilingual(track: &CaptionTrack, primary_first: bool) -> Result<CaptionTrack> {
    let mut cues = Vec::with_capacity(track.len());
    for cue in track.iter() {
        let text = match cue.translation.as_deref() {
            Some(translation) => join_texts(&cue.text, translation, primary_first),
            None => cue.text.clone(),
        };
        cues.push(CaptionInterval::new(cue.start(), cue.end(), text)?);
    }
    Ok(CaptionTrack::new(cues))
}

fn join_texts(primary: &str, secondary: &str, primary_first: bool) -> String {
    if primary_first {
        format!("{primary}\n{secondary}")
    } else {
        format!("{secondary}\n{primary}")
    }
}
