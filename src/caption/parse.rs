//! Lenient WebVTT/SRT caption parser.
//!
//! Real-world caption files contain malformed blocks, so parsing never fails
//! as a whole: each bad block is skipped and recorded in the returned
//! diagnostics. Only the caller decides whether an empty result is fatal.

use crate::caption::timecode::parse_timestamp;
use crate::caption::{CaptionInterval, CaptionTrack};
use crate::error::{ClipError, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static VTT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\x{FEFF}?WEBVTT.*?\n\n").expect("valid regex"));
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)STYLE.*?-->").expect("valid regex"));
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Why a caption block was dropped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No line containing `-->` was found.
    MissingTimestamp,
    /// No text survived label discarding and tag stripping.
    MissingText,
    /// The timestamp line was present but unparseable or inverted.
    BadTimestamp(String),
}

/// One block the parser gave up on, by position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBlock {
    pub index: usize,
    pub reason: SkipReason,
}

/// Result of parsing one caption document.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub track: CaptionTrack,
    pub skipped: Vec<SkippedBlock>,
}

impl ParseReport {
    /// Extract the track, treating an empty one as fatal. `source` names the
    /// input in the error.
    pub fn require_cues(self, source: &str) -> Result<CaptionTrack> {
        if self.track.is_empty() {
            return Err(ClipError::EmptyTrack(source.to_string()));
        }
        Ok(self.track)
    }
}

/// Parse a WebVTT or SRT document into an ordered caption track.
///
/// Format detection is implicit: the WebVTT header and STYLE stripping are
/// no-ops on SRT input. Pure-numeric label lines are discarded, trailing cue
/// settings after the timestamps are ignored, and inline angle-bracket tags
/// are removed from the text.
pub fn parse_track(doc: &str) -> ParseReport {
    let doc = doc.replace("\r\n", "\n");
    let doc = VTT_HEADER.replace(&doc, "");
    let doc = STYLE_BLOCK.replace_all(&doc, "");

    let mut report = ParseReport::default();

    for (index, block) in doc
        .split("\n\n")
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .enumerate()
    {
        match parse_block(block) {
            Ok(cue) => report.track.cues.push(cue),
            Err(reason) => {
                debug!("Skipping caption block {index}: {reason:?}");
                report.skipped.push(SkippedBlock { index, reason });
            }
        }
    }

    report
}

fn parse_block(block: &str) -> std::result::Result<CaptionInterval, SkipReason> {
    let mut timestamp_line = None;
    let mut text_lines = Vec::new();

    for line in block.lines() {
        let line = line.trim();
        if line.contains("-->") {
            timestamp_line = Some(line);
        } else if !line.is_empty() && !is_sequence_label(line) {
            text_lines.push(line);
        }
    }

    let timestamp_line = timestamp_line.ok_or(SkipReason::MissingTimestamp)?;
    if text_lines.is_empty() {
        return Err(SkipReason::MissingText);
    }

    let (start, end) = parse_timestamp_line(timestamp_line)
        .map_err(|e| SkipReason::BadTimestamp(e.to_string()))?;

    let text = text_lines
        .iter()
        .map(|line| MARKUP_TAG.replace_all(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    // A cue with no text carries no information downstream.
    if text.is_empty() {
        return Err(SkipReason::MissingText);
    }

    CaptionInterval::new(start, end, text)
        .map_err(|e| SkipReason::BadTimestamp(e.to_string()))
}

/// Split `start --> end [cue settings]` and parse both endpoints.
fn parse_timestamp_line(line: &str) -> Result<(std::time::Duration, std::time::Duration)> {
    let malformed = || ClipError::MalformedTimestamp(line.to_string());

    let (lhs, rhs) = line.split_once("-->").ok_or_else(malformed)?;
    let start_text = lhs.split_whitespace().next().ok_or_else(malformed)?;
    // Anything after the end timestamp is a cue-settings annotation
    // (e.g. `align:start position:0%`) and is dropped.
    let end_text = rhs.split_whitespace().next().ok_or_else(malformed)?;

    Ok((parse_timestamp(start_text)?, parse_timestamp(end_text)?))
}

fn is_sequence_label(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}
