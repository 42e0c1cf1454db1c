//! Conversions between textual timestamps and durations.
//!
//! Caption formats write timestamps as `HH:MM:SS.mmm` (WebVTT, dot) or
//! `HH:MM:SS,mmm` (SRT, comma), with the hour and minute fields optional on
//! input. Both separators are accepted when parsing; the caller picks one
//! when formatting.

use crate::error::{ClipError, Result};
use std::time::Duration;

/// Parse a timestamp with 1 to 3 `:`-separated fields into a duration.
///
/// Accepted shapes: `HH:MM:SS(.mmm)`, `MM:SS(.mmm)`, `SS(.mmm)`. The
/// fractional separator may be `.` or `,`.
pub fn parse_timestamp(text: &str) -> Result<Duration> {
    let text = text.trim();
    let parts: Vec<&str> = text.split(':').collect();

    let malformed = || ClipError::MalformedTimestamp(text.to_string());

    let (hours, minutes, seconds_field) = match parts.as_slice() {
        [h, m, s] => (Some(*h), Some(*m), *s),
        [m, s] => (None, Some(*m), *s),
        [s] => (None, None, *s),
        _ => return Err(malformed()),
    };

    let hours: u64 = match hours {
        Some(h) => h.parse().map_err(|_| malformed())?,
        None => 0,
    };
    let minutes: u64 = match minutes {
        Some(m) => m.parse().map_err(|_| malformed())?,
        None => 0,
    };
    let seconds: f64 = seconds_field
        .replace(',', ".")
        .parse()
        .map_err(|_| malformed())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(malformed());
    }

    let total = (hours * 3600 + minutes * 60) as f64 + seconds;
    Ok(Duration::from_secs_f64(total))
}

/// Format a duration as a caption timestamp.
///
/// Milliseconds are rounded to exactly three digits, so
/// `parse_timestamp(format_timestamp(d, ..)) == d` within 1 ms.
/// `include_hours` forces the hour field even when zero (SRT requires it);
/// `use_comma` selects the SRT fractional separator.
pub fn format_timestamp(d: Duration, include_hours: bool, use_comma: bool) -> String {
    let total_millis = (d.as_secs_f64() * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let seconds = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;

    let sep = if use_comma { ',' } else { '.' };

    if include_hours || hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}{sep}{millis:03}")
    } else {
        format!("{minutes:02}:{seconds:02}{sep}{millis:03}")
    }
}

/// Parse a clip window like `"00:00 - 03:15"` or `"01:30:00-01:33:15"`.
pub fn parse_time_range(range: &str) -> Result<(Duration, Duration)> {
    let compact: String = range.chars().filter(|c| !c.is_whitespace()).collect();
    let parts: Vec<&str> = compact.split('-').collect();
    if parts.len() != 2 {
        return Err(ClipError::MalformedTimestamp(range.to_string()));
    }

    let start = parse_timestamp(parts[0])?;
    let end = parse_timestamp(parts[1])?;

    if start >= end {
        return Err(ClipError::InvalidRange { start, end });
    }
    Ok((start, end))
}

/// Compact clock display for durations: `02:05` under an hour, `1:02:05`
/// above.
pub fn format_clock(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_parse_three_fields() {
        assert_eq!(parse_timestamp("01:23:45.678").unwrap(), secs(5025.678));
    }

    #[test]
    fn test_parse_two_fields() {
        assert_eq!(parse_timestamp("23:45.678").unwrap(), secs(1425.678));
    }

    #[test]
    fn test_parse_one_field() {
        assert_eq!(parse_timestamp("45.678").unwrap(), secs(45.678));
    }

    #[test]
    fn test_parse_comma_separator() {
        assert_eq!(parse_timestamp("01:23:45,678").unwrap(), secs(5025.678));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("abc").is_err());
        assert!(parse_timestamp("1:2:3:4").is_err());
        assert!(parse_timestamp("01:xx:45").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_format_srt_style() {
        assert_eq!(format_timestamp(secs(5025.678), true, true), "01:23:45,678");
    }

    #[test]
    fn test_format_vtt_style() {
        assert_eq!(
            format_timestamp(secs(5025.678), true, false),
            "01:23:45.678"
        );
    }

    #[test]
    fn test_format_without_hours() {
        assert_eq!(format_timestamp(secs(1425.678), false, false), "23:45.678");
        // Hour field still appears when nonzero.
        assert_eq!(
            format_timestamp(secs(5025.678), false, false),
            "01:23:45.678"
        );
    }

    #[test]
    fn test_format_zero() {
        assert_eq!(format_timestamp(Duration::ZERO, true, true), "00:00:00,000");
    }

    #[test]
    fn test_round_trip_within_one_millisecond() {
        let samples = [0.0, 0.001, 0.999, 1.5, 59.999, 60.0, 3599.5, 5025.678, 86400.25];
        for &s in &samples {
            for use_comma in [true, false] {
                let formatted = format_timestamp(secs(s), true, use_comma);
                let parsed = parse_timestamp(&formatted).unwrap();
                let diff = (parsed.as_secs_f64() - s).abs();
                assert!(diff <= 0.001, "{s} -> {formatted} -> {parsed:?}");
            }
        }
    }

    #[test]
    fn test_parse_time_range() {
        assert_eq!(
            parse_time_range("00:00 - 03:15").unwrap(),
            (Duration::ZERO, secs(195.0))
        );
        assert_eq!(
            parse_time_range("01:30:00-01:33:15").unwrap(),
            (secs(5400.0), secs(5595.0))
        );
    }

    #[test]
    fn test_parse_time_range_rejects_inverted() {
        assert!(matches!(
            parse_time_range("03:15 - 00:00"),
            Err(ClipError::InvalidRange { .. })
        ));
        assert!(parse_time_range("00:00").is_err());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(secs(125.5)), "02:05");
        assert_eq!(format_clock(secs(3725.5)), "1:02:05");
    }
}
