use chrono::NaiveDateTime;
use tracing::warn;

// ── TimestampParser ───────────────────────────────────────────────────────────

/// Parses the datetime field from the variety of formats seen in device logs.
pub struct TimestampParser;

impl TimestampParser {
    /// Attempt to parse a datetime string into a [`NaiveDateTime`].
    ///
    /// Device exports overwhelmingly use `YYYY-MM-DD HH:MM:SS`; the remaining
    /// patterns cover firmware variants seen in the field. The timestamps are
    /// local wall-clock time, so no zone conversion is applied.
    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        if s.is_empty() {
            return None;
        }

        const FORMATS: &[&str] = &[
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%d/%m/%Y %H:%M:%S",
            "%m/%d/%Y %H:%M:%S",
        ];

        for fmt in FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }

        warn!("TimestampParser: could not parse timestamp string \"{}\"", s);
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
