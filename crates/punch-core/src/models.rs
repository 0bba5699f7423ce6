use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single swipe event read from one line of a device log file.
///
/// Biometric terminals report naive local wall-clock time with no zone
/// information, so the timestamp is carried as a [`NaiveDateTime`] end to
/// end. Records are never mutated after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// Employee identifier exactly as the device exported it.
    pub id: String,
    /// Employee display name.
    pub name: String,
    /// Moment of the swipe as recorded by the device clock.
    pub timestamp: NaiveDateTime,
    /// Device check-type code (opaque, carried through to the report).
    pub check_type: String,
    /// Unused fifth field of the source line, kept for the raw sheet.
    pub reserved: String,
}

impl PunchRecord {
    /// Calendar date component of the punch.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Time-of-day component of the punch.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }
}

/// The reduction of one employee's punches on one calendar date.
///
/// The three derived fields are either all present (the day met the minimum
/// worked duration) or all absent. A day that does not qualify still yields
/// a summary row carrying only its key columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Employee identifier, as in [`PunchRecord::id`].
    pub id: String,
    /// Employee display name.
    pub name: String,
    /// Calendar date the punches fell on.
    pub date: NaiveDate,
    /// Time of the first punch, when the day qualifies.
    pub check_in: Option<NaiveTime>,
    /// Time of the last punch, when the day qualifies.
    pub check_out: Option<NaiveTime>,
    /// Check-type code of the last punch, when the day qualifies.
    pub last_check_type: Option<String>,
}

impl DailySummary {
    /// Whether this day met the minimum worked duration.
    pub fn qualifies(&self) -> bool {
        self.check_in.is_some()
    }
}
