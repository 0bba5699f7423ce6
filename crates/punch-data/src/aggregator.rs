//! Daily reduction of punch records into attendance summaries.
//!
//! Groups raw punches by employee and calendar day, then derives check-in and
//! check-out times for days with enough span between first and last punch.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use punch_core::models::{DailySummary, PunchRecord};

/// Minimum minutes between first and last punch for a day to count as worked.
pub const QUALIFY_MINUTES: i64 = 225; // 3 h 45 m

// ── DailyAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that reduces punch records into per-day summaries.
pub struct DailyAggregator;

impl DailyAggregator {
    /// Group `records` by `(id, name, date)` and reduce each group to one
    /// [`DailySummary`].
    ///
    /// Groups keep arrival order: the first record of a group supplies the
    /// check-in candidate and the last supplies check-out, regardless of clock
    /// order. Every group yields a row. Returns summaries sorted by key
    /// (ascending, ids compared as strings).
    pub fn aggregate_daily(records: &[PunchRecord]) -> Vec<DailySummary> {
        // BTreeMap keeps the output sorted by (id, name, date).
        let mut groups: BTreeMap<(String, String, NaiveDate), Vec<&PunchRecord>> = BTreeMap::new();

        for record in records {
            groups
                .entry((record.id.clone(), record.name.clone(), record.date()))
                .or_default()
                .push(record);
        }

        groups
            .into_iter()
            .map(|((id, name, date), group)| Self::reduce_group(id, name, date, &group))
            .collect()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Reduce one day's punches for one employee.
    ///
    /// A day qualifies when it has at least two punches and the time of day of
    /// the last punch is at least [`QUALIFY_MINUTES`] past the first. The span
    /// is signed, so punches that arrive out of clock order can go negative
    /// and never qualify. Non-qualifying days keep all three derived fields
    /// absent.
    fn reduce_group(
        id: String,
        name: String,
        date: NaiveDate,
        group: &[&PunchRecord],
    ) -> DailySummary {
        let mut summary = DailySummary {
            id,
            name,
            date,
            check_in: None,
            check_out: None,
            last_check_type: None,
        };

        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            return summary;
        };

        if group.len() > 1 {
            let worked = last.time().signed_duration_since(first.time());
            if worked >= Duration::minutes(QUALIFY_MINUTES) {
                summary.check_in = Some(first.time());
                summary.check_out = Some(last.time());
                summary.last_check_type = Some(last.check_type.clone());
            }
        }

        summary
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
