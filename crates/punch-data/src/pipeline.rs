//! Top-level processing pipeline.
//!
//! Drives the scan, load and reduce steps over one device export folder and
//! collects run metadata for logging. Any malformed source aborts the run
//! before a workbook is written.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use punch_core::error::Result;
use punch_core::models::{DailySummary, PunchRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aggregator::DailyAggregator;
use crate::reader;

// ── RunMetadata ───────────────────────────────────────────────────────────────

/// Bookkeeping for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// RFC 3339 timestamp of when loading finished.
    pub generated_at: String,
    pub sources_processed: usize,
    pub sources_skipped: usize,
    pub records_loaded: usize,
    pub summaries_emitted: usize,
    pub load_time_seconds: f64,
}

// ── PipelineResult ────────────────────────────────────────────────────────────

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// All records from all sources, sorted by `(id, name, timestamp)`.
    pub raw_records: Vec<PunchRecord>,
    /// Daily summaries, aggregated per source and concatenated in source
    /// order. A key spanning two files keeps one row per file.
    pub summaries: Vec<DailySummary>,
    pub metadata: RunMetadata,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load one source file and reduce it to daily summaries.
///
/// The size threshold is a scan concern; a file handed in directly is
/// processed whatever its size.
pub fn process_source(path: &Path) -> Result<(Vec<PunchRecord>, Vec<DailySummary>)> {
    let records = reader::load_punch_file(path)?;
    let summaries = DailyAggregator::aggregate_daily(&records);
    Ok((records, summaries))
}

/// Process every log file in `folder`.
pub fn process_folder(folder: &Path) -> Result<PipelineResult> {
    let started = Instant::now();

    let scan = reader::scan_folder(folder)?;
    for path in &scan.skipped {
        info!("Skipping file (under 1 KiB): {}", path.display());
    }
    if scan.files.is_empty() {
        warn!("No processable log files in {}", folder.display());
    }

    let mut raw_records: Vec<PunchRecord> = Vec::new();
    let mut summaries: Vec<DailySummary> = Vec::new();

    for path in &scan.files {
        let name = path.file_name().unwrap_or(path.as_os_str());
        info!("Processing file: {}", name.to_string_lossy());

        let (records, daily) = process_source(path)?;
        raw_records.extend(records);
        summaries.extend(daily);
    }

    // Stable sort, so records with equal keys keep source order.
    raw_records.sort_by(|a, b| (&a.id, &a.name, a.timestamp).cmp(&(&b.id, &b.name, b.timestamp)));

    let metadata = RunMetadata {
        generated_at: Utc::now().to_rfc3339(),
        sources_processed: scan.files.len(),
        sources_skipped: scan.skipped.len(),
        records_loaded: raw_records.len(),
        summaries_emitted: summaries.len(),
        load_time_seconds: started.elapsed().as_secs_f64(),
    };

    Ok(PipelineResult {
        raw_records,
        summaries,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use punch_core::error::PunchError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn line(id: &str, name: &str, ts: &str, check_type: &str) -> String {
        format!("{id}\t{name}\t{ts}\t{check_type}\t0")
    }

    /// Write `lines` to `dir/name`, padded with blank lines past the scan
    /// threshold.
    fn write_log(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
        let path = dir.join(name);
        let mut content = lines.join("\n");
        content.push('\n');
        while (content.len() as u64) < reader::MIN_SOURCE_BYTES {
            content.push('\n');
        }
        std::fs::write(&path, content).expect("write log");
        path
    }

    // ── process_source ────────────────────────────────────────────────────────

    #[test]
    fn test_process_source_loads_and_reduces() {
        let tmp = TempDir::new().expect("tempdir");
        // Below the scan threshold on purpose; direct processing ignores size.
        let path = tmp.path().join("tiny.dat");
        let content = format!(
            "{}\n{}\n",
            line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I"),
            line("101", "Garcia, Luis", "2024-03-04 17:00:00", "O"),
        );
        std::fs::write(&path, content).expect("write");

        let (records, summaries) = process_source(&path).expect("process");

        assert_eq!(records.len(), 2);
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].qualifies());
    }

    // ── process_folder ────────────────────────────────────────────────────────

    #[test]
    fn test_missing_folder_is_error() {
        let result = process_folder(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(PunchError::FolderNotFound(_))));
    }

    #[test]
    fn test_empty_folder_yields_empty_result() {
        let tmp = TempDir::new().expect("tempdir");
        let result = process_folder(tmp.path()).expect("process");

        assert!(result.raw_records.is_empty());
        assert!(result.summaries.is_empty());
        assert_eq!(result.metadata.sources_processed, 0);
        assert_eq!(result.metadata.sources_skipped, 0);
    }

    #[test]
    fn test_single_source_counts() {
        let tmp = TempDir::new().expect("tempdir");
        write_log(
            tmp.path(),
            "day1.dat",
            &[
                line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I"),
                line("101", "Garcia, Luis", "2024-03-04 17:00:00", "O"),
            ],
        );

        let result = process_folder(tmp.path()).expect("process");

        assert_eq!(result.metadata.sources_processed, 1);
        assert_eq!(result.metadata.sources_skipped, 0);
        assert_eq!(result.metadata.records_loaded, 2);
        assert_eq!(result.metadata.summaries_emitted, 1);
        assert!(!result.metadata.generated_at.is_empty());
    }

    #[test]
    fn test_small_files_counted_as_skipped() {
        let tmp = TempDir::new().expect("tempdir");
        write_log(
            tmp.path(),
            "big.dat",
            &[line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I")],
        );
        // 900 bytes, under the threshold; content never gets parsed.
        std::fs::write(tmp.path().join("noise.dat"), "x".repeat(900)).expect("write");

        let result = process_folder(tmp.path()).expect("process");

        assert_eq!(result.metadata.sources_processed, 1);
        assert_eq!(result.metadata.sources_skipped, 1);
        assert_eq!(result.metadata.records_loaded, 1);
    }

    #[test]
    fn test_raw_records_merged_and_sorted() {
        let tmp = TempDir::new().expect("tempdir");
        // a.dat scans first but holds the higher employee id.
        write_log(
            tmp.path(),
            "a.dat",
            &[
                line("202", "Chen, Wei", "2024-03-04 09:00:00", "I"),
                line("202", "Chen, Wei", "2024-03-04 17:00:00", "O"),
            ],
        );
        write_log(
            tmp.path(),
            "b.dat",
            &[
                line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I"),
                line("101", "Garcia, Luis", "2024-03-04 16:00:00", "O"),
            ],
        );

        let result = process_folder(tmp.path()).expect("process");

        let ids: Vec<&str> = result.raw_records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["101", "101", "202", "202"]);
    }

    #[test]
    fn test_summaries_follow_source_order() {
        let tmp = TempDir::new().expect("tempdir");
        write_log(
            tmp.path(),
            "a.dat",
            &[
                line("202", "Chen, Wei", "2024-03-04 09:00:00", "I"),
                line("202", "Chen, Wei", "2024-03-04 17:00:00", "O"),
            ],
        );
        write_log(
            tmp.path(),
            "b.dat",
            &[
                line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I"),
                line("101", "Garcia, Luis", "2024-03-04 16:00:00", "O"),
            ],
        );

        let result = process_folder(tmp.path()).expect("process");

        // Summaries concatenate per source; raw records sort globally.
        assert_eq!(result.summaries[0].id, "202");
        assert_eq!(result.summaries[1].id, "101");
        assert_eq!(result.raw_records[0].id, "101");
    }

    #[test]
    fn test_key_spanning_files_keeps_row_per_source() {
        let tmp = TempDir::new().expect("tempdir");
        write_log(
            tmp.path(),
            "morning.dat",
            &[line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I")],
        );
        write_log(
            tmp.path(),
            "evening.dat",
            &[line("101", "Garcia, Luis", "2024-03-04 17:00:00", "O")],
        );

        let result = process_folder(tmp.path()).expect("process");

        // Same employee-day in both files: one row each, neither qualifies.
        assert_eq!(result.summaries.len(), 2);
        assert!(result.summaries.iter().all(|s| !s.qualifies()));
    }

    #[test]
    fn test_interleaved_timestamps_sort_within_employee() {
        let tmp = TempDir::new().expect("tempdir");
        write_log(
            tmp.path(),
            "late.dat",
            &[line("101", "Garcia, Luis", "2024-03-04 17:00:00", "O")],
        );
        write_log(
            tmp.path(),
            "early.dat",
            &[line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I")],
        );

        let result = process_folder(tmp.path()).expect("process");

        let times: Vec<String> = result
            .raw_records
            .iter()
            .map(|r| r.timestamp.format("%H:%M:%S").to_string())
            .collect();
        assert_eq!(times, vec!["08:00:00", "17:00:00"]);
    }

    #[test]
    fn test_two_runs_produce_identical_tables() {
        let tmp = TempDir::new().expect("tempdir");
        write_log(
            tmp.path(),
            "a.dat",
            &[
                line("202", "Chen, Wei", "2024-03-04 09:00:00", "I"),
                line("202", "Chen, Wei", "2024-03-04 17:00:00", "O"),
            ],
        );
        write_log(
            tmp.path(),
            "b.dat",
            &[line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I")],
        );

        let first = process_folder(tmp.path()).expect("first run");
        let second = process_folder(tmp.path()).expect("second run");

        assert_eq!(first.raw_records, second.raw_records);
        assert_eq!(first.summaries, second.summaries);
    }

    #[test]
    fn test_raw_table_is_permutation_of_sources() {
        let tmp = TempDir::new().expect("tempdir");
        let a = write_log(
            tmp.path(),
            "a.dat",
            &[
                line("202", "Chen, Wei", "2024-03-04 09:00:00", "I"),
                line("101", "Garcia, Luis", "2024-03-04 10:00:00", "I"),
            ],
        );
        let b = write_log(
            tmp.path(),
            "b.dat",
            &[line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I")],
        );

        let result = process_folder(tmp.path()).expect("process");

        // Merged raw table holds exactly the lines of both sources, re-sorted.
        let mut expected = reader::load_punch_file(&a).expect("load a");
        expected.extend(reader::load_punch_file(&b).expect("load b"));
        expected
            .sort_by(|x, y| (&x.id, &x.name, x.timestamp).cmp(&(&y.id, &y.name, y.timestamp)));

        assert_eq!(result.raw_records, expected);
    }

    #[test]
    fn test_malformed_source_aborts_run() {
        let tmp = TempDir::new().expect("tempdir");
        write_log(
            tmp.path(),
            "good.dat",
            &[line("101", "Garcia, Luis", "2024-03-04 08:00:00", "I")],
        );
        write_log(
            tmp.path(),
            "zz-bad.dat",
            &["101\tGarcia, Luis\tnot-a-date\tI\t0".to_string()],
        );

        let err = process_folder(tmp.path()).expect_err("must fail");
        assert!(matches!(err, PunchError::BadTimestamp { .. }));
    }
}
