//! Punch log discovery and loading.
//!
//! Scans a device export folder for log files and parses their tab-delimited
//! lines into [`PunchRecord`] structs for downstream processing.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use punch_core::error::{PunchError, Result};
use punch_core::models::PunchRecord;
use punch_core::timestamp::TimestampParser;
use tracing::debug;

/// Files smaller than this are treated as device noise and skipped.
pub const MIN_SOURCE_BYTES: u64 = 1024;

/// Number of tab-delimited fields on every record line.
const EXPECTED_FIELDS: usize = 5;

// ── Public API ────────────────────────────────────────────────────────────────

/// Outcome of scanning a log folder: files to process and files skipped for
/// being under [`MIN_SOURCE_BYTES`]. Both lists are sorted by path.
#[derive(Debug, Clone, Default)]
pub struct SourceScan {
    pub files: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// List the log files directly inside `folder`.
///
/// Devices dump all exports flat into one folder, so subdirectories are not
/// descended into. Every regular file counts regardless of extension; files
/// under [`MIN_SOURCE_BYTES`] are reported in `skipped` rather than processed.
pub fn scan_folder(folder: &Path) -> Result<SourceScan> {
    if !folder.is_dir() {
        return Err(PunchError::FolderNotFound(folder.to_path_buf()));
    }

    let mut scan = SourceScan::default();

    for entry in walkdir::WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size >= MIN_SOURCE_BYTES {
            scan.files.push(entry.into_path());
        } else {
            debug!(
                "Skipping undersized file {} ({} bytes)",
                entry.path().display(),
                size
            );
            scan.skipped.push(entry.into_path());
        }
    }

    scan.files.sort();
    scan.skipped.sort();
    Ok(scan)
}

/// Parse one punch log file into records, preserving line order.
///
/// Blank lines are skipped. Any malformed line aborts the load with an error
/// naming the file and 1-based line number.
pub fn load_punch_file(path: &Path) -> Result<Vec<PunchRecord>> {
    let file = std::fs::File::open(path).map_err(|e| PunchError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = std::io::BufReader::new(file);

    let mut records: Vec<PunchRecord> = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| PunchError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        // lines() strips CRLF pairs; a final unterminated line may still carry
        // a bare CR.
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(line, path, line_no)?);
    }

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

// ── Line parsing ──────────────────────────────────────────────────────────────

/// Split one line into the five device fields and build a record.
///
/// Fields are kept verbatim; devices pad names with spaces and those bytes
/// round-trip into the report unchanged.
fn parse_line(line: &str, path: &Path, line_no: usize) -> Result<PunchRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != EXPECTED_FIELDS {
        return Err(PunchError::BadFieldCount {
            path: path.to_path_buf(),
            line: line_no,
            found: fields.len(),
        });
    }

    let timestamp = TimestampParser::parse(fields[2]).ok_or_else(|| PunchError::BadTimestamp {
        path: path.to_path_buf(),
        line: line_no,
        value: fields[2].to_string(),
    })?;

    Ok(PunchRecord {
        id: fields[0].to_string(),
        name: fields[1].to_string(),
        timestamp,
        check_type: fields[3].to_string(),
        reserved: fields[4].to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
