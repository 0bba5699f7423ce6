//! XLSX workbook writer.
//!
//! Writes the attendance workbook: a "Processed Data" sheet with one row per
//! employee-day followed by a "Raw Data" sheet with every punch record.

use std::path::{Path, PathBuf};

use punch_core::error::{PunchError, Result};
use punch_core::models::{DailySummary, PunchRecord};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

/// Sheet holding one summary row per employee-day.
pub const PROCESSED_SHEET: &str = "Processed Data";
/// Sheet holding every raw punch record.
pub const RAW_SHEET: &str = "Raw Data";

const PROCESSED_HEADERS: [&str; 6] = ["ID", "Name", "Date", "CheckIn", "CheckOut", "LastCheckType"];
const RAW_HEADERS: [&str; 7] = ["ID", "Name", "DateTime", "CheckType", "Column4", "Date", "Time"];

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M:%S";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

// ── Public API ────────────────────────────────────────────────────────────────

/// Build the output path for `folder`: `<folder name>_data.xlsx` in the
/// folder's parent directory, or in `output_dir` when given.
pub fn output_path(folder: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "punch".to_string());

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => folder
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    dir.join(format!("{stem}_data.xlsx"))
}

/// Write the attendance workbook to `path`.
///
/// "Processed Data" is written first, then "Raw Data". Headers are bold and
/// every populated cell is a string; absent summary fields leave their cells
/// empty. With no data, both sheets still get their header row.
pub fn write_workbook(
    path: &Path,
    raw_records: &[PunchRecord],
    summaries: &[DailySummary],
) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let processed = workbook
        .add_worksheet()
        .set_name(PROCESSED_SHEET)
        .map_err(export_err)?;
    write_processed_sheet(processed, summaries, &bold).map_err(export_err)?;

    let raw = workbook
        .add_worksheet()
        .set_name(RAW_SHEET)
        .map_err(export_err)?;
    write_raw_sheet(raw, raw_records, &bold).map_err(export_err)?;

    workbook.save(path).map_err(export_err)?;

    debug!(
        "Wrote {} summary rows and {} raw rows to {}",
        summaries.len(),
        raw_records.len(),
        path.display()
    );
    Ok(())
}

// ── Sheet writers ─────────────────────────────────────────────────────────────

fn write_processed_sheet(
    sheet: &mut Worksheet,
    summaries: &[DailySummary],
    bold: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, header) in PROCESSED_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, bold)?;
    }

    for (i, summary) in summaries.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &summary.id)?;
        sheet.write_string(row, 1, &summary.name)?;
        sheet.write_string(row, 2, summary.date.format(DATE_FMT).to_string())?;
        if let Some(check_in) = summary.check_in {
            sheet.write_string(row, 3, check_in.format(TIME_FMT).to_string())?;
        }
        if let Some(check_out) = summary.check_out {
            sheet.write_string(row, 4, check_out.format(TIME_FMT).to_string())?;
        }
        if let Some(last) = &summary.last_check_type {
            sheet.write_string(row, 5, last)?;
        }
    }

    sheet.autofit();
    Ok(())
}

fn write_raw_sheet(
    sheet: &mut Worksheet,
    records: &[PunchRecord],
    bold: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, header) in RAW_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, bold)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &record.id)?;
        sheet.write_string(row, 1, &record.name)?;
        sheet.write_string(row, 2, record.timestamp.format(DATETIME_FMT).to_string())?;
        sheet.write_string(row, 3, &record.check_type)?;
        sheet.write_string(row, 4, &record.reserved)?;
        sheet.write_string(row, 5, record.date().format(DATE_FMT).to_string())?;
        sheet.write_string(row, 6, record.time().format(TIME_FMT).to_string())?;
    }

    sheet.autofit();
    Ok(())
}

fn export_err(e: XlsxError) -> PunchError {
    PunchError::Export(e.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
