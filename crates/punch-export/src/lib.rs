//! Workbook export layer for punch-report.
//!
//! Renders pipeline output into the two-sheet XLSX attendance report.

pub mod xlsx;
