//! Data ingestion layer for punch-report.
//!
//! Responsible for discovering and reading tab-delimited punch log files
//! exported by biometric attendance devices, reducing records into daily
//! summaries and running the top-level processing pipeline.

pub mod aggregator;
pub mod pipeline;
pub mod reader;

pub use punch_core as core;
