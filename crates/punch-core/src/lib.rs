//! Core domain layer for the punch-report tool.
//!
//! Holds the punch record and daily summary models, the error taxonomy,
//! device timestamp parsing and the CLI settings shared by every other
//! crate in the workspace.

pub mod error;
pub mod models;
pub mod settings;
pub mod timestamp;
