use std::io::Write;
use std::path::{Path, PathBuf};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    // Map the uppercase level names to tracing directives (tracing uses lowercase).
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Folder prompt ──────────────────────────────────────────────────────────────

/// Ask the operator for the log folder path on stdin.
///
/// When `default` is set (the folder from the previous run), pressing Enter
/// accepts it.
pub fn prompt_for_folder(default: Option<&Path>) -> anyhow::Result<PathBuf> {
    match default {
        Some(d) => print!("Enter the folder path [{}]: ", d.display()),
        None => print!("Enter the folder path: "),
    }
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    resolve_folder_answer(&answer, default)
}

/// Turn the raw prompt answer into a folder path.
fn resolve_folder_answer(answer: &str, default: Option<&Path>) -> anyhow::Result<PathBuf> {
    let trimmed = answer.trim();
    if !trimmed.is_empty() {
        return Ok(PathBuf::from(trimmed));
    }
    match default {
        Some(d) => Ok(d.to_path_buf()),
        None => anyhow::bail!("No folder path given"),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── test_resolve_folder_answer ────────────────────────────────────────────

    #[test]
    fn test_resolve_explicit_path() {
        let path = resolve_folder_answer("/data/site-a\n", None).expect("resolve");
        assert_eq!(path, PathBuf::from("/data/site-a"));
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        let path = resolve_folder_answer("  /data/site-a  \r\n", None).expect("resolve");
        assert_eq!(path, PathBuf::from("/data/site-a"));
    }

    #[test]
    fn test_resolve_empty_accepts_default() {
        let default = Path::new("/data/last-run");
        let path = resolve_folder_answer("\n", Some(default)).expect("resolve");
        assert_eq!(path, PathBuf::from("/data/last-run"));
    }

    #[test]
    fn test_resolve_explicit_path_beats_default() {
        let default = Path::new("/data/last-run");
        let path = resolve_folder_answer("/data/site-b\n", Some(default)).expect("resolve");
        assert_eq!(path, PathBuf::from("/data/site-b"));
    }

    #[test]
    fn test_resolve_empty_without_default_is_error() {
        let result = resolve_folder_answer("   \n", None);
        assert!(result.is_err());
    }
}
