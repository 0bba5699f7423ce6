mod bootstrap;

use anyhow::Result;
use clap::Parser;
use punch_core::settings::{LastUsedParams, Settings};
use punch_data::pipeline;
use punch_export::xlsx;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(settings.effective_log_level())?;

    tracing::info!("punch-report v{} starting", env!("CARGO_PKG_VERSION"));

    if settings.clear {
        LastUsedParams::clear()?;
        tracing::info!("Cleared saved parameters");
        if settings.folder.is_none() {
            return Ok(());
        }
    }

    let last_used = LastUsedParams::load();
    let folder = match settings.folder.clone() {
        Some(folder) => folder,
        None => bootstrap::prompt_for_folder(last_used.folder.as_deref())?,
    };

    let result = pipeline::process_folder(&folder)?;
    tracing::info!(
        "Loaded {} records from {} files ({} skipped) in {:.2}s",
        result.metadata.records_loaded,
        result.metadata.sources_processed,
        result.metadata.sources_skipped,
        result.metadata.load_time_seconds
    );

    let output = xlsx::output_path(&folder, settings.output_dir.as_deref());
    xlsx::write_workbook(&output, &result.raw_records, &result.summaries)?;

    println!("Data saved to Excel successfully at {}.", output.display());

    // Remember the folder for the next run's prompt default.
    let mut params = LastUsedParams::from(&settings);
    params.folder = Some(folder);
    if let Err(e) = params.save() {
        tracing::warn!("Could not save last-used parameters: {e}");
    }

    Ok(())
}
