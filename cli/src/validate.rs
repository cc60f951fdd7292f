use crate::data;
use crate::error::{CliError, Result};
use crate::progress::ProgressTracker;
use crate::ui;
use releases::{FileSource, ReleaseSource, current_version, parse_document};

pub fn execute(file: Option<String>, config_path: &str, verbose: bool) -> Result<()> {
    let mut progress = ProgressTracker::new("Validate Release Notes").with_steps(vec![
        "Loading configuration".to_string(),
        "Reading release data".to_string(),
        "Validating schema".to_string(),
    ]);

    progress.start_step();
    let config = data::load_config(config_path)?;
    let path = data::data_path(file, &config);
    progress.complete_step();

    progress.start_step();
    let source = FileSource::new(&path);
    let runtime = data::runtime()?;
    let text = runtime
        .block_on(source.fetch())
        .map_err(|e| CliError::Release(e).with_context(format!("Cannot read {}", source.name())))?;
    if verbose {
        ui::info_message(&format!("Read {} bytes from {}", text.len(), path.display()));
    }
    progress.complete_step();

    progress.start_step();
    let releases = match parse_document(&text) {
        Ok(releases) => releases,
        Err(err) => {
            if let Some(validation) = err.validation_error() {
                for violation in &validation.violations {
                    ui::error_message(&violation.to_string());
                }
            }
            return Err(
                CliError::Release(err).with_context(format!("{} is invalid", path.display()))
            );
        }
    };
    progress.complete_step();

    progress.complete();
    ui::success_message(&format!("{} release(s) are valid", releases.len()));
    if let Some(current) = current_version(&releases) {
        ui::info_message(&format!("Current version: {}", current.version));
    }
    Ok(())
}
