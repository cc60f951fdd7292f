use crate::cli::FilterArgs;
use crate::error::{CliError, Result, ResultExt};
use chrono::{DateTime, Utc};
use navigator::NotesConfig;
use releases::{
    DateRange, FileSource, FilterState, ReleaseRepository, ReleaseType, parse_release_date,
};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub fn runtime() -> Result<Runtime> {
    Runtime::new().map_err(|e| CliError::Io(e).with_context("Failed to start async runtime"))
}

pub fn load_config(path: &str) -> Result<NotesConfig> {
    NotesConfig::load_or_default(path)
        .with_context(|| format!("Failed to load configuration {path}"))
}

/// The explicit file argument, else the configured data path
pub fn data_path(file: Option<String>, config: &NotesConfig) -> PathBuf {
    file.map(PathBuf::from)
        .unwrap_or_else(|| config.data.path.clone())
}

pub fn load_repository(runtime: &Runtime, path: PathBuf) -> Result<ReleaseRepository> {
    let source = FileSource::new(path);
    Ok(runtime.block_on(ReleaseRepository::load(&source))?)
}

/// Parses `--now`, defaulting to the current time
pub fn reference_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_release_date(raw).ok_or_else(|| CliError::InvalidDate(raw.to_string())),
        None => Ok(Utc::now()),
    }
}

/// Builds a filter selection from command-line flags.
///
/// Unlike URL parameters, unknown values are rejected instead of dropped.
pub fn filter_state(args: &FilterArgs, repository: &ReleaseRepository) -> Result<FilterState> {
    let version = match &args.release {
        Some(version) if repository.find_by_version(version).is_none() => {
            return Err(CliError::UnknownVersion(version.clone()));
        }
        other => other.clone(),
    };
    let release_type = args
        .release_type
        .as_deref()
        .map(str::parse::<ReleaseType>)
        .transpose()
        .with_context(|| "Invalid --type")?;
    let date_range = args
        .date
        .as_deref()
        .map(str::parse::<DateRange>)
        .transpose()
        .with_context(|| "Invalid --date")?;

    Ok(FilterState {
        version,
        date_range,
        release_type,
    })
}
