use crate::anchor::release_anchor;
use crate::error::{ReleaseError, Result, ResultExt};
use crate::schema::SchemaValidator;
use crate::types::{FilterState, Release};
use crate::version::compare_versions;
use chrono::{DateTime, Utc};
use log::{debug, error};
use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;

/// Where raw release data comes from
pub trait ReleaseSource: Send + Sync {
    /// Human-readable name used in logs and error messages
    fn name(&self) -> String;

    /// Reads the raw document text
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Release data stored in a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReleaseSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Cannot read {}", self.path.display()))
    }
}

/// Release data bundled in memory, e.g. embedded at build time
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    text: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl ReleaseSource for StaticSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Orders newest first; equal dates fall back to the higher dotted version.
pub fn sort_releases(releases: &mut [Release]) {
    releases.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| compare_versions(&b.version, &a.version))
    });
}

/// Releases satisfying every present constraint, in their original relative order
pub fn filter_releases<'a>(
    releases: &'a [Release],
    filters: &FilterState,
    now: &DateTime<Utc>,
) -> Vec<&'a Release> {
    releases
        .iter()
        .filter(|release| filters.matches(release, now))
        .collect()
}

/// Distinct version strings in first-seen order
pub fn unique_versions(releases: &[Release]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(releases.len());
    releases
        .iter()
        .filter(|release| seen.insert(release.version.as_str()))
        .map(|release| release.version.clone())
        .collect()
}

/// The newest release of an already sorted list
pub fn current_version(releases: &[Release]) -> Option<&Release> {
    releases.first()
}

/// Parses, validates and sorts a raw release document
pub fn parse_document(text: &str) -> Result<Vec<Release>> {
    let raw: serde_json::Value = serde_json::from_str(text)?;
    let mut releases = SchemaValidator::new().validate(&raw)?;
    sort_releases(&mut releases);
    Ok(releases)
}

/// Validated releases in display order, owned for the lifetime of the page
#[derive(Debug, Clone, Default)]
pub struct ReleaseRepository {
    releases: Vec<Release>,
}

impl ReleaseRepository {
    /// Builds a repository from already validated releases, applying the display order
    pub fn from_releases(mut releases: Vec<Release>) -> Self {
        sort_releases(&mut releases);
        Self { releases }
    }

    /// Fetches, validates and orders the releases of `source`.
    ///
    /// # Errors
    ///
    /// Any fetch, parse or validation failure is logged and returned as
    /// [`ReleaseError::Load`] wrapping the underlying cause.
    pub async fn load<S: ReleaseSource>(source: &S) -> Result<Self> {
        let name = source.name();
        debug!("Loading releases from {name}");

        let outcome = match source.fetch().await {
            Ok(text) => parse_document(&text),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(releases) => {
                debug!("Loaded {} release(s) from {name}", releases.len());
                Ok(Self { releases })
            }
            Err(cause) => {
                error!("Failed to load releases from {name}: {cause}");
                Err(ReleaseError::load(name, cause))
            }
        }
    }

    #[must_use]
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    #[must_use]
    pub fn filter(&self, filters: &FilterState, now: &DateTime<Utc>) -> Vec<&Release> {
        filter_releases(&self.releases, filters, now)
    }

    #[must_use]
    pub fn unique_versions(&self) -> Vec<String> {
        unique_versions(&self.releases)
    }

    #[must_use]
    pub fn current(&self) -> Option<&Release> {
        current_version(&self.releases)
    }

    #[must_use]
    pub fn find_by_version(&self, version: &str) -> Option<&Release> {
        self.releases.iter().find(|release| release.version == version)
    }

    #[must_use]
    pub fn find_by_anchor(&self, anchor: &str) -> Option<&Release> {
        self.releases
            .iter()
            .find(|release| release_anchor(&release.version) == anchor)
    }
}
