use crate::error::ReleaseError;
use chrono::{DateTime, Datelike, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Kind of a published release, used for filtering and badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Initial,
    Major,
    Minor,
    Patch,
    Hotfix,
}

impl ReleaseType {
    pub const ALL: [Self; 5] = [
        Self::Initial,
        Self::Major,
        Self::Minor,
        Self::Patch,
        Self::Hotfix,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::Hotfix => "hotfix",
        }
    }
}

impl Display for ReleaseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseType {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ReleaseError::UnknownValue {
                kind: "release type",
                value: s.to_string(),
            })
    }
}

/// Age bucket of a release relative to the caller's current date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateRange {
    ThisYear,
    LastYear,
    Older,
}

impl DateRange {
    pub const ALL: [Self; 3] = [Self::ThisYear, Self::LastYear, Self::Older];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThisYear => "thisYear",
            Self::LastYear => "lastYear",
            Self::Older => "older",
        }
    }

    /// Year-based membership test. Releases dated after the current year match no range.
    #[must_use]
    pub fn contains(self, date: &DateTime<Utc>, now: &DateTime<Utc>) -> bool {
        let release_year = date.year();
        let current_year = now.year();
        match self {
            Self::ThisYear => release_year == current_year,
            Self::LastYear => release_year == current_year - 1,
            Self::Older => release_year < current_year - 1,
        }
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| ReleaseError::UnknownValue {
                kind: "date range",
                value: s.to_string(),
            })
    }
}

/// A named, ordered list of notes within a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSection {
    pub key: String,
    pub items: Vec<String>,
}

impl ContentSection {
    pub fn new(key: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            key: key.into(),
            items,
        }
    }
}

/// One published version's notes, read-only after validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Release {
    pub version: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub release_type: ReleaseType,
    #[serde(serialize_with = "serialize_content")]
    pub content: Vec<ContentSection>,
}

impl Release {
    /// Looks up a content section by key
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&ContentSection> {
        self.content.iter().find(|section| section.key == key)
    }

    /// Sections that carry at least one note, in content order
    pub fn non_empty_sections(&self) -> impl Iterator<Item = &ContentSection> + '_ {
        self.content.iter().filter(|section| !section.items.is_empty())
    }

    #[must_use]
    pub fn anchor(&self) -> String {
        crate::anchor::release_anchor(&self.version)
    }
}

fn serialize_content<S>(content: &[ContentSection], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(content.len()))?;
    for section in content {
        map.serialize_entry(&section.key, &section.items)?;
    }
    map.end()
}

/// Active filter selection. Absent fields place no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub release_type: Option<ReleaseType>,
}

impl FilterState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.date_range.is_none() && self.release_type.is_none()
    }

    /// Three-part matching rule shared by list filtering and card visibility
    #[must_use]
    pub fn matches_parts(
        &self,
        version: &str,
        release_type: Option<ReleaseType>,
        date: Option<&DateTime<Utc>>,
        now: &DateTime<Utc>,
    ) -> bool {
        let version_ok = self.version.as_deref().is_none_or(|wanted| wanted == version);
        let type_ok = self
            .release_type
            .is_none_or(|wanted| release_type == Some(wanted));
        let date_ok = self
            .date_range
            .is_none_or(|range| date.is_some_and(|date| range.contains(date, now)));
        version_ok && type_ok && date_ok
    }

    #[must_use]
    pub fn matches(&self, release: &Release, now: &DateTime<Utc>) -> bool {
        self.matches_parts(
            &release.version,
            Some(release.release_type),
            Some(&release.date),
            now,
        )
    }
}
