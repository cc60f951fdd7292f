//! Shared fixtures for the cross-crate integration tests.

use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Current-format document, deliberately out of order
pub const CURRENT_DOCUMENT: &str = r#"[
    {"version": "1.9.0", "date": "2024-11-20", "type": "minor",
     "content": {"features": ["Dark theme"], "knownIssues": ["Slow search"]}},
    {"version": "2.0.0", "date": "2025-03-01T09:00:00Z", "type": "major",
     "content": {"highlights": ["New outline"], "features": ["Deep links"], "bugfixes": []}},
    {"version": "2.0.1", "date": "2025-03-01T09:00:00Z", "type": "hotfix",
     "content": {"bugfixes": ["Fixed crash on start"]}},
    {"version": "1.0.0", "date": "2022-06-15", "type": "initial",
     "content": {"features": ["First release"]}}
]"#;

/// Older format with section arrays at the top level of each record
pub const LEGACY_DOCUMENT: &str = r#"[
    {"version": "0.2.0", "date": "2021-05-01", "type": "minor",
     "bugfixes": ["Fixed login"], "features": ["Export"], "breaking_changes": ["Dropped v1 API"]},
    {"version": "0.1.0", "date": "2021-01-01", "type": "initial",
     "features": ["Preview"]}
]"#;

/// Fixed reference time for date-range assertions
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn write_document(dir: &Path, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}
