use crate::error::{SchemaViolation, ValidationAttempt, ValidationError};
use crate::types::{ContentSection, Release, ReleaseType};
use crate::utils::parse_release_date;
use log::{debug, info};
use serde_json::{Map, Value};

/// Section fields carried at the top level of records in the older data format
pub const LEGACY_SECTION_FIELDS: [&str; 4] = ["highlights", "features", "improvements", "bugfixes"];

const RECORD_FIELDS: [&str; 4] = ["version", "date", "type", "content"];

/// Validates raw release documents and normalizes legacy records to the `content` form
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates `raw` against the current schema, falling back to legacy recovery.
    ///
    /// When both passes fail, the violations of the legacy-recovery pass are reported.
    /// A document that is not an array never reaches recovery.
    pub fn validate(&self, raw: &Value) -> Result<Vec<Release>, ValidationError> {
        let direct_violations = match self.validate_current(raw) {
            Ok(releases) => return Ok(releases),
            Err(violations) => violations,
        };
        debug!(
            "Direct validation failed with {} violation(s), attempting legacy recovery",
            direct_violations.len()
        );

        let Some(recovered) = Self::recover_legacy(raw) else {
            return Err(ValidationError {
                attempt: ValidationAttempt::Direct,
                violations: direct_violations,
            });
        };

        match self.validate_current(&recovered) {
            Ok(releases) => {
                info!("Recovered {} release(s) from legacy format", releases.len());
                Ok(releases)
            }
            Err(violations) => Err(ValidationError {
                attempt: ValidationAttempt::LegacyRecovery,
                violations,
            }),
        }
    }

    fn validate_current(&self, raw: &Value) -> Result<Vec<Release>, Vec<SchemaViolation>> {
        let Some(records) = raw.as_array() else {
            return Err(vec![SchemaViolation::new(
                None,
                "",
                "expected an array of releases",
            )]);
        };

        let mut releases = Vec::with_capacity(records.len());
        let mut violations = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match self.validate_record(index, record) {
                Ok(release) => releases.push(release),
                Err(found) => violations.extend(found),
            }
        }

        if violations.is_empty() {
            Ok(releases)
        } else {
            Err(violations)
        }
    }

    fn validate_record(
        &self,
        index: usize,
        record: &Value,
    ) -> Result<Release, Vec<SchemaViolation>> {
        let Some(fields) = record.as_object() else {
            return Err(vec![SchemaViolation::new(
                Some(index),
                "",
                "expected a release object",
            )]);
        };

        let mut violations = Vec::new();
        let version = Self::check_version(index, fields, &mut violations);
        let date = match fields.get("date").and_then(Value::as_str) {
            Some(raw) => {
                let parsed = parse_release_date(raw);
                if parsed.is_none() {
                    violations.push(SchemaViolation::new(
                        Some(index),
                        "date",
                        format!("'{raw}' is not a valid ISO-8601 date"),
                    ));
                }
                parsed
            }
            None => {
                violations.push(SchemaViolation::new(
                    Some(index),
                    "date",
                    "is required and must be a string",
                ));
                None
            }
        };
        let release_type = match fields.get("type").and_then(Value::as_str) {
            Some(raw) => {
                let parsed = raw.parse::<ReleaseType>().ok();
                if parsed.is_none() {
                    violations.push(SchemaViolation::new(
                        Some(index),
                        "type",
                        format!("'{raw}' is not one of initial, major, minor, patch, hotfix"),
                    ));
                }
                parsed
            }
            None => {
                violations.push(SchemaViolation::new(
                    Some(index),
                    "type",
                    "is required and must be a string",
                ));
                None
            }
        };
        let content = Self::check_content(index, fields.get("content"), &mut violations);

        match (version, date, release_type, content) {
            (Some(version), Some(date), Some(release_type), Some(content))
                if violations.is_empty() =>
            {
                Ok(Release {
                    version,
                    date,
                    release_type,
                    content,
                })
            }
            _ => Err(violations),
        }
    }

    fn check_version(
        index: usize,
        fields: &Map<String, Value>,
        violations: &mut Vec<SchemaViolation>,
    ) -> Option<String> {
        match fields.get("version") {
            Some(Value::String(version)) if !version.trim().is_empty() => Some(version.clone()),
            Some(Value::String(_)) => {
                violations.push(SchemaViolation::new(Some(index), "version", "must not be empty"));
                None
            }
            Some(_) => {
                violations.push(SchemaViolation::new(Some(index), "version", "must be a string"));
                None
            }
            None => {
                violations.push(SchemaViolation::new(Some(index), "version", "is required"));
                None
            }
        }
    }

    fn check_content(
        index: usize,
        content: Option<&Value>,
        violations: &mut Vec<SchemaViolation>,
    ) -> Option<Vec<ContentSection>> {
        let Some(content) = content else {
            violations.push(SchemaViolation::new(Some(index), "content", "is required"));
            return None;
        };
        let Some(sections) = content.as_object() else {
            violations.push(SchemaViolation::new(
                Some(index),
                "content",
                "must map section names to lists of notes",
            ));
            return None;
        };

        let before = violations.len();
        let mut normalized = Vec::with_capacity(sections.len());
        for (key, items) in sections {
            let Some(items) = items.as_array() else {
                violations.push(SchemaViolation::new(
                    Some(index),
                    format!("content.{key}"),
                    "must be a list of strings",
                ));
                continue;
            };
            let mut notes = Vec::with_capacity(items.len());
            for (position, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(note) => notes.push(note.to_string()),
                    None => violations.push(SchemaViolation::new(
                        Some(index),
                        format!("content.{key}[{position}]"),
                        "must be a string",
                    )),
                }
            }
            normalized.push(ContentSection::new(key.clone(), notes));
        }

        (violations.len() == before).then_some(normalized)
    }

    /// Rebuilds each record into the current shape. Returns `None` when `raw` is not an array.
    fn recover_legacy(raw: &Value) -> Option<Value> {
        let records = raw.as_array()?;
        let recovered = records
            .iter()
            .map(|record| match record.as_object() {
                Some(fields) => Value::Object(Self::recover_record(fields)),
                None => record.clone(),
            })
            .collect();
        Some(Value::Array(recovered))
    }

    fn recover_record(fields: &Map<String, Value>) -> Map<String, Value> {
        let mut record = Map::new();
        for key in ["version", "date", "type"] {
            if let Some(value) = fields.get(key) {
                record.insert(key.to_string(), value.clone());
            }
        }

        let content = match fields.get("content") {
            Some(existing) => existing.clone(),
            None => {
                let mut content = Map::new();
                for key in LEGACY_SECTION_FIELDS {
                    if let Some(items) = fields.get(key).filter(|v| is_string_list(v)) {
                        content.insert(key.to_string(), items.clone());
                    }
                }
                for (key, value) in fields {
                    let known = RECORD_FIELDS.contains(&key.as_str())
                        || LEGACY_SECTION_FIELDS.contains(&key.as_str());
                    if !known && is_string_list(value) {
                        content.insert(key.clone(), value.clone());
                    }
                }
                Value::Object(content)
            }
        };
        record.insert("content".to_string(), content);
        record
    }
}

fn is_string_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

/// Validates a parsed JSON document into release records
pub fn validate_releases(raw: &Value) -> Result<Vec<Release>, ValidationError> {
    SchemaValidator::new().validate(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_format_passes_directly() {
        let raw = json!([{
            "version": "2.0.0",
            "date": "2025-03-01T00:00:00Z",
            "type": "major",
            "content": { "features": ["New outline"], "bugfixes": [] }
        }]);

        let releases = validate_releases(&raw).unwrap();
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].content.len(), 2);
        assert_eq!(releases[0].section("features").unwrap().items, vec!["New outline"]);
    }

    #[test]
    fn test_legacy_record_is_normalized() {
        let raw = json!([{
            "version": "1.0.0",
            "date": "2024-01-01T00:00:00Z",
            "type": "initial",
            "highlights": ["a"],
            "features": ["b"]
        }]);

        let releases = validate_releases(&raw).unwrap();
        let content = &releases[0].content;
        assert_eq!(
            content,
            &vec![
                ContentSection::new("highlights", vec!["a".to_string()]),
                ContentSection::new("features", vec!["b".to_string()]),
            ]
        );
    }

    #[test]
    fn test_legacy_recovery_collects_custom_string_lists() {
        let raw = json!([{
            "version": "1.1.0",
            "date": "2024-02-01",
            "type": "minor",
            "bugfixes": ["x"],
            "knownIssues": ["slow scroll"],
            "contributors": 3,
            "mixed": ["ok", 1]
        }]);

        let release = &validate_releases(&raw).unwrap()[0];
        let keys: Vec<_> = release.content.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["bugfixes", "knownIssues"]);
    }

    #[test]
    fn test_existing_content_preferred_over_legacy_fields() {
        let raw = json!([
            { "version": "1.0.0", "date": "2024-01-01", "type": "initial", "highlights": ["old"] },
            {
                "version": "1.1.0",
                "date": "2024-02-01",
                "type": "minor",
                "content": { "features": ["new"] },
                "highlights": ["ignored"]
            }
        ]);

        let releases = validate_releases(&raw).unwrap();
        assert_eq!(releases[1].content.len(), 1);
        assert_eq!(releases[1].content[0].key, "features");
    }

    #[test]
    fn test_empty_version_fails_both_passes() {
        let raw = json!([{
            "version": "",
            "date": "2024-01-01T00:00:00Z",
            "type": "initial",
            "highlights": ["a"]
        }]);

        let err = validate_releases(&raw).unwrap_err();
        assert_eq!(err.attempt, ValidationAttempt::LegacyRecovery);
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "version");
    }

    #[test]
    fn test_each_bad_field_contributes_one_violation() {
        let raw = json!([{
            "version": "3.0.0",
            "date": "not a date",
            "type": "experimental",
            "content": { "features": ["ok", 7] }
        }]);

        let err = validate_releases(&raw).unwrap_err();
        let fields: Vec<_> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["date", "type", "content.features[1]"]);
    }

    #[test]
    fn test_non_array_document_reports_direct_failure() {
        let err = validate_releases(&json!({ "releases": [] })).unwrap_err();
        assert_eq!(err.attempt, ValidationAttempt::Direct);
        assert_eq!(err.violations[0].index, None);
    }

    #[test]
    fn test_empty_content_is_valid() {
        let raw = json!([
            { "version": "0.1.0", "date": "2023-01-01", "type": "initial", "content": {} }
        ]);
        let releases = validate_releases(&raw).unwrap();
        assert_eq!(releases[0].non_empty_sections().count(), 0);
    }
}
