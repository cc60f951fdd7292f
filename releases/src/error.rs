use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Which validation pass produced a set of schema violations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationAttempt {
    Direct,
    LegacyRecovery,
}

impl Display for ValidationAttempt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::LegacyRecovery => write!(f, "legacy recovery"),
        }
    }
}

/// A single schema violation found while validating raw release data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Position of the offending record, `None` for problems with the document itself
    pub index: Option<usize>,
    pub field: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(index: Option<usize>, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            index,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for SchemaViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) if self.field.is_empty() => write!(f, "[{index}]: {}", self.message),
            Some(index) => write!(f, "[{index}].{}: {}", self.field, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Raw data failed both direct and legacy-recovery validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe_violations(.attempt, .violations))]
pub struct ValidationError {
    pub attempt: ValidationAttempt,
    pub violations: Vec<SchemaViolation>,
}

fn describe_violations(attempt: &ValidationAttempt, violations: &[SchemaViolation]) -> String {
    let mut description = format!(
        "{} schema violation(s) after {attempt} validation",
        violations.len()
    );
    for violation in violations {
        description.push_str(&format!("\n  - {violation}"));
    }
    description
}

/// Errors that can occur when loading and validating release data
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Invalid release data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load releases from {source_name}")]
    Load {
        source_name: String,
        #[source]
        cause: Box<ReleaseError>,
    },

    #[error("Failed to read release data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse release data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("{0}: {1}")]
    WithContext(String, Box<ReleaseError>),
}

impl ReleaseError {
    pub fn load<S: Into<String>>(source_name: S, cause: ReleaseError) -> Self {
        Self::Load {
            source_name: source_name.into(),
            cause: Box::new(cause),
        }
    }

    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    /// The schema violations behind this failure, if it came from validation
    #[must_use]
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Load { cause, .. } | Self::WithContext(_, cause) => cause.validation_error(),
            _ => None,
        }
    }

    /// Whether the failure came from schema validation rather than reading the source
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.validation_error().is_some()
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => format!("Release data is invalid: {err}"),
            Self::Load { source_name, .. } => {
                format!("Failed to load release notes from {source_name}")
            }
            Self::Io(e) => format!("File operation failed: {e}"),
            Self::Json(e) => format!("Release data is not valid JSON: {e}"),
            Self::UnknownValue { kind, value } => format!("Unknown {kind} '{value}'"),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReleaseError>;

pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Into<ReleaseError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let release_err: ReleaseError = err.into();
            release_err.with_context(context())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display_includes_position() {
        let violation = SchemaViolation::new(Some(2), "version", "must not be empty");
        assert_eq!(violation.to_string(), "[2].version: must not be empty");

        let top = SchemaViolation::new(None, "", "expected an array of releases");
        assert_eq!(top.to_string(), "expected an array of releases");
    }

    #[test]
    fn test_load_failure_keeps_underlying_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ReleaseError::load("releases.json", ReleaseError::Io(io));

        assert!(!err.is_validation());
        assert_eq!(
            err.user_message(),
            "Failed to load release notes from releases.json"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_context_preserves_validation_kind() {
        let err = ReleaseError::from(ValidationError {
            attempt: ValidationAttempt::LegacyRecovery,
            violations: vec![SchemaViolation::new(Some(0), "type", "unknown release type")],
        })
        .with_context("Loading releases.json");

        assert!(err.is_validation());
        assert!(err.user_message().starts_with("Loading releases.json: "));
    }

    #[test]
    fn test_validation_error_lists_each_violation() {
        let err = ValidationError {
            attempt: ValidationAttempt::Direct,
            violations: vec![
                SchemaViolation::new(Some(0), "date", "is required and must be a string"),
                SchemaViolation::new(Some(1), "version", "must not be empty"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "2 schema violation(s) after direct validation\n  \
             - [0].date: is required and must be a string\n  \
             - [1].version: must not be empty"
        );
    }

    #[test]
    fn test_result_context_wraps_io_failure() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.with_context(|| "Cannot read notes.json").unwrap_err();
        assert!(matches!(
            err,
            ReleaseError::WithContext(_, ref inner) if matches!(**inner, ReleaseError::Io(_))
        ));
        assert!(!err.is_validation());
    }
}
