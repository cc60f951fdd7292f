//! Release data pipeline: schema validation, normalization, ordering and filtering
//! of product release notes.

pub mod anchor;
pub mod error;
pub mod repository;
pub mod schema;
pub mod types;
pub mod utils;
pub mod version;

pub use anchor::{release_anchor, section_anchor};
pub use error::{
    ReleaseError, Result, ResultExt, SchemaViolation, ValidationAttempt, ValidationError,
};
pub use repository::{
    FileSource, ReleaseRepository, ReleaseSource, StaticSource, current_version, filter_releases,
    parse_document, sort_releases, unique_versions,
};
pub use schema::{SchemaValidator, validate_releases};
pub use types::{ContentSection, DateRange, FilterState, Release, ReleaseType};
pub use utils::{humanize_key, parse_release_date};
pub use version::compare_versions;
