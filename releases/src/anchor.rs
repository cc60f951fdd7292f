/// Anchor id of a release: dots in the version become dashes, prefixed with `release-`.
pub fn release_anchor(version: &str) -> String {
    format!("release-{}", version.replace('.', "-"))
}

/// Anchor id of a content section within a release
pub fn section_anchor(version: &str, section_key: &str) -> String {
    format!("{}-{section_key}", release_anchor(version))
}
