use chrono::{DateTime, Utc};
use releases::{FilterState, ReleaseType, parse_release_date};

/// The `data-release-*` attributes of one rendered release card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAttributes {
    pub version: String,
    pub release_type: String,
    pub date: String,
}

impl CardAttributes {
    pub fn new(
        version: impl Into<String>,
        release_type: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            release_type: release_type.into(),
            date: date.into(),
        }
    }

    /// Unknown types and unparseable dates only fail the constraint that reads them.
    #[must_use]
    pub fn matches(&self, filters: &FilterState, now: &DateTime<Utc>) -> bool {
        let release_type = self.release_type.parse::<ReleaseType>().ok();
        let date = parse_release_date(&self.date);
        filters.matches_parts(&self.version, release_type, date.as_ref(), now)
    }
}

/// Outcome of one visibility pass over the rendered cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityPass {
    pub visible: Vec<bool>,
    pub visible_count: usize,
}

impl VisibilityPass {
    #[must_use]
    pub fn has_results(&self) -> bool {
        self.visible_count > 0
    }
}

/// Decides which cards stay shown under `filters`
pub fn decide_visibility(
    cards: &[CardAttributes],
    filters: &FilterState,
    now: &DateTime<Utc>,
) -> VisibilityPass {
    let visible: Vec<bool> = cards.iter().map(|card| card.matches(filters, now)).collect();
    let visible_count = visible.iter().filter(|shown| **shown).count();
    VisibilityPass {
        visible,
        visible_count,
    }
}

/// Presentation layer that owns the rendered release cards
pub trait CardHost {
    /// Cards currently rendered, empty while the page is still hydrating
    fn cards(&self) -> Vec<CardAttributes>;

    fn set_visible(&mut self, index: usize, visible: bool);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use releases::DateRange;

    fn cards() -> Vec<CardAttributes> {
        vec![
            CardAttributes::new("2.1.0", "minor", "2025-04-01T00:00:00Z"),
            CardAttributes::new("2.0.1", "hotfix", "2025-01-10"),
            CardAttributes::new("1.0.0", "initial", "2023-01-01"),
            CardAttributes::new("0.9.0", "beta", "soon"),
        ]
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_filters_show_everything() {
        let pass = decide_visibility(&cards(), &FilterState::default(), &now());
        assert_eq!(pass.visible_count, 4);
        assert!(pass.has_results());
    }

    #[test]
    fn test_combined_constraints() {
        let filters = FilterState {
            version: None,
            date_range: Some(DateRange::ThisYear),
            release_type: Some(ReleaseType::Hotfix),
        };
        let pass = decide_visibility(&cards(), &filters, &now());
        assert_eq!(pass.visible, vec![false, true, false, false]);
    }

    #[test]
    fn test_no_results() {
        let filters = FilterState {
            version: Some("3.0.0".to_string()),
            ..FilterState::default()
        };
        let pass = decide_visibility(&cards(), &filters, &now());
        assert_eq!(pass.visible_count, 0);
        assert!(!pass.has_results());
    }
}
