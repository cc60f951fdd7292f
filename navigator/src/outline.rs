use crate::i18n::SectionTitles;
use chrono::{DateTime, Utc};
use releases::{Release, ReleaseType, release_anchor, section_anchor};

/// Navigable entry for one content section of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSection {
    pub key: String,
    pub anchor: String,
    pub title: String,
}

/// Navigable entry for one release
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRelease {
    pub version: String,
    pub anchor: String,
    pub release_type: ReleaseType,
    pub date: DateTime<Utc>,
    pub sections: Vec<NavigationSection>,
}

/// Projects releases into the outline. Empty sections get no entry.
pub fn build_outline<T: SectionTitles + ?Sized>(
    releases: &[Release],
    titles: &mut T,
) -> Vec<NavigationRelease> {
    releases
        .iter()
        .map(|release| NavigationRelease {
            version: release.version.clone(),
            anchor: release_anchor(&release.version),
            release_type: release.release_type,
            date: release.date,
            sections: release
                .non_empty_sections()
                .map(|section| NavigationSection {
                    key: section.key.clone(),
                    anchor: section_anchor(&release.version, &section.key),
                    title: titles.section_title(&section.key),
                })
                .collect(),
        })
        .collect()
}

/// Re-resolves section titles in place, leaving anchors untouched
pub fn retitle_outline<T: SectionTitles + ?Sized>(
    outline: &mut [NavigationRelease],
    titles: &mut T,
) {
    for section in outline.iter_mut().flat_map(|release| release.sections.iter_mut()) {
        section.title = titles.section_title(&section.key);
    }
}

/// Where an anchor points within the outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineTarget<'a> {
    Release(&'a NavigationRelease),
    Section(&'a NavigationRelease, &'a NavigationSection),
}

impl OutlineTarget<'_> {
    #[must_use]
    pub fn anchor(&self) -> &str {
        match self {
            Self::Release(release) => &release.anchor,
            Self::Section(_, section) => &section.anchor,
        }
    }
}

pub fn find_target<'a>(
    outline: &'a [NavigationRelease],
    anchor: &str,
) -> Option<OutlineTarget<'a>> {
    outline.iter().find_map(|release| {
        if release.anchor == anchor {
            return Some(OutlineTarget::Release(release));
        }
        release
            .sections
            .iter()
            .find(|section| section.anchor == anchor)
            .map(|section| OutlineTarget::Section(release, section))
    })
}
