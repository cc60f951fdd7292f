use crate::outline::NavigationRelease;
use crate::scroll::ScrollState;

/// Viewport width thresholds separating the three layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    pub mobile_max: u32,
    pub desktop_min: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max: 768,
            desktop_min: 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Mobile,
    Tablet,
    Desktop,
}

impl LayoutMode {
    /// Mobile up to and including `mobile_max`, desktop from `desktop_min`, tablet between.
    #[must_use]
    pub fn from_width(width: u32, breakpoints: &Breakpoints) -> Self {
        if width <= breakpoints.mobile_max {
            Self::Mobile
        } else if width < breakpoints.desktop_min {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    #[must_use]
    pub fn view(self) -> &'static dyn NavigationView {
        match self {
            Self::Mobile => &ChipList,
            Self::Tablet => &StackedTree,
            Self::Desktop => &StickyTree,
        }
    }
}

/// One rendered navigation control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub anchor: String,
    pub label: String,
    /// 0 for releases, 1 for sections
    pub depth: u8,
    pub active: bool,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationModel {
    pub mode: LayoutMode,
    pub sticky: bool,
    pub items: Vec<NavItem>,
}

/// Renders the outline for one layout
pub trait NavigationView: Sync {
    fn mode(&self) -> LayoutMode;

    fn render(&self, outline: &[NavigationRelease], state: &ScrollState) -> NavigationModel;
}

fn release_item(release: &NavigationRelease, state: &ScrollState) -> NavItem {
    NavItem {
        anchor: release.anchor.clone(),
        label: format!("v{}", release.version),
        depth: 0,
        active: state.active_release.as_deref() == Some(release.anchor.as_str()),
        passed: state.passed_releases.contains(&release.anchor),
    }
}

fn section_items<'a>(
    release: &'a NavigationRelease,
    state: &'a ScrollState,
) -> impl Iterator<Item = NavItem> + 'a {
    release.sections.iter().map(move |section| NavItem {
        anchor: section.anchor.clone(),
        label: section.title.clone(),
        depth: 1,
        active: state.active_section.as_deref() == Some(section.anchor.as_str()),
        passed: state.passed_sections.contains(&section.anchor),
    })
}

/// Horizontal chips, one per release
#[derive(Debug, Clone, Copy)]
pub struct ChipList;

impl NavigationView for ChipList {
    fn mode(&self) -> LayoutMode {
        LayoutMode::Mobile
    }

    fn render(&self, outline: &[NavigationRelease], state: &ScrollState) -> NavigationModel {
        NavigationModel {
            mode: self.mode(),
            sticky: false,
            items: outline.iter().map(|release| release_item(release, state)).collect(),
        }
    }
}

/// Stacked tree that expands only the active release (the newest one before any scroll)
#[derive(Debug, Clone, Copy)]
pub struct StackedTree;

impl NavigationView for StackedTree {
    fn mode(&self) -> LayoutMode {
        LayoutMode::Tablet
    }

    fn render(&self, outline: &[NavigationRelease], state: &ScrollState) -> NavigationModel {
        let expanded = state
            .active_release
            .as_deref()
            .or_else(|| outline.first().map(|release| release.anchor.as_str()));

        let mut items = Vec::new();
        for release in outline {
            items.push(release_item(release, state));
            if expanded == Some(release.anchor.as_str()) {
                items.extend(section_items(release, state));
            }
        }
        NavigationModel {
            mode: self.mode(),
            sticky: false,
            items,
        }
    }
}

/// Full tree pinned beside the content
#[derive(Debug, Clone, Copy)]
pub struct StickyTree;

impl NavigationView for StickyTree {
    fn mode(&self) -> LayoutMode {
        LayoutMode::Desktop
    }

    fn render(&self, outline: &[NavigationRelease], state: &ScrollState) -> NavigationModel {
        let items = outline
            .iter()
            .flat_map(|release| {
                std::iter::once(release_item(release, state)).chain(section_items(release, state))
            })
            .collect();
        NavigationModel {
            mode: self.mode(),
            sticky: true,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::HumanizedTitles;
    use crate::outline::build_outline;
    use crate::scroll::ScrollUpdate;
    use releases::{ContentSection, Release, ReleaseType, parse_release_date};

    fn outline() -> Vec<NavigationRelease> {
        let release = |version: &str, date: &str| Release {
            version: version.to_string(),
            date: parse_release_date(date).unwrap(),
            release_type: ReleaseType::Minor,
            content: vec![
                ContentSection::new("features", vec!["x".to_string()]),
                ContentSection::new("bugfixes", vec!["y".to_string()]),
            ],
        };
        build_outline(
            &[release("2.0.0", "2025-02-01"), release("1.0.0", "2024-02-01")],
            &mut HumanizedTitles,
        )
    }

    #[test]
    fn test_width_thresholds() {
        let breakpoints = Breakpoints::default();
        assert_eq!(LayoutMode::from_width(320, &breakpoints), LayoutMode::Mobile);
        assert_eq!(LayoutMode::from_width(768, &breakpoints), LayoutMode::Mobile);
        assert_eq!(LayoutMode::from_width(769, &breakpoints), LayoutMode::Tablet);
        assert_eq!(LayoutMode::from_width(1023, &breakpoints), LayoutMode::Tablet);
        assert_eq!(LayoutMode::from_width(1024, &breakpoints), LayoutMode::Desktop);
    }

    #[test]
    fn test_mobile_renders_release_chips() {
        let model = LayoutMode::Mobile.view().render(&outline(), &ScrollState::default());
        let labels: Vec<_> = model.items.iter().map(|item| item.label.as_str()).collect();
        assert_eq!(labels, vec!["v2.0.0", "v1.0.0"]);
        assert!(!model.sticky);
    }

    #[test]
    fn test_tablet_expands_active_release() {
        let mut state = ScrollState::default();
        state.apply(ScrollUpdate::activate_release("release-1-0-0"));
        state.apply(ScrollUpdate::activate_section("release-1-0-0-bugfixes"));

        let model = LayoutMode::Tablet.view().render(&outline(), &state);
        let anchors: Vec<_> = model.items.iter().map(|item| item.anchor.as_str()).collect();
        assert_eq!(
            anchors,
            vec![
                "release-2-0-0",
                "release-1-0-0",
                "release-1-0-0-features",
                "release-1-0-0-bugfixes"
            ]
        );
        assert!(model.items[1].active);
        assert!(model.items[3].active);
    }

    #[test]
    fn test_desktop_renders_full_sticky_tree() {
        let model = LayoutMode::Desktop.view().render(&outline(), &ScrollState::default());
        assert!(model.sticky);
        assert_eq!(model.items.len(), 6);
        assert_eq!(model.items[1].label, "Features");
        assert_eq!(model.mode, LayoutMode::Desktop);
    }
}
