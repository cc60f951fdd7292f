use crate::config::NotesConfig;
use crate::events::{EventBus, NavigatorEvent};
use crate::i18n::SectionTitles;
use crate::layout::{Breakpoints, LayoutMode, NavigationModel};
use crate::outline::{NavigationRelease, OutlineTarget, build_outline, find_target, retitle_outline};
use crate::retry::{RetryPolicy, poll_until};
use crate::scroll::{IntersectionEntry, ObservedTarget, ScrollState, ScrollTracker};
use crate::visibility::{CardHost, VisibilityPass, decide_visibility};
use chrono::{DateTime, Utc};
use log::{debug, info};
use releases::{FilterState, Release};
use std::time::Duration;

/// Scrolls the page to an anchor element
pub trait Scroller {
    /// Returns `false` when no element carries the anchor id
    fn smooth_scroll_to(&mut self, anchor: &str) -> bool;
}

/// Viewport-intersection watcher shared by every outline anchor
pub trait ViewportWatcher {
    fn disconnect(&mut self);

    fn observe(&mut self, target: &ObservedTarget);
}

/// Rendered markup carrying `data-release` / `data-section` tags
pub trait TargetHost {
    fn tagged_targets(&self) -> Vec<ObservedTarget>;
}

/// Passed to the navigation callback after a control is activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub anchor: String,
    pub version: Option<String>,
    pub section: Option<String>,
}

pub type NavigationCallback = Box<dyn FnMut(&NavigationRequest)>;

/// Enter and Space activate a focused navigation control
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Space" | "Spacebar")
}

/// Outline navigation: layout selection, scroll tracking, navigation and card filtering
pub struct OutlineNavigator {
    outline: Vec<NavigationRelease>,
    breakpoints: Breakpoints,
    mode: LayoutMode,
    tracker: ScrollTracker,
    filters: FilterState,
    bus: EventBus,
    retry: RetryPolicy,
    settle_delay: Duration,
    on_navigate: Option<NavigationCallback>,
    registration_pending: bool,
}

impl OutlineNavigator {
    pub fn new(config: &NotesConfig, bus: EventBus, viewport_width: u32) -> Self {
        let breakpoints = config.breakpoints();
        Self {
            outline: Vec::new(),
            breakpoints,
            mode: LayoutMode::from_width(viewport_width, &breakpoints),
            tracker: ScrollTracker::new(config.activation_band()),
            filters: FilterState::default(),
            bus,
            retry: config.retry_policy(),
            settle_delay: config.settle_delay(),
            on_navigate: None,
            registration_pending: false,
        }
    }

    #[must_use]
    pub fn with_navigation_callback(mut self, callback: NavigationCallback) -> Self {
        self.on_navigate = Some(callback);
        self
    }

    /// Rebuilds the outline. Scroll state is cleared at once and anchors must be re-registered.
    pub fn set_releases<T: SectionTitles + ?Sized>(
        &mut self,
        releases: &[Release],
        titles: &mut T,
    ) {
        self.outline = build_outline(releases, titles);
        self.tracker.reset();
        self.registration_pending = true;
        debug!("Outline rebuilt with {} release(s)", self.outline.len());
    }

    /// Refreshes section titles after a locale change. Scroll state and registered
    /// anchors are kept since no anchor changes.
    pub fn retitle_sections<T: SectionTitles + ?Sized>(&mut self, titles: &mut T) {
        retitle_outline(&mut self.outline, titles);
    }

    #[must_use]
    pub fn outline(&self) -> &[NavigationRelease] {
        &self.outline
    }

    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    #[must_use]
    pub fn scroll_state(&self) -> &ScrollState {
        self.tracker.state()
    }

    #[must_use]
    pub fn registration_pending(&self) -> bool {
        self.registration_pending
    }

    /// Re-evaluates the layout. Returns whether the mode changed.
    pub fn on_resize(&mut self, viewport_width: u32) -> bool {
        let mode = LayoutMode::from_width(viewport_width, &self.breakpoints);
        if mode == self.mode {
            return false;
        }
        debug!("Layout {:?} -> {mode:?} at width {viewport_width}", self.mode);
        self.mode = mode;
        true
    }

    #[must_use]
    pub fn render(&self) -> NavigationModel {
        self.mode.view().render(&self.outline, self.tracker.state())
    }

    /// Feeds an intersection batch. Returns `true` when an animation frame must be requested.
    pub fn on_intersections(
        &mut self,
        entries: &[IntersectionEntry],
        viewport_height: f64,
    ) -> bool {
        self.tracker.observe(entries, viewport_height)
    }

    /// Applies buffered scroll updates. Returns the new state if it changed.
    pub fn on_animation_frame(&mut self) -> Option<&ScrollState> {
        self.tracker.on_animation_frame()
    }

    /// Scrolls to `anchor` and reports the navigation. Unknown anchors are ignored.
    pub fn navigate<S: Scroller + ?Sized>(
        &mut self,
        anchor: &str,
        scroller: &mut S,
    ) -> Option<NavigationRequest> {
        let target = find_target(&self.outline, anchor)?;
        let (release, section) = match target {
            OutlineTarget::Release(release) => (release, None),
            OutlineTarget::Section(release, section) => (release, Some(section.key.clone())),
        };
        let request = NavigationRequest {
            anchor: target.anchor().to_string(),
            version: Some(release.version.clone()),
            section,
        };

        if !scroller.smooth_scroll_to(&request.anchor) {
            debug!("No element for anchor {}", request.anchor);
        }
        if let Some(callback) = self.on_navigate.as_mut() {
            callback(&request);
        }
        Some(request)
    }

    /// Keyboard activation of a navigation control
    pub fn activate_with_key<S: Scroller + ?Sized>(
        &mut self,
        anchor: &str,
        key: &str,
        scroller: &mut S,
    ) -> Option<NavigationRequest> {
        if !is_activation_key(key) {
            return None;
        }
        self.navigate(anchor, scroller)
    }

    /// Registers every tagged anchor with `watcher` once the markup has settled.
    ///
    /// Waits the settle delay, then polls `host` until tagged elements appear.
    /// Returns how many targets were registered.
    pub async fn register_targets<H, W>(&mut self, host: &H, watcher: &mut W) -> usize
    where
        H: TargetHost + ?Sized,
        W: ViewportWatcher + ?Sized,
    {
        tokio::time::sleep(self.settle_delay).await;

        let found = poll_until(self.retry, "outline anchors", || {
            let targets: Vec<ObservedTarget> = host
                .tagged_targets()
                .into_iter()
                .filter(|target| *target != ObservedTarget::Untagged)
                .collect();
            (!targets.is_empty()).then_some(targets)
        })
        .await;

        watcher.disconnect();
        let Some(targets) = found else {
            return 0;
        };
        for target in &targets {
            watcher.observe(target);
        }
        self.registration_pending = false;
        info!("Registered {} outline anchor(s)", targets.len());
        targets.len()
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// Reacts to bus events. Returns whether the navigator's filters changed.
    pub fn handle_event(&mut self, event: &NavigatorEvent) -> bool {
        match event {
            NavigatorEvent::ClearFilters if !self.filters.is_empty() => {
                self.filters = FilterState::default();
                true
            }
            _ => false,
        }
    }

    /// Shows or hides the rendered cards under the navigator's filters and announces the result.
    ///
    /// Polls while no cards are rendered yet; returns `None` if they never appear.
    pub async fn sync_card_visibility<H: CardHost + ?Sized>(
        &self,
        host: &mut H,
        now: &DateTime<Utc>,
    ) -> Option<VisibilityPass> {
        let cards = poll_until(self.retry, "release cards", || {
            let cards = host.cards();
            (!cards.is_empty()).then_some(cards)
        })
        .await?;

        let pass = decide_visibility(&cards, &self.filters, now);
        for (index, visible) in pass.visible.iter().enumerate() {
            host.set_visible(index, *visible);
        }
        self.bus.publish(NavigatorEvent::FiltersChanged {
            has_results: pass.has_results(),
            visible_count: pass.visible_count,
        });
        Some(pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::drain;
    use crate::i18n::HumanizedTitles;
    use crate::visibility::CardAttributes;
    use chrono::TimeZone;
    use releases::{ContentSection, ReleaseType, parse_release_date};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingScroller {
        scrolled: Vec<String>,
    }

    impl Scroller for RecordingScroller {
        fn smooth_scroll_to(&mut self, anchor: &str) -> bool {
            self.scrolled.push(anchor.to_string());
            true
        }
    }

    #[derive(Default)]
    struct RecordingWatcher {
        observed: Vec<ObservedTarget>,
        disconnects: usize,
    }

    impl ViewportWatcher for RecordingWatcher {
        fn disconnect(&mut self) {
            self.disconnects += 1;
            self.observed.clear();
        }

        fn observe(&mut self, target: &ObservedTarget) {
            self.observed.push(target.clone());
        }
    }

    /// Renders its targets only after a number of lookups
    struct LateTargets {
        lookups: Cell<u32>,
        ready_after: u32,
    }

    impl TargetHost for LateTargets {
        fn tagged_targets(&self) -> Vec<ObservedTarget> {
            self.lookups.set(self.lookups.get() + 1);
            if self.lookups.get() < self.ready_after {
                return Vec::new();
            }
            vec![
                ObservedTarget::Release("release-2-0-0".to_string()),
                ObservedTarget::Section("release-2-0-0-features".to_string()),
                ObservedTarget::Untagged,
            ]
        }
    }

    struct Cards {
        cards: Vec<CardAttributes>,
        visible: Vec<bool>,
    }

    impl CardHost for Cards {
        fn cards(&self) -> Vec<CardAttributes> {
            self.cards.clone()
        }

        fn set_visible(&mut self, index: usize, visible: bool) {
            self.visible[index] = visible;
        }
    }

    fn releases() -> Vec<Release> {
        vec![
            Release {
                version: "2.0.0".to_string(),
                date: parse_release_date("2025-03-01").unwrap(),
                release_type: ReleaseType::Major,
                content: vec![ContentSection::new("features", vec!["Outline".to_string()])],
            },
            Release {
                version: "1.0.0".to_string(),
                date: parse_release_date("2024-01-01").unwrap(),
                release_type: ReleaseType::Initial,
                content: Vec::new(),
            },
        ]
    }

    fn navigator(width: u32) -> OutlineNavigator {
        let mut navigator = OutlineNavigator::new(&NotesConfig::default(), EventBus::new(), width);
        navigator.set_releases(&releases(), &mut HumanizedTitles);
        navigator
    }

    #[test]
    fn test_resize_switches_layout() {
        let mut navigator = navigator(1280);
        assert_eq!(navigator.mode(), LayoutMode::Desktop);
        assert!(navigator.on_resize(800));
        assert_eq!(navigator.mode(), LayoutMode::Tablet);
        assert!(!navigator.on_resize(900));
        assert!(navigator.on_resize(500));
        assert_eq!(navigator.render().mode, LayoutMode::Mobile);
    }

    #[test]
    fn test_navigate_to_section_reports_version_and_key() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut navigator = navigator(1280).with_navigation_callback(Box::new(move |request| {
            sink.borrow_mut().push(request.clone())
        }));
        let mut scroller = RecordingScroller::default();

        let request = navigator.navigate("release-2-0-0-features", &mut scroller).unwrap();
        assert_eq!(request.version.as_deref(), Some("2.0.0"));
        assert_eq!(request.section.as_deref(), Some("features"));
        assert_eq!(scroller.scrolled, vec!["release-2-0-0-features"]);
        assert_eq!(seen.borrow().len(), 1);

        assert!(navigator.navigate("release-7-0-0", &mut scroller).is_none());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_keyboard_activation() {
        let mut navigator = navigator(1280);
        let mut scroller = RecordingScroller::default();
        assert!(navigator.activate_with_key("release-1-0-0", "Tab", &mut scroller).is_none());
        assert!(navigator.activate_with_key("release-1-0-0", "Enter", &mut scroller).is_some());
        assert!(navigator.activate_with_key("release-1-0-0", " ", &mut scroller).is_some());
        assert_eq!(scroller.scrolled.len(), 2);
    }

    #[test]
    fn test_intersections_apply_on_frame() {
        let mut navigator = navigator(1280);

        let entries = vec![IntersectionEntry::new(
            ObservedTarget::Release("release-2-0-0".to_string()),
            true,
            50.0,
            700.0,
        )];
        assert!(navigator.on_intersections(&entries, 900.0));
        assert!(navigator.scroll_state().active_release.is_none());

        navigator.on_animation_frame();
        assert_eq!(
            navigator.scroll_state().active_release.as_deref(),
            Some("release-2-0-0")
        );
        assert!(navigator.render().items[0].active);
    }

    #[test]
    fn test_first_batch_after_rebuild_requests_frame() {
        let mut navigator = navigator(1280);
        let entry = |anchor: &str, top: f64| {
            IntersectionEntry::new(ObservedTarget::Release(anchor.to_string()), true, top, 700.0)
        };
        assert!(navigator.on_intersections(&[entry("release-2-0-0", 50.0)], 900.0));
        navigator.on_animation_frame();

        // Rebuilding mid-scroll clears the state without leaving work for a frame
        navigator.set_releases(&releases(), &mut HumanizedTitles);
        assert!(navigator.scroll_state().active_release.is_none());
        assert!(navigator.on_intersections(&[entry("release-1-0-0", 80.0)], 900.0));
        assert_eq!(
            navigator.on_animation_frame().and_then(|state| state.active_release.clone()),
            Some("release-1-0-0".to_string())
        );
    }

    #[test]
    fn test_retitle_keeps_scroll_state() {
        struct Finnish;
        impl SectionTitles for Finnish {
            fn section_title(&mut self, key: &str) -> String {
                format!("fi:{key}")
            }
        }

        let mut navigator = navigator(1280);
        let entries = vec![IntersectionEntry::new(
            ObservedTarget::Release("release-2-0-0".to_string()),
            true,
            50.0,
            700.0,
        )];
        navigator.on_intersections(&entries, 900.0);
        navigator.on_animation_frame();

        navigator.retitle_sections(&mut Finnish);
        assert_eq!(navigator.outline()[0].sections[0].title, "fi:features");
        assert_eq!(
            navigator.scroll_state().active_release.as_deref(),
            Some("release-2-0-0")
        );
        assert!(navigator.registration_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_waits_for_markup() {
        let mut navigator = navigator(1280);
        let host = LateTargets {
            lookups: Cell::new(0),
            ready_after: 3,
        };
        let mut watcher = RecordingWatcher::default();

        assert!(navigator.registration_pending());
        let registered = navigator.register_targets(&host, &mut watcher).await;

        assert_eq!(registered, 2);
        assert_eq!(watcher.observed.len(), 2);
        assert_eq!(watcher.disconnects, 1);
        assert_eq!(host.lookups.get(), 3);
        assert!(!navigator.registration_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_card_sync_publishes_visible_count() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();
        let mut navigator = OutlineNavigator::new(&NotesConfig::default(), bus, 1280);
        navigator.set_filters(FilterState {
            release_type: Some(ReleaseType::Major),
            ..FilterState::default()
        });
        let mut host = Cards {
            cards: vec![
                CardAttributes::new("2.0.0", "major", "2025-03-01"),
                CardAttributes::new("1.0.0", "initial", "2024-01-01"),
            ],
            visible: vec![true, true],
        };
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        let pass = navigator.sync_card_visibility(&mut host, &now).await.unwrap();
        assert_eq!(pass.visible_count, 1);
        assert_eq!(host.visible, vec![true, false]);
        assert_eq!(
            drain(&mut receiver),
            vec![NavigatorEvent::FiltersChanged {
                has_results: true,
                visible_count: 1
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_card_sync_gives_up_without_cards() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();
        let navigator = OutlineNavigator::new(&NotesConfig::default(), bus, 1280);
        let mut host = Cards {
            cards: Vec::new(),
            visible: Vec::new(),
        };
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        assert!(navigator.sync_card_visibility(&mut host, &now).await.is_none());
        assert!(drain(&mut receiver).is_empty());
    }

    #[test]
    fn test_clear_filters_event() {
        let mut navigator = navigator(1280);
        navigator.set_filters(FilterState {
            version: Some("2.0.0".to_string()),
            ..FilterState::default()
        });
        assert!(navigator.handle_event(&NavigatorEvent::ClearFilters));
        assert!(navigator.filters().is_empty());
        assert!(!navigator.handle_event(&NavigatorEvent::ClearFilters));
    }
}
