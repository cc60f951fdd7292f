use crate::config::NotesConfig;
use crate::error::Result;
use crate::events::{EventBus, NavigatorEvent, drain};
use crate::filter_state::{FilterStateController, Location};
use crate::i18n::{Catalog, Locale, TranslationCache};
use crate::navigator::OutlineNavigator;
use crate::visibility::{CardHost, VisibilityPass};
use chrono::{DateTime, Utc};
use log::{debug, info};
use releases::{DateRange, FilterState, Release, ReleaseRepository, ReleaseSource, ReleaseType};
use tokio::sync::broadcast;
use url::Url;

/// Page-level composition root.
///
/// Owns the release data, the URL-backed filter controller, the outline navigator,
/// the event bus and the translation cache. The controller's selection is copied
/// into the navigator after every change.
pub struct ReleaseNotesPage<L: Location, C: Catalog> {
    repository: ReleaseRepository,
    controller: FilterStateController<L>,
    navigator: OutlineNavigator,
    bus: EventBus,
    events: broadcast::Receiver<NavigatorEvent>,
    titles: TranslationCache<C>,
}

impl<L: Location, C: Catalog> ReleaseNotesPage<L, C> {
    pub async fn load<S: ReleaseSource>(
        source: &S,
        location: L,
        titles: TranslationCache<C>,
        config: &NotesConfig,
        viewport_width: u32,
    ) -> Result<Self> {
        config.validate()?;
        let repository = ReleaseRepository::load(source).await?;
        let controller = FilterStateController::new(location, repository.unique_versions());

        let bus = EventBus::new();
        let events = bus.subscribe();
        let navigator = OutlineNavigator::new(config, bus.clone(), viewport_width);

        let mut page = Self {
            repository,
            controller,
            navigator,
            bus,
            events,
            titles,
        };
        page.rebuild_outline();
        page.sync_navigator_filters();
        info!(
            "Loaded {} release(s) from {}",
            page.repository.releases().len(),
            source.name()
        );
        Ok(page)
    }

    #[must_use]
    pub fn repository(&self) -> &ReleaseRepository {
        &self.repository
    }

    #[must_use]
    pub fn controller(&self) -> &FilterStateController<L> {
        &self.controller
    }

    #[must_use]
    pub fn navigator(&self) -> &OutlineNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut OutlineNavigator {
        &mut self.navigator
    }

    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        self.controller.state()
    }

    /// The current address, carrying the filter selection
    #[must_use]
    pub fn share_url(&self) -> Url {
        self.controller.location().current()
    }

    #[must_use]
    pub fn visible_releases(&self, now: &DateTime<Utc>) -> Vec<&Release> {
        self.repository.filter(self.controller.state(), now)
    }

    #[must_use]
    pub fn current_release(&self) -> Option<&Release> {
        self.repository.current()
    }

    pub fn update_filters(&mut self, next: FilterState) -> bool {
        let changed = self.controller.update(next);
        if changed {
            self.sync_navigator_filters();
        }
        changed
    }

    pub fn set_version(&mut self, version: Option<String>) -> bool {
        let changed = self.controller.set_version(version);
        if changed {
            self.sync_navigator_filters();
        }
        changed
    }

    pub fn set_release_type(&mut self, release_type: Option<ReleaseType>) -> bool {
        let changed = self.controller.set_release_type(release_type);
        if changed {
            self.sync_navigator_filters();
        }
        changed
    }

    pub fn set_date_range(&mut self, date_range: Option<DateRange>) -> bool {
        let changed = self.controller.set_date_range(date_range);
        if changed {
            self.sync_navigator_filters();
        }
        changed
    }

    pub fn clear_filters(&mut self) -> bool {
        let changed = self.controller.clear_all();
        self.sync_navigator_filters();
        changed
    }

    /// Asks every bus subscriber to reset its filters
    pub fn request_clear(&self) -> usize {
        self.bus.publish(NavigatorEvent::ClearFilters)
    }

    /// Routes queued bus events. `ClearFilters` resets both filter copies.
    pub fn pump_events(&mut self) -> Vec<NavigatorEvent> {
        let events = drain(&mut self.events);
        for event in &events {
            if matches!(event, NavigatorEvent::ClearFilters) {
                self.navigator.handle_event(event);
                self.controller.clear_all();
            }
        }
        events
    }

    /// Switches the interface language and retitles the outline
    pub fn switch_locale(&mut self, locale: Locale) -> bool {
        if !self.titles.switch_locale(locale) {
            return false;
        }
        self.navigator.retitle_sections(&mut self.titles);
        true
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.titles.locale()
    }

    pub async fn sync_cards<H: CardHost + ?Sized>(
        &self,
        host: &mut H,
        now: &DateTime<Utc>,
    ) -> Option<VisibilityPass> {
        self.navigator.sync_card_visibility(host, now).await
    }

    fn rebuild_outline(&mut self) {
        self.navigator
            .set_releases(self.repository.releases(), &mut self.titles);
    }

    fn sync_navigator_filters(&mut self) {
        debug!("Syncing navigator filters: {:?}", self.controller.state());
        self.navigator.set_filters(self.controller.state().clone());
    }
}
