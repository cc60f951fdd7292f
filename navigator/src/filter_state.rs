use crate::error::Result;
use log::debug;
use releases::{DateRange, FilterState, ReleaseType};
use url::Url;

pub const VERSION_PARAM: &str = "version";
pub const TYPE_PARAM: &str = "type";
pub const DATE_PARAM: &str = "date";

/// The page address the filter selection is mirrored into
pub trait Location {
    fn current(&self) -> Url;

    /// Swaps the current history entry for `url` without navigating
    fn replace(&mut self, url: Url);
}

/// In-memory location with a history stack, for hosts without a browser
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    current: Url,
    back: Vec<Url>,
}

impl MemoryLocation {
    pub fn new(url: Url) -> Self {
        Self {
            current: url,
            back: Vec::new(),
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// Navigates to `url`, adding a history entry
    pub fn push(&mut self, url: Url) {
        let previous = std::mem::replace(&mut self.current, url);
        self.back.push(previous);
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.back.len() + 1
    }
}

impl Location for MemoryLocation {
    fn current(&self) -> Url {
        self.current.clone()
    }

    fn replace(&mut self, url: Url) {
        self.current = url;
    }
}

fn first_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Reads filters from the query string, silently dropping values that are not recognized.
pub fn filters_from_url(url: &Url, available_versions: &[String]) -> FilterState {
    let version = first_param(url, VERSION_PARAM).filter(|version| {
        let known = available_versions.contains(version);
        if !known {
            debug!("Ignoring unknown version '{version}' in URL");
        }
        known
    });
    let release_type = first_param(url, TYPE_PARAM).and_then(|raw| {
        raw.parse::<ReleaseType>()
            .inspect_err(|_| debug!("Ignoring unknown release type '{raw}' in URL"))
            .ok()
    });
    let date_range = first_param(url, DATE_PARAM).and_then(|raw| {
        raw.parse::<DateRange>()
            .inspect_err(|_| debug!("Ignoring unknown date range '{raw}' in URL"))
            .ok()
    });

    FilterState {
        version,
        date_range,
        release_type,
    }
}

/// Copy of `url` whose query string holds exactly the present filter fields
pub fn url_with_filters(url: &Url, filters: &FilterState) -> Url {
    let mut next = url.clone();
    next.set_query(None);
    if !filters.is_empty() {
        let mut pairs = next.query_pairs_mut();
        if let Some(version) = &filters.version {
            pairs.append_pair(VERSION_PARAM, version);
        }
        if let Some(release_type) = filters.release_type {
            pairs.append_pair(TYPE_PARAM, release_type.as_str());
        }
        if let Some(date_range) = filters.date_range {
            pairs.append_pair(DATE_PARAM, date_range.as_str());
        }
    }
    next
}

pub type FilterObserver = Box<dyn Fn(&FilterState)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single source of truth for the session's filter selection, mirrored to the URL
pub struct FilterStateController<L: Location> {
    location: L,
    state: FilterState,
    available_versions: Vec<String>,
    observers: Vec<(SubscriptionId, FilterObserver)>,
    next_subscription: u64,
}

impl<L: Location> FilterStateController<L> {
    /// Reads the initial selection from the location's query string
    pub fn new(location: L, available_versions: Vec<String>) -> Self {
        let state = filters_from_url(&location.current(), &available_versions);
        Self {
            location,
            state,
            available_versions,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub fn location(&self) -> &L {
        &self.location
    }

    #[must_use]
    pub fn available_versions(&self) -> &[String] {
        &self.available_versions
    }

    pub fn subscribe(&mut self, observer: FilterObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Selects a version. Versions outside the available list are ignored.
    pub fn set_version(&mut self, version: Option<String>) -> bool {
        if let Some(wanted) = &version {
            if !self.available_versions.contains(wanted) {
                debug!("Ignoring selection of unknown version '{wanted}'");
                return false;
            }
        }
        let next = FilterState {
            version,
            ..self.state.clone()
        };
        self.update(next)
    }

    pub fn set_release_type(&mut self, release_type: Option<ReleaseType>) -> bool {
        let next = FilterState {
            release_type,
            ..self.state.clone()
        };
        self.update(next)
    }

    pub fn set_date_range(&mut self, date_range: Option<DateRange>) -> bool {
        let next = FilterState {
            date_range,
            ..self.state.clone()
        };
        self.update(next)
    }

    /// Replaces the whole selection. Returns whether anything changed.
    ///
    /// A version outside the available list is dropped, matching how URL parameters are read.
    pub fn update(&mut self, mut next: FilterState) -> bool {
        if let Some(wanted) = &next.version {
            if !self.available_versions.contains(wanted) {
                debug!("Dropping unknown version '{wanted}' from filter update");
                next.version = None;
            }
        }
        if next == self.state {
            return false;
        }
        self.state = next;
        let url = url_with_filters(&self.location.current(), &self.state);
        self.location.replace(url);
        for (_, observer) in &self.observers {
            observer(&self.state);
        }
        true
    }

    pub fn clear_all(&mut self) -> bool {
        self.update(FilterState::default())
    }
}
