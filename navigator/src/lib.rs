//! URL-backed filter state and a scroll-synchronized outline navigator for release notes.

pub mod config;
pub mod error;
pub mod events;
pub mod filter_state;
pub mod i18n;
pub mod layout;
pub mod navigator;
pub mod outline;
pub mod page;
pub mod preferences;
pub mod retry;
pub mod scroll;
pub mod visibility;

pub use config::{DEFAULT_CONFIG_FILE, NotesConfig};
pub use error::{NavigatorError, Result, ResultExt};
pub use events::{EventBus, NavigatorEvent};
pub use filter_state::{
    FilterStateController, Location, MemoryLocation, filters_from_url, url_with_filters,
};
pub use i18n::{Catalog, HumanizedTitles, Locale, SectionTitles, StaticCatalog, TranslationCache};
pub use layout::{Breakpoints, LayoutMode, NavItem, NavigationModel, NavigationView};
pub use navigator::{NavigationRequest, OutlineNavigator, Scroller, TargetHost, ViewportWatcher};
pub use outline::{NavigationRelease, NavigationSection, build_outline, retitle_outline};
pub use page::ReleaseNotesPage;
pub use preferences::{Preferences, PreferenceStore, Theme};
pub use retry::RetryPolicy;
pub use scroll::{ActivationBand, IntersectionEntry, ObservedTarget, ScrollState, ScrollTracker};
pub use visibility::{CardAttributes, CardHost, VisibilityPass, decide_visibility};
