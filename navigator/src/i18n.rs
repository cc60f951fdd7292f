use log::debug;
use releases::humanize_key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Interface languages the release notes ship with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fi,
}

impl Locale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fi => "fi",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "fi" => Ok(Self::Fi),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

pub type Messages = HashMap<String, String>;

/// Source of translated strings for a locale
pub trait Catalog {
    fn load(&self, locale: Locale) -> Option<Messages>;
}

/// Catalog backed by in-memory message tables
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: HashMap<Locale, Messages>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_messages<K, V>(
        mut self,
        locale: Locale,
        messages: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.tables.insert(
            locale,
            messages
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }
}

impl Catalog for StaticCatalog {
    fn load(&self, locale: Locale) -> Option<Messages> {
        self.tables.get(&locale).cloned()
    }
}

/// Supplies display titles for content section keys
pub trait SectionTitles {
    fn section_title(&mut self, key: &str) -> String;
}

/// Titles derived from the key alone
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanizedTitles;

impl SectionTitles for HumanizedTitles {
    fn section_title(&mut self, key: &str) -> String {
        humanize_key(key)
    }
}

/// Messages of the active locale, loaded on first lookup and dropped on locale switch
pub struct TranslationCache<C: Catalog> {
    catalog: C,
    locale: Locale,
    messages: Option<Messages>,
}

impl<C: Catalog> TranslationCache<C> {
    pub fn new(catalog: C, locale: Locale) -> Self {
        Self {
            catalog,
            locale,
            messages: None,
        }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.messages.is_some()
    }

    /// Changes the active locale. Returns whether the cache was invalidated.
    pub fn switch_locale(&mut self, locale: Locale) -> bool {
        if locale == self.locale {
            return false;
        }
        debug!("Switching locale {} -> {locale}", self.locale);
        self.locale = locale;
        self.messages = None;
        true
    }

    pub fn translate(&mut self, key: &str) -> Option<String> {
        let locale = self.locale;
        let catalog = &self.catalog;
        self.messages
            .get_or_insert_with(|| {
                catalog.load(locale).unwrap_or_else(|| {
                    debug!("No messages for locale {locale}");
                    Messages::new()
                })
            })
            .get(key)
            .cloned()
    }
}

impl<C: Catalog> SectionTitles for TranslationCache<C> {
    fn section_title(&mut self, key: &str) -> String {
        self.translate(&format!("sections.{key}"))
            .unwrap_or_else(|| humanize_key(key))
    }
}
