use crate::error::{NavigatorError, Result};
use crate::i18n::Locale;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const ANIMATION_KEY: &str = "animation-preference";
pub const THEME_KEY: &str = "theme";
pub const LOCALE_KEY: &str = "preferred-locale";

/// Device-local key/value storage
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    #[default]
    Auto,
    On,
    Off,
}

/// Background animation choice; `auto` defers to the device's reduced-motion setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationPreference {
    pub enabled: bool,
    pub auto: bool,
    pub mode: AnimationMode,
}

impl AnimationPreference {
    #[must_use]
    pub fn from_mode(mode: AnimationMode, reduced_motion: bool) -> Self {
        match mode {
            AnimationMode::Auto => Self {
                enabled: !reduced_motion,
                auto: true,
                mode,
            },
            AnimationMode::On => Self {
                enabled: true,
                auto: false,
                mode,
            },
            AnimationMode::Off => Self {
                enabled: false,
                auto: false,
                mode,
            },
        }
    }
}

impl Default for AnimationPreference {
    fn default() -> Self {
        Self::from_mode(AnimationMode::Auto, false)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub animation: AnimationPreference,
    pub theme: Theme,
    pub locale: Locale,
}

/// A preference changed by another component writing to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceChange {
    Animation(AnimationPreference),
    Theme(Theme),
    Locale(Locale),
}

fn parse_animation(raw: &str) -> Option<AnimationPreference> {
    serde_json::from_str(raw)
        .inspect_err(|err| debug!("Ignoring malformed animation preference: {err}"))
        .ok()
}

impl Preferences {
    /// Reads every preference, substituting defaults for missing or malformed values
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        Self {
            animation: store
                .get(ANIMATION_KEY)
                .and_then(|raw| parse_animation(&raw))
                .unwrap_or_default(),
            theme: store
                .get(THEME_KEY)
                .and_then(|raw| Theme::parse(&raw))
                .unwrap_or_default(),
            locale: store
                .get(LOCALE_KEY)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
        }
    }

    pub fn save_animation<S: PreferenceStore + ?Sized>(
        &mut self,
        store: &mut S,
        animation: AnimationPreference,
    ) -> Result<()> {
        let raw = serde_json::to_string(&animation).map_err(|err| NavigatorError::Preference {
            key: ANIMATION_KEY.to_string(),
            message: err.to_string(),
        })?;
        store.set(ANIMATION_KEY, raw)?;
        self.animation = animation;
        Ok(())
    }

    pub fn save_theme<S: PreferenceStore + ?Sized>(
        &mut self,
        store: &mut S,
        theme: Theme,
    ) -> Result<()> {
        store.set(THEME_KEY, theme.as_str().to_string())?;
        self.theme = theme;
        Ok(())
    }

    pub fn save_locale<S: PreferenceStore + ?Sized>(
        &mut self,
        store: &mut S,
        locale: Locale,
    ) -> Result<()> {
        store.set(LOCALE_KEY, locale.as_str().to_string())?;
        self.locale = locale;
        Ok(())
    }

    /// Folds a storage-change notification in. Unrelated keys yield `None`;
    /// a removed or malformed value reverts that preference to its default.
    pub fn apply_storage_change(
        &mut self,
        key: &str,
        new_value: Option<&str>,
    ) -> Option<PreferenceChange> {
        let change = match key {
            ANIMATION_KEY => PreferenceChange::Animation(
                new_value.and_then(parse_animation).unwrap_or_default(),
            ),
            THEME_KEY => {
                PreferenceChange::Theme(new_value.and_then(Theme::parse).unwrap_or_default())
            }
            LOCALE_KEY => PreferenceChange::Locale(
                new_value.and_then(|raw| raw.parse().ok()).unwrap_or_default(),
            ),
            _ => return None,
        };
        match change {
            PreferenceChange::Animation(animation) => self.animation = animation,
            PreferenceChange::Theme(theme) => self.theme = theme,
            PreferenceChange::Locale(locale) => self.locale = locale,
        }
        Some(change)
    }
}
