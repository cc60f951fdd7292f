//! Scroll-position tracking for the outline.
//!
//! Intersection batches are classified against an activation band covering roughly the
//! middle third of the viewport. The resulting updates are buffered and only applied on
//! the next animation frame, so bursts of callbacks collapse into one state change.

use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Vertical band, as fractions of the viewport height, that decides which anchor is active
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationBand {
    pub top: f64,
    pub bottom: f64,
}

impl ActivationBand {
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    #[must_use]
    pub fn top_px(&self, viewport_height: f64) -> f64 {
        viewport_height * self.top
    }

    #[must_use]
    pub fn center_px(&self, viewport_height: f64) -> f64 {
        viewport_height * (self.top + self.bottom) / 2.0
    }
}

impl Default for ActivationBand {
    fn default() -> Self {
        Self::new(0.33, 0.66)
    }
}

/// What an observed element is tagged as
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObservedTarget {
    /// Element carrying `data-release`
    Release(String),
    /// Element carrying `data-section`
    Section(String),
    Untagged,
}

impl ObservedTarget {
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Self::Release(anchor) | Self::Section(anchor) => Some(anchor),
            Self::Untagged => None,
        }
    }
}

/// One element's intersection change, with its bounding box relative to the viewport top
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: ObservedTarget,
    pub is_intersecting: bool,
    pub top: f64,
    pub bottom: f64,
}

impl IntersectionEntry {
    pub fn new(target: ObservedTarget, is_intersecting: bool, top: f64, bottom: f64) -> Self {
        Self {
            target,
            is_intersecting,
            top,
            bottom,
        }
    }
}

/// Which anchors are active and which have been scrolled past
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub active_release: Option<String>,
    pub active_section: Option<String>,
    pub passed_releases: BTreeSet<String>,
    pub passed_sections: BTreeSet<String>,
}

impl ScrollState {
    /// Applies `update`. Absent fields keep their current value. Returns whether anything changed.
    pub fn apply(&mut self, update: ScrollUpdate) -> bool {
        let before = self.clone();
        if update.reset {
            *self = Self::default();
        }
        if let Some(release) = update.active_release {
            self.active_release = Some(release);
        }
        if let Some(section) = update.active_section {
            self.active_section = Some(section);
        }
        for mark in update.passed {
            let set = match mark.target {
                ObservedTarget::Release(_) => &mut self.passed_releases,
                ObservedTarget::Section(_) => &mut self.passed_sections,
                ObservedTarget::Untagged => continue,
            };
            let Some(anchor) = mark.target.anchor() else {
                continue;
            };
            if mark.passed {
                set.insert(anchor.to_string());
            } else {
                set.remove(anchor);
            }
        }
        *self != before
    }

    #[must_use]
    pub fn is_passed(&self, anchor: &str) -> bool {
        self.passed_releases.contains(anchor) || self.passed_sections.contains(anchor)
    }
}

/// Whether an anchor is above the activation band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassMark {
    pub target: ObservedTarget,
    pub passed: bool,
}

/// A partial change to [`ScrollState`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollUpdate {
    pub active_release: Option<String>,
    pub active_section: Option<String>,
    pub passed: Vec<PassMark>,
    pub reset: bool,
}

impl ScrollUpdate {
    /// Clears all scroll state before applying anything else
    #[must_use]
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn activate_release(anchor: impl Into<String>) -> Self {
        Self {
            active_release: Some(anchor.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn activate_section(anchor: impl Into<String>) -> Self {
        Self {
            active_section: Some(anchor.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.reset
            && self.active_release.is_none()
            && self.active_section.is_none()
            && self.passed.is_empty()
    }

    /// Folds a later update into this one, as if both were applied in order
    pub fn merge(&mut self, later: ScrollUpdate) {
        if later.reset {
            *self = later;
            return;
        }
        if later.active_release.is_some() {
            self.active_release = later.active_release;
        }
        if later.active_section.is_some() {
            self.active_section = later.active_section;
        }
        self.passed.extend(later.passed);
    }
}

fn by_top(a: &IntersectionEntry, b: &IntersectionEntry) -> Ordering {
    a.top.total_cmp(&b.top)
}

/// Classifies one intersection batch into a scroll update.
///
/// Untagged elements are ignored. An element whose bottom is above the band is passed;
/// otherwise it is a candidate when it intersects, its top is at or above the band center
/// and its bottom is still below the viewport top. The topmost candidate of each kind wins.
pub fn classify(
    entries: &[IntersectionEntry],
    band: &ActivationBand,
    viewport_height: f64,
) -> ScrollUpdate {
    let band_top = band.top_px(viewport_height);
    let band_center = band.center_px(viewport_height);

    let mut tagged: Vec<&IntersectionEntry> = entries
        .iter()
        .filter(|entry| entry.target != ObservedTarget::Untagged)
        .collect();
    tagged.sort_by(|a, b| by_top(a, b));

    let mut update = ScrollUpdate::default();
    for entry in tagged {
        let passed = entry.bottom < band_top;
        update.passed.push(PassMark {
            target: entry.target.clone(),
            passed,
        });
        if passed {
            continue;
        }

        let candidate = entry.is_intersecting && entry.top <= band_center && entry.bottom > 0.0;
        if !candidate {
            continue;
        }
        match &entry.target {
            ObservedTarget::Release(anchor) if update.active_release.is_none() => {
                update.active_release = Some(anchor.clone());
            }
            ObservedTarget::Section(anchor) if update.active_section.is_none() => {
                update.active_section = Some(anchor.clone());
            }
            _ => {}
        }
    }
    update
}

/// Buffers scroll updates until the host's next animation frame
#[derive(Debug, Clone, Default)]
pub struct ScrollTracker {
    band: ActivationBand,
    state: ScrollState,
    pending: Option<ScrollUpdate>,
}

impl ScrollTracker {
    pub fn new(band: ActivationBand) -> Self {
        Self {
            band,
            state: ScrollState::default(),
            pending: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Classifies a batch and queues the result. Returns `true` when the caller
    /// must request an animation frame.
    pub fn observe(&mut self, entries: &[IntersectionEntry], viewport_height: f64) -> bool {
        let update = classify(entries, &self.band, viewport_height);
        self.queue(update)
    }

    /// Queues an update. Returns `true` when this is the first update since the last frame.
    pub fn queue(&mut self, update: ScrollUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        match &mut self.pending {
            Some(pending) => {
                pending.merge(update);
                false
            }
            None => {
                self.pending = Some(update);
                true
            }
        }
    }

    /// Clears the state and drops anything queued. Takes effect immediately, so the
    /// next observed batch requests a fresh frame.
    pub fn reset(&mut self) {
        self.pending = None;
        self.state.apply(ScrollUpdate::reset());
    }

    /// Applies everything queued since the last frame. Returns the new state if it changed.
    pub fn on_animation_frame(&mut self) -> Option<&ScrollState> {
        let update = self.pending.take()?;
        self.state.apply(update).then_some(&self.state)
    }
}
