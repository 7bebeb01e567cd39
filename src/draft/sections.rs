//! Collapsible editor sections and their disclosure state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four collapsible sections of the indicator editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Filter,
    Analysis,
    Visualization,
    Finalize,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[
            Section::Filter,
            Section::Analysis,
            Section::Visualization,
            Section::Finalize,
        ]
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Filter => write!(f, "filter"),
            Section::Analysis => write!(f, "analysis"),
            Section::Visualization => write!(f, "visualization"),
            Section::Finalize => write!(f, "finalize"),
        }
    }
}

/// Disclosure state of a section panel.
///
/// A single enum instead of `locked` + `open_panel` booleans, so a
/// locked-but-open panel cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SectionState {
    /// Section not yet reachable; panel cannot be opened
    #[default]
    Locked,
    /// Section unlocked but collapsed
    UnlockedClosed,
    /// Section unlocked and expanded
    UnlockedOpen,
}

impl SectionState {
    /// Whether the panel is expanded and its steps can be targeted
    pub fn is_open(self) -> bool {
        matches!(self, SectionState::UnlockedOpen)
    }

    pub fn is_locked(self) -> bool {
        matches!(self, SectionState::Locked)
    }
}

/// Disclosure state for every section of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStates {
    pub filter: SectionState,
    pub analysis: SectionState,
    pub visualization: SectionState,
    pub finalize: SectionState,
}

impl Default for SectionStates {
    fn default() -> Self {
        // The filter section is the entry point and starts expanded
        Self {
            filter: SectionState::UnlockedOpen,
            analysis: SectionState::Locked,
            visualization: SectionState::Locked,
            finalize: SectionState::Locked,
        }
    }
}

impl SectionStates {
    pub fn get(&self, section: Section) -> SectionState {
        match section {
            Section::Filter => self.filter,
            Section::Analysis => self.analysis,
            Section::Visualization => self.visualization,
            Section::Finalize => self.finalize,
        }
    }

    pub fn set(&mut self, section: Section, state: SectionState) {
        match section {
            Section::Filter => self.filter = state,
            Section::Analysis => self.analysis = state,
            Section::Visualization => self.visualization = state,
            Section::Finalize => self.finalize = state,
        }
    }

    /// Unlock a section, leaving its panel collapsed if it was locked
    pub fn unlock(&mut self, section: Section) {
        if self.get(section).is_locked() {
            self.set(section, SectionState::UnlockedClosed);
        }
    }

    /// Expand a section's panel, unlocking it if necessary
    pub fn open(&mut self, section: Section) {
        self.set(section, SectionState::UnlockedOpen);
    }

    /// Collapse a section's panel without re-locking it
    pub fn close(&mut self, section: Section) {
        if self.get(section).is_open() {
            self.set(section, SectionState::UnlockedClosed);
        }
    }
}
