//! Meterable features and their display names.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Features whose use is metered per identity.
///
/// The kebab-case name is the flag key; [`FeatureFlag::event`] is the event
/// subtype the entitlement service meters usage under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FeatureFlag {
    /// Fetching a transcript from the external provider
    Transcription,
    /// Generating an image for a video
    ImageGeneration,
}

impl FeatureFlag {
    /// Event subtype used for usage lookup and tracking.
    pub fn event(&self) -> &'static str {
        match self {
            FeatureFlag::Transcription => "transcribe",
            FeatureFlag::ImageGeneration => "generate-image",
        }
    }

    /// Name shown to users in limit messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureFlag::Transcription => "transcription",
            FeatureFlag::ImageGeneration => "image generation",
        }
    }

    /// Finds the flag metered under `event`.
    pub fn from_event(event: &str) -> Option<Self> {
        FeatureFlag::iter().find(|flag| flag.event() == event)
    }
}

/// Static table resolving event subtypes to human-readable names.
///
/// # Examples
///
/// ```
/// use tubescribe_core::FeatureNames;
///
/// let names = FeatureNames::default();
/// assert_eq!(names.resolve("transcribe"), "transcription");
/// assert_eq!(names.resolve("summarize"), "summarize");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureNames {
    names: HashMap<String, String>,
}

impl FeatureNames {
    /// Builds the table from the known flags, then applies `overrides`.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut table = Self::default();
        for (event, name) in overrides {
            table.names.insert(event.clone(), name.clone());
        }
        table
    }

    /// Display name for `event`, or the raw key when the table has none.
    pub fn resolve<'a>(&'a self, event: &'a str) -> &'a str {
        self.names.get(event).map(String::as_str).unwrap_or(event)
    }
}

impl Default for FeatureNames {
    fn default() -> Self {
        let names = FeatureFlag::iter()
            .map(|flag| (flag.event().to_string(), flag.display_name().to_string()))
            .collect();
        Self { names }
    }
}
