//! Enhancer configuration.
//!
//! Defaults reproduce the stock page behavior: a 200px vertical pre-trigger
//! margin, a 1% visibility threshold, the two Google Fonts stylesheets, and
//! the `.preloader` element hidden at full load. Everything can be
//! overridden from a JSON file.

use crate::animate::AnimationSettings;
use crate::error::EnhanceError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const PRIMARY_FONT_URL: &str = "https://fonts.googleapis.com/css2?family=DM+Sans:ital,wght@0,400;0,500;0,700;1,400;1,500;1,700&display=swap";
const SECONDARY_FONT_URL: &str =
    "https://fonts.googleapis.com/css2?family=Amatic+SC:wght@400;700&display=swap";

/// Tunables for a [`PageEnhancer`](crate::enhance::PageEnhancer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    /// Vertical viewport expansion for the proximity pre-trigger, in pixels.
    pub proximity_margin_px: f32,
    /// Minimum visible fraction of an element before its deferred source is
    /// promoted.
    pub visibility_threshold: f32,
    /// Stylesheet URL for the primary font family, injected at DOM-ready.
    pub primary_font_url: String,
    /// Stylesheet URL for the secondary (decorative) font family, injected
    /// only after full load.
    pub secondary_font_url: String,
    /// Class of the element hidden once the page is fully loaded.
    pub preloader_class: String,
    /// Settings passed to the scroll-animation capability.
    pub animation: AnimationSettings,
    /// Base URL for resolving relative background image references.
    pub base_url: Option<String>,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            proximity_margin_px: 200.0,
            visibility_threshold: 0.01,
            primary_font_url: PRIMARY_FONT_URL.to_string(),
            secondary_font_url: SECONDARY_FONT_URL.to_string(),
            preloader_class: "preloader".to_string(),
            animation: AnimationSettings::default(),
            base_url: None,
        }
    }
}

impl EnhancerConfig {
    /// Load a configuration from a JSON file. Missing fields fall back to
    /// the defaults.
    pub fn from_file(path: &Path) -> Result<Self, EnhanceError> {
        let text = std::fs::read_to_string(path).map_err(|source| EnhanceError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| EnhanceError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }
}
