//! Optional scroll-animation capability.
//!
//! When the embedder exposes a scroll-animation engine, the enhancer
//! initializes it once at DOM-ready with fixed settings. Absence of the
//! capability skips initialization without error.

use serde::{Deserialize, Serialize};

/// CSS timing functions the animation engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// The CSS name of the timing function.
    pub fn css_name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Ease => "ease",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

/// Settings handed to [`ScrollAnimator::init`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Animation duration in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    pub easing: Easing,
    /// Animate only on first reveal.
    pub once: bool,
    /// Replay animations when scrolling back past an element.
    pub mirror: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: 800,
            easing: Easing::EaseInOut,
            once: true,
            mirror: false,
        }
    }
}

/// A scroll-animation engine in the embedder's scope.
pub trait ScrollAnimator: Send + Sync {
    /// Called at most once per page, at DOM-ready.
    fn init(&self, settings: &AnimationSettings);
}
