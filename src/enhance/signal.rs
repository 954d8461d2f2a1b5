//! Load-state signaling.
//!
//! CSS transitions on the page are gated on body classes: `loaded` appears
//! at DOM-ready, `fully-loaded` once every sub-resource is in. The same
//! moments drive the scroll-animation init and the preloader teardown.

use crate::animate::{AnimationSettings, ScrollAnimator};
use crate::config::EnhancerConfig;
use crate::dom::Document;
use std::sync::Arc;
use tracing::{debug, info};

/// Applies the page-lifecycle class toggles and side effects.
pub struct LoadSignaler {
    preloader_class: String,
    animation: AnimationSettings,
    animator: Option<Arc<dyn ScrollAnimator>>,
    animator_initialized: bool,
}

impl LoadSignaler {
    pub fn new(config: &EnhancerConfig, animator: Option<Arc<dyn ScrollAnimator>>) -> Self {
        Self {
            preloader_class: config.preloader_class.clone(),
            animation: config.animation.clone(),
            animator,
            animator_initialized: false,
        }
    }

    /// Remove the `no-js` marker from the root element.
    pub fn clear_noscript_marker(&self, doc: &mut Document) {
        let root = doc.root();
        doc.element_mut(root).remove_class("no-js");
    }

    /// DOM-ready: gate classes on, initialize the scroll animator if one is
    /// in scope.
    pub fn mark_dom_ready(&mut self, doc: &mut Document) {
        if let Some(body) = doc.body() {
            doc.element_mut(body).add_class("loaded");
        }

        match self.animator.as_ref() {
            Some(animator) if !self.animator_initialized => {
                animator.init(&self.animation);
                self.animator_initialized = true;
                info!(
                    duration_ms = self.animation.duration_ms,
                    easing = self.animation.easing.css_name(),
                    "scroll animator initialized"
                );
            }
            Some(_) => {}
            None => debug!("no scroll animator in scope"),
        }
    }

    /// Full load: final gate class, hide the preloader if the page has one.
    pub fn mark_fully_loaded(&self, doc: &mut Document) {
        if let Some(body) = doc.body() {
            doc.element_mut(body).add_class("fully-loaded");
        }

        match doc.first_by_class(&self.preloader_class) {
            Some(id) => {
                doc.element_mut(id).style_mut().set("display", "none");
                debug!(element = %id, "preloader hidden");
            }
            None => debug!("no preloader element"),
        }
    }

    pub fn animator_initialized(&self) -> bool {
        self.animator_initialized
    }
}
