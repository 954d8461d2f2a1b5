//! Web font stylesheet scheduling.
//!
//! The primary family goes into the head as soon as DOM-ready work runs; the
//! secondary (decorative) family is held back until the full-load event so
//! it never competes with critical-path resources. A platform without a font
//! API gets neither.

use crate::dom::Document;
use tracing::{debug, info, warn};

/// Injects font stylesheet links at the right lifecycle points.
pub struct FontLoader {
    enabled: bool,
    primary_injected: bool,
    secondary_injected: bool,
}

impl FontLoader {
    pub fn new(font_api_supported: bool) -> Self {
        Self {
            enabled: font_api_supported,
            primary_injected: false,
            secondary_injected: false,
        }
    }

    /// Inject the primary font stylesheet. Idempotent; returns whether a
    /// link was added.
    pub fn inject_primary(&mut self, doc: &mut Document, url: &str) -> bool {
        if !self.enabled {
            debug!("font api unsupported, primary font skipped");
            return false;
        }
        if self.primary_injected {
            return false;
        }
        if inject_stylesheet(doc, url) {
            self.primary_injected = true;
            info!(url, "primary font stylesheet injected");
            true
        } else {
            false
        }
    }

    /// Inject the secondary font stylesheet, for use strictly after full
    /// load. Idempotent; returns whether a link was added.
    pub fn inject_secondary(&mut self, doc: &mut Document, url: &str) -> bool {
        if !self.enabled {
            debug!("font api unsupported, secondary font skipped");
            return false;
        }
        if self.secondary_injected {
            return false;
        }
        if inject_stylesheet(doc, url) {
            self.secondary_injected = true;
            info!(url, "secondary font stylesheet injected");
            true
        } else {
            false
        }
    }

    pub fn injected_count(&self) -> usize {
        usize::from(self.primary_injected) + usize::from(self.secondary_injected)
    }
}

fn inject_stylesheet(doc: &mut Document, url: &str) -> bool {
    if doc.head().is_none() {
        warn!(url, "document has no head, stylesheet not injected");
        return false;
    }
    let link = doc.create_element("link");
    let element = doc.element_mut(link);
    element.set_attr("rel", "stylesheet");
    element.set_attr("href", url);
    doc.append_to_head(link)
}
