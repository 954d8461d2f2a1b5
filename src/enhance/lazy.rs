//! Deferred image loading.
//!
//! Images marked `loading="lazy"` keep their real source in `data-src`
//! (and optionally `data-srcset`) until they near the viewport. Promotion
//! copies the deferred attributes into the live ones, which is what triggers
//! the actual network fetch in a real embedder.

use crate::config::EnhancerConfig;
use crate::dom::{Document, ElementId};
use crate::observer::ProximityObserver;
use crate::viewport::Margin;
use tracing::{debug, info};

/// Watches deferred images and promotes them on proximity.
pub struct LazyImageLoader {
    observer: Option<ProximityObserver>,
    observed: usize,
    promoted: usize,
}

impl LazyImageLoader {
    /// `observer_supported = false` models a platform without proximity
    /// observation: nothing is watched and deferred images never load.
    pub fn new(config: &EnhancerConfig, observer_supported: bool) -> Self {
        let observer = observer_supported.then(|| {
            ProximityObserver::new(
                Margin::vertical(config.proximity_margin_px),
                config.visibility_threshold,
            )
        });
        Self {
            observer,
            observed: 0,
            promoted: 0,
        }
    }

    /// Register every deferred image in the document with the observer.
    pub fn scan(&mut self, doc: &Document) -> usize {
        let Some(observer) = self.observer.as_mut() else {
            debug!("proximity observation unsupported, deferred images stay deferred");
            return 0;
        };

        let images = doc.lazy_images();
        for id in &images {
            observer.observe(*id);
        }
        self.observed += images.len();
        info!(count = images.len(), "watching deferred images");
        images.len()
    }

    /// Promote every watched image that has entered the proximity region.
    ///
    /// Each returned element had its deferred attributes copied to the live
    /// ones, gained the `loaded` class, and left the watch set for good.
    pub fn poll(&mut self, doc: &mut Document) -> Vec<ElementId> {
        let Some(observer) = self.observer.as_mut() else {
            return Vec::new();
        };

        let ready = observer.take_intersecting(doc);
        for id in &ready {
            promote(doc, *id);
        }
        self.promoted += ready.len();
        ready
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    pub fn promoted(&self) -> usize {
        self.promoted
    }
}

fn promote(doc: &mut Document, id: ElementId) {
    let element = doc.element_mut(id);
    if let Some(src) = element.attr("data-src").map(str::to_string) {
        element.set_attr("src", &src);
    }
    if let Some(srcset) = element.attr("data-srcset").map(str::to_string) {
        element.set_attr("srcset", &srcset);
    }
    element.add_class("loaded");
    debug!(element = %id, "deferred image promoted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Rect;

    fn lazy_page() -> Document {
        let mut doc = Document::parse(
            r#"<body>
                <img loading="lazy" data-src="near.png" data-srcset="near.png 1x, near@2x.png 2x">
                <img loading="lazy" data-src="far.png">
            </body>"#,
        );
        let images = doc.lazy_images();
        doc.set_rect(images[0], Rect::new(0.0, 100.0, 100.0, 100.0));
        doc.set_rect(images[1], Rect::new(0.0, 5000.0, 100.0, 100.0));
        doc
    }

    #[test]
    fn test_promotes_only_nearby_images() {
        let mut doc = lazy_page();
        let images = doc.lazy_images();
        let mut loader = LazyImageLoader::new(&EnhancerConfig::default(), true);

        assert_eq!(loader.scan(&doc), 2);
        let ready = loader.poll(&mut doc);
        assert_eq!(ready, vec![images[0]]);

        let near = doc.element(images[0]);
        assert_eq!(near.attr("src"), Some("near.png"));
        assert_eq!(near.attr("srcset"), Some("near.png 1x, near@2x.png 2x"));
        assert!(near.has_class("loaded"));

        let far = doc.element(images[1]);
        assert_eq!(far.attr("src"), None);
        assert!(!far.has_class("loaded"));
    }

    #[test]
    fn test_scroll_promotes_remaining_image() {
        let mut doc = lazy_page();
        let images = doc.lazy_images();
        let mut loader = LazyImageLoader::new(&EnhancerConfig::default(), true);
        loader.scan(&doc);
        loader.poll(&mut doc);

        doc.scroll_to(0.0, 4300.0);
        let ready = loader.poll(&mut doc);
        assert_eq!(ready, vec![images[1]]);
        assert_eq!(doc.element(images[1]).attr("src"), Some("far.png"));
        assert_eq!(loader.promoted(), 2);
    }

    #[test]
    fn test_image_is_never_promoted_twice() {
        let mut doc = lazy_page();
        let mut loader = LazyImageLoader::new(&EnhancerConfig::default(), true);
        loader.scan(&doc);
        assert_eq!(loader.poll(&mut doc).len(), 1);

        // Neither another poll nor a rescan re-fires the first image.
        assert!(loader.poll(&mut doc).is_empty());
        loader.scan(&doc);
        assert!(loader.poll(&mut doc).is_empty());
    }

    #[test]
    fn test_promotion_without_deferred_source_still_marks_loaded() {
        let mut doc = Document::parse(r#"<body><img loading="lazy"></body>"#);
        let img = doc.lazy_images()[0];
        doc.set_rect(img, Rect::new(0.0, 0.0, 100.0, 100.0));

        let mut loader = LazyImageLoader::new(&EnhancerConfig::default(), true);
        loader.scan(&doc);
        assert_eq!(loader.poll(&mut doc), vec![img]);
        assert_eq!(doc.element(img).attr("src"), None);
        assert!(doc.element(img).has_class("loaded"));
    }

    #[test]
    fn test_unsupported_observer_loads_nothing() {
        let mut doc = lazy_page();
        let mut loader = LazyImageLoader::new(&EnhancerConfig::default(), false);

        assert_eq!(loader.scan(&doc), 0);
        assert!(loader.poll(&mut doc).is_empty());
        for id in doc.lazy_images() {
            assert_eq!(doc.element(id).attr("src"), None);
        }
    }
}
