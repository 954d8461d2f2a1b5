//! Proximity watcher over laid-out elements.
//!
//! The observer tracks a set of elements and reports the ones whose layout
//! rect intersects the margin-expanded viewport at or above a visibility
//! threshold. Reporting removes the element from the watch set in the same
//! call, so each element is notified at most once over the observer's
//! lifetime, even if it is observed again later.

use crate::dom::{Document, ElementId};
use crate::viewport::{intersection_ratio, Margin};
use fnv::FnvHashSet;
use tracing::debug;

/// Watches elements for entry into the proximity region around the viewport.
#[derive(Debug)]
pub struct ProximityObserver {
    margin: Margin,
    threshold: f32,
    watched: FnvHashSet<ElementId>,
    notified: FnvHashSet<ElementId>,
}

impl ProximityObserver {
    /// - `margin`: pre-trigger expansion of the viewport, in pixels
    /// - `threshold`: minimum visible fraction of the element, `0.0..=1.0`
    pub fn new(margin: Margin, threshold: f32) -> Self {
        Self {
            margin,
            threshold,
            watched: FnvHashSet::default(),
            notified: FnvHashSet::default(),
        }
    }

    /// Start watching an element. Elements already notified once are not
    /// re-admitted.
    pub fn observe(&mut self, id: ElementId) {
        if !self.notified.contains(&id) {
            self.watched.insert(id);
        }
    }

    /// Stop watching an element without notifying it.
    pub fn unobserve(&mut self, id: ElementId) {
        self.watched.remove(&id);
    }

    pub fn is_observing(&self, id: ElementId) -> bool {
        self.watched.contains(&id)
    }

    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }

    /// Elements that have crossed the threshold, removed from the watch set
    /// as they are returned.
    ///
    /// Elements without a layout rect (or with zero area) never qualify.
    /// Results come back in id order for deterministic processing.
    pub fn take_intersecting(&mut self, doc: &Document) -> Vec<ElementId> {
        let region = doc.viewport().expanded(&self.margin);

        let mut ready: Vec<ElementId> = self
            .watched
            .iter()
            .copied()
            .filter(|id| {
                doc.element(*id)
                    .rect()
                    .map(|rect| intersection_ratio(&rect, &region) >= self.threshold)
                    .unwrap_or(false)
            })
            .collect();
        ready.sort_unstable();

        for id in &ready {
            self.watched.remove(id);
            self.notified.insert(*id);
            debug!(element = %id, "proximity trigger");
        }
        ready
    }
}
