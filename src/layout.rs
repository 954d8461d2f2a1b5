//! Synthetic flow layout.
//!
//! The runtime has no rendering engine, so proximity checks need a stand-in
//! for real geometry: leaf elements are stacked vertically in document
//! order, honoring `width`/`height` attributes, and containers cover their
//! children. Embedders with real layout data can skip this pass and assign
//! rects through [`Document::set_rect`] instead; running the pass overwrites
//! previously assigned rects.

use crate::dom::{Document, ElementId};
use crate::viewport::Rect;
use tracing::debug;

/// Height given to leaf elements that declare no `height` attribute.
pub const DEFAULT_BLOCK_HEIGHT: f32 = 40.0;

/// Tags that occupy no layout space.
const NON_RENDERED_TAGS: &[&str] = &[
    "head", "script", "style", "link", "meta", "title", "noscript", "template",
];

/// Run the flow layout over the whole document.
pub fn flow_layout(doc: &mut Document) {
    let viewport_width = doc.viewport().width;
    let root = doc.root();
    let mut cursor = 0.0_f32;
    layout_element(doc, root, &mut cursor, viewport_width);
    debug!(page_height = cursor, "flow layout complete");
}

fn layout_element(
    doc: &mut Document,
    id: ElementId,
    cursor: &mut f32,
    viewport_width: f32,
) -> Option<Rect> {
    if NON_RENDERED_TAGS.contains(&doc.element(id).tag()) {
        return None;
    }

    let children: Vec<ElementId> = doc.element(id).children().to_vec();

    if children.is_empty() {
        let element = doc.element(id);
        let width = element.pixel_attr("width").unwrap_or(viewport_width);
        let height = element.pixel_attr("height").unwrap_or(DEFAULT_BLOCK_HEIGHT);
        let rect = Rect::new(0.0, *cursor, width, height);
        *cursor += height;
        doc.set_rect(id, rect);
        return Some(rect);
    }

    let mut covered: Option<Rect> = None;
    for child in children {
        if let Some(child_rect) = layout_element(doc, child, cursor, viewport_width) {
            covered = Some(match covered {
                Some(rect) => rect.union(&child_rect),
                None => child_rect,
            });
        }
    }

    // A container whose children are all non-rendered collapses to an empty
    // strip at the current cursor.
    let rect = covered.unwrap_or_else(|| Rect::new(0.0, *cursor, viewport_width, 0.0));
    doc.set_rect(id, rect);
    Some(rect)
}
