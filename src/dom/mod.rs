//! Mutable document model.
//!
//! Elements live in a flat arena indexed by [`ElementId`], parsed out of an
//! HTML string. The model keeps exactly what the enhancement tasks touch:
//! tags, attributes, class lists, inline styles, tree structure, layout
//! rects, and the document-level ready state and viewport.

mod element;
mod parse;
pub mod style;

pub use element::{Element, ElementId};
pub use style::{first_background_url, InlineStyle};

use crate::viewport::{Rect, Viewport};
use url::Url;

/// Document parse/load progress, the `document.readyState` equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Still parsing; deferred work waits for the DOM-ready event.
    Loading,
    /// DOM parsed, sub-resources may still be loading.
    Interactive,
    /// Everything loaded.
    Complete,
}

/// A parsed page: element arena plus document-level state.
#[derive(Debug)]
pub struct Document {
    pub(crate) elements: Vec<Element>,
    root: ElementId,
    head: Option<ElementId>,
    body: Option<ElementId>,
    base_url: Option<Url>,
    ready_state: ReadyState,
    viewport: Viewport,
}

impl Document {
    pub(crate) fn from_parts(
        elements: Vec<Element>,
        root: ElementId,
        head: Option<ElementId>,
        body: Option<ElementId>,
    ) -> Self {
        Self {
            elements,
            root,
            head,
            body,
            base_url: None,
            ready_state: ReadyState::Loading,
            viewport: Viewport::default(),
        }
    }

    /// Root (`html`) element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn head(&self) -> Option<ElementId> {
        self.head
    }

    pub fn body(&self) -> Option<ElementId> {
        self.body
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.index()]
    }

    /// All element ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().map(|el| el.id())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Create a detached element. It joins the tree via
    /// [`append_child`](Self::append_child) or
    /// [`append_to_head`](Self::append_to_head).
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element::new(id, tag));
        id
    }

    /// Attach `child` under `parent`.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.elements[child.index()].parent = Some(parent);
        self.elements[parent.index()].children.push(child);
    }

    /// Attach `child` under `head`. Returns `false` (leaving the element
    /// detached) when the document has no head.
    pub fn append_to_head(&mut self, child: ElementId) -> bool {
        match self.head {
            Some(head) => {
                self.append_child(head, child);
                true
            }
            None => false,
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        self.ready_state = state;
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn set_base_url(&mut self, url: Url) {
        self.base_url = Some(url);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Scroll the viewport to an absolute page offset.
    pub fn scroll_to(&mut self, x: f32, y: f32) {
        self.viewport.scroll_to(x, y);
    }

    /// Assign a layout rect directly, bypassing the flow layout.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        self.elements[id.index()].rect = Some(rect);
    }

    /// Images opted into deferred loading (`img[loading="lazy"]`).
    pub fn lazy_images(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|el| el.tag() == "img" && el.attr("loading") == Some("lazy"))
            .map(|el| el.id())
            .collect()
    }

    /// Elements whose inline style mentions a background image.
    ///
    /// Matches on the serialized style text, the `[style*="background-image"]`
    /// selector equivalent; URL extraction happens later and may still skip
    /// an entry.
    pub fn background_image_candidates(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|el| !el.style().is_empty() && el.style().to_css().contains("background-image"))
            .map(|el| el.id())
            .collect()
    }

    /// First element carrying `class`, in document order.
    pub fn first_by_class(&self, class: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|el| el.has_class(class))
            .map(|el| el.id())
    }
}
