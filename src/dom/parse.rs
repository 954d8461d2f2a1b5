//! HTML parsing into the element arena.
//!
//! Parsing is lenient: `scraper` (html5ever underneath) synthesizes the
//! `html`/`head`/`body` scaffolding for fragments, so a [`Document`] always
//! has a root element.

use super::element::{Element, ElementId};
use super::style::InlineStyle;
use super::Document;
use scraper::{ElementRef, Html};
use tracing::debug;

impl Document {
    /// Parse an HTML string into a document.
    ///
    /// Text and comment nodes are discarded; only element structure is kept.
    /// The document starts in [`ReadyState::Loading`](super::ReadyState).
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut elements = Vec::new();
        let mut head = None;
        let mut body = None;
        let root = build_element(
            &mut elements,
            &mut head,
            &mut body,
            parsed.root_element(),
            None,
        );
        debug!(elements = elements.len(), "parsed document");
        Document::from_parts(elements, root, head, body)
    }
}

fn build_element(
    elements: &mut Vec<Element>,
    head: &mut Option<ElementId>,
    body: &mut Option<ElementId>,
    node: ElementRef<'_>,
    parent: Option<ElementId>,
) -> ElementId {
    let id = ElementId(elements.len() as u32);
    let value = node.value();
    let mut element = Element::new(id, value.name());
    element.parent = parent;

    for (name, attr_value) in value.attrs() {
        match name {
            "class" => element.add_raw_class_list(attr_value),
            "style" => element.set_style(InlineStyle::parse(attr_value)),
            _ => element.set_attr(name, attr_value),
        }
    }

    match element.tag() {
        "head" if head.is_none() => *head = Some(id),
        "body" if body.is_none() => *body = Some(id),
        _ => {}
    }

    elements.push(element);

    for child in node.children() {
        if let Some(child_ref) = ElementRef::wrap(child) {
            let child_id = build_element(elements, head, body, child_ref, Some(id));
            elements[id.index()].children.push(child_id);
        }
    }

    id
}
