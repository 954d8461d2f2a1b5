//! A single element in the document arena.

use super::style::InlineStyle;
use crate::viewport::Rect;
use std::fmt;

/// Index of an element within its [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An element node: tag, attributes, classes, inline style, layout rect.
///
/// The `class` and `style` attributes are held in parsed form; all other
/// attributes stay as raw name/value pairs in document order.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    style: InlineStyle,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) rect: Option<Rect>,
}

impl Element {
    pub(crate) fn new(id: ElementId, tag: &str) -> Self {
        Self {
            id,
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            classes: Vec::new(),
            style: InlineStyle::default(),
            parent: None,
            children: Vec::new(),
            rect: None,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Value of an attribute, `None` when absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set or replace an attribute.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(attr) = self.attributes.iter_mut().find(|(attr, _)| *attr == name) {
            attr.1 = value.to_string();
        } else {
            self.attributes.push((name, value.to_string()));
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class; duplicates are ignored.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class; absent classes are a no-op.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn style(&self) -> &InlineStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut InlineStyle {
        &mut self.style
    }

    pub(crate) fn set_style(&mut self, style: InlineStyle) {
        self.style = style;
    }

    pub(crate) fn add_raw_class_list(&mut self, value: &str) {
        for class in value.split_whitespace() {
            self.add_class(class);
        }
    }

    /// Layout rectangle, `None` until a layout pass or the embedder assigns
    /// one.
    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// Numeric pixel value of a presentational attribute like `width` or
    /// `height`. Accepts a trailing `px`.
    pub fn pixel_attr(&self, name: &str) -> Option<f32> {
        let raw = self.attr(name)?.trim();
        let raw = raw.strip_suffix("px").unwrap_or(raw).trim();
        raw.parse::<f32>().ok().filter(|v| *v >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str) -> Element {
        Element::new(ElementId(0), tag)
    }

    #[test]
    fn test_attr_set_and_get() {
        let mut el = element("img");
        assert_eq!(el.attr("src"), None);
        el.set_attr("src", "a.png");
        assert_eq!(el.attr("src"), Some("a.png"));
        el.set_attr("src", "b.png");
        assert_eq!(el.attr("src"), Some("b.png"));
    }

    #[test]
    fn test_class_list_no_duplicates() {
        let mut el = element("div");
        el.add_class("loaded");
        el.add_class("loaded");
        assert_eq!(el.classes().len(), 1);
        el.remove_class("loaded");
        assert!(!el.has_class("loaded"));
        el.remove_class("loaded");
    }

    #[test]
    fn test_pixel_attr_parsing() {
        let mut el = element("img");
        el.set_attr("height", "240");
        assert_eq!(el.pixel_attr("height"), Some(240.0));
        el.set_attr("height", "240px");
        assert_eq!(el.pixel_attr("height"), Some(240.0));
        el.set_attr("height", "tall");
        assert_eq!(el.pixel_attr("height"), None);
        el.set_attr("height", "-5");
        assert_eq!(el.pixel_attr("height"), None);
    }

    #[test]
    fn test_tag_is_lowercased() {
        let el = element("IMG");
        assert_eq!(el.tag(), "img");
    }
}
