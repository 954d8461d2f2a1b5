//! Viewport and rectangle geometry.
//!
//! The proximity observer works in page coordinates: every laid-out element
//! has a [`Rect`], and the [`Viewport`] describes the currently visible
//! window into the page. Expanding the viewport by a [`Margin`] gives the
//! pre-trigger region used for lazy loading.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in square pixels.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Area of the overlap with `other`, zero when disjoint.
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let left = self.x.max(other.x);
        let right = (self.x + self.width).min(other.x + other.width);
        let top = self.y.max(other.y);
        let bottom = (self.y + self.height).min(other.y + other.height);

        let w = (right - left).max(0.0);
        let h = (bottom - top).max(0.0);
        w * h
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// Per-edge pixel expansion applied to the viewport before intersection
/// checks (the CSS `rootMargin` equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    /// Symmetric vertical margin with no horizontal expansion, the
    /// `"<px> 0px"` shorthand.
    pub fn vertical(px: f32) -> Self {
        Self {
            top: px,
            right: 0.0,
            bottom: px,
            left: 0.0,
        }
    }
}

/// The visible window into the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

impl Viewport {
    /// Viewport at the top of the page.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Currently visible rectangle in page coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.scroll_x, self.scroll_y, self.width, self.height)
    }

    /// Visible rectangle grown by `margin` on each edge.
    pub fn expanded(&self, margin: &Margin) -> Rect {
        Rect::new(
            self.scroll_x - margin.left,
            self.scroll_y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }

    pub fn scroll_to(&mut self, x: f32, y: f32) {
        self.scroll_x = x;
        self.scroll_y = y;
    }
}

/// Fraction of `target` covered by `container`, in `0.0..=1.0`.
///
/// A degenerate (zero-area) target has ratio zero: an element that occupies
/// no space can never become visible.
pub fn intersection_ratio(target: &Rect, container: &Rect) -> f32 {
    let area = target.area();
    if area <= 0.0 {
        return 0.0;
    }
    target.intersection_area(container) / area
}
