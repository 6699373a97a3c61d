use serde::{Deserialize, Serialize};

/// A pointer position in viewport coordinates (CSS pixels, origin at the
/// top-left corner of the visible area).
///
/// Every point handled by the selection controller lives in this frame.
/// Translation into document coordinates happens once, at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How far the page is scrolled when a selection is taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with non-negative extent.
///
/// Only constructed through [`Rectangle::from_corners`] or
/// [`Rectangle::new`], both of which normalize the extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// Build a rectangle from an origin and a (possibly negative) extent
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_corners(Point::new(x, y), Point::new(x + width, y + height))
    }

    /// Derive the rectangle spanned by two corners, in either drag direction
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the rectangle covers no pixels (or is not a number)
    pub fn is_degenerate(&self) -> bool {
        !(self.area() > 0.0)
    }

    /// Move a viewport rectangle into document coordinates
    pub fn to_document(&self, scroll: ScrollOffset) -> Self {
        Self {
            x: self.x + scroll.x,
            y: self.y + scroll.y,
            ..*self
        }
    }

    /// Integer pixel bounds of this rectangle inside a `width` x `height`
    /// surface, as `(x, y, width, height)`.
    ///
    /// Fractional edges are widened outward so the whole selection is kept.
    /// Returns `None` when nothing of the rectangle lies on the surface.
    pub fn clamp_to_surface(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let left = self.x.floor().max(0.0);
        let top = self.y.floor().max(0.0);
        let right = self.right().ceil().min(width as f64);
        let bottom = self.bottom().ceil().min(height as f64);

        if !(right > left && bottom > top) {
            return None;
        }

        Some((
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}
