//! Geometry primitives shared by the OS layer and the layout engine.
//!
//! All rectangles use the Accessibility global coordinate space: origin at the
//! top-left corner of the primary display, `y` growing downward. `Point` and
//! `Size` mirror CoreGraphics `CGPoint`/`CGSize` (f64 fields) for AXValue
//! interop.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A point (`CGPoint` layout).
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A size (`CGSize` layout).
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// `|a - b| <= eps`.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Axis-aligned rectangle: origin plus width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.w
    }
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.h
    }
    #[inline]
    pub fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
    #[inline]
    pub fn size(&self) -> Size {
        Size {
            width: self.w,
            height: self.h,
        }
    }

    /// True when width or height is not a positive finite number.
    pub fn is_empty(&self) -> bool {
        !(self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0)
    }

    /// Strict intersection: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// True when `inner` lies within `self`, allowing `eps` of slack per edge.
    pub fn contains_rect(&self, inner: &Self, eps: f64) -> bool {
        inner.min_x() >= self.min_x() - eps
            && inner.min_y() >= self.min_y() - eps
            && inner.max_x() <= self.max_x() + eps
            && inner.max_y() <= self.max_y() + eps
    }
}

impl From<(Point, Size)> for Rect {
    fn from(v: (Point, Size)) -> Self {
        let (p, s) = v;
        Self {
            x: p.x,
            y: p.y,
            w: s.width,
            h: s.height,
        }
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "({:.1},{:.1} {:.1}x{:.1})",
            self.x, self.y, self.w, self.h
        )
    }
}
