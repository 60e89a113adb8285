//! Destination rectangles for layout commands.
//!
//! Every formula works in the bounds' own coordinate space: `x` grows right
//! and `y` grows down from the bounds origin. Results are always contained in
//! the bounds and have positive size, up to floating-point rounding.

use config::{Corner, DEFAULT_CENTER_SCALE, Generic, Half, LayoutCommand, Third, TwoThirds, Vertical};
use mac_winops::Rect;

use crate::{Error, Result};

/// Layout calculator with an overridable center scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    center_scale: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            center_scale: DEFAULT_CENTER_SCALE,
        }
    }
}

impl Geometry {
    /// Create a calculator. Scales outside `(0, 1]` are clamped; non-finite
    /// or non-positive scales fall back to the default.
    pub fn new(center_scale: f64) -> Self {
        let center_scale = if center_scale.is_finite() && center_scale > 0.0 {
            center_scale.min(1.0)
        } else {
            DEFAULT_CENTER_SCALE
        };
        Self { center_scale }
    }

    /// Scale used by `Generic::Center`.
    pub fn center_scale(&self) -> f64 {
        self.center_scale
    }

    /// Compute the destination rectangle for `command` within `bounds`.
    pub fn compute(&self, bounds: &Rect, command: LayoutCommand) -> Result<Rect> {
        if bounds.is_empty() || !bounds.x.is_finite() || !bounds.y.is_finite() {
            return Err(Error::EmptyBounds);
        }
        let (x, y, w, h) = (bounds.x, bounds.y, bounds.w, bounds.h);
        let rect = match command {
            LayoutCommand::Third(t) => {
                let col = match t {
                    Third::Left => 0.0,
                    Third::Center => 1.0,
                    Third::Right => 2.0,
                };
                Rect::new(x + col * w / 3.0, y, w / 3.0, h)
            }
            LayoutCommand::TwoThirds(t) => {
                let left = match t {
                    TwoThirds::Left => x,
                    TwoThirds::Right => x + w / 3.0,
                };
                Rect::new(left, y, 2.0 * w / 3.0, h)
            }
            LayoutCommand::Half(Half::Left) => Rect::new(x, y, w / 2.0, h),
            LayoutCommand::Half(Half::Right) => Rect::new(x + w / 2.0, y, w / 2.0, h),
            LayoutCommand::Vertical(Vertical::Top) => Rect::new(x, y, w, h / 2.0),
            LayoutCommand::Vertical(Vertical::Bottom) => Rect::new(x, y + h / 2.0, w, h / 2.0),
            LayoutCommand::Corner(c) => {
                let (cw, ch) = (w / 2.0, h / 2.0);
                let cx = match c {
                    Corner::TopLeft | Corner::BottomLeft => x,
                    Corner::TopRight | Corner::BottomRight => bounds.max_x() - cw,
                };
                let cy = match c {
                    Corner::TopLeft | Corner::TopRight => y,
                    Corner::BottomLeft | Corner::BottomRight => y + ch,
                };
                Rect::new(cx, cy, cw, ch)
            }
            LayoutCommand::Generic(Generic::Center) => {
                let (cw, ch) = (w * self.center_scale, h * self.center_scale);
                Rect::new(x + (w - cw) / 2.0, y + (h - ch) / 2.0, cw, ch)
            }
            LayoutCommand::Generic(Generic::FullScreen) => *bounds,
        };
        Ok(rect)
    }
}

/// Compute with the default center scale.
pub fn compute(bounds: &Rect, command: LayoutCommand) -> Result<Rect> {
    Geometry::default().compute(bounds, command)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HD: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    #[test]
    fn thirds_on_1080p() {
        let c = |t| compute(&HD, LayoutCommand::Third(t)).unwrap();
        assert_eq!(c(Third::Left), Rect::new(0.0, 0.0, 640.0, 1080.0));
        assert_eq!(c(Third::Center), Rect::new(640.0, 0.0, 640.0, 1080.0));
        assert_eq!(c(Third::Right), Rect::new(1280.0, 0.0, 640.0, 1080.0));
    }

    #[test]
    fn corners_on_1080p() {
        let c = |k| compute(&HD, LayoutCommand::Corner(k)).unwrap();
        assert_eq!(c(Corner::TopLeft), Rect::new(0.0, 0.0, 960.0, 540.0));
        assert_eq!(c(Corner::TopRight), Rect::new(960.0, 0.0, 960.0, 540.0));
        assert_eq!(c(Corner::BottomLeft), Rect::new(0.0, 540.0, 960.0, 540.0));
        assert_eq!(c(Corner::BottomRight), Rect::new(960.0, 540.0, 960.0, 540.0));
    }

    #[test]
    fn offset_bounds_shift_results() {
        let b = Rect::new(-1440.0, 25.0, 1440.0, 875.0);
        let r = compute(&b, LayoutCommand::TwoThirds(TwoThirds::Right)).unwrap();
        assert_eq!(r, Rect::new(-960.0, 25.0, 960.0, 875.0));
        let r = compute(&b, LayoutCommand::Vertical(Vertical::Bottom)).unwrap();
        assert_eq!(r, Rect::new(-1440.0, 462.5, 1440.0, 437.5));
    }

    #[test]
    fn center_uses_configured_scale() {
        let r = compute(&HD, LayoutCommand::Generic(Generic::Center)).unwrap();
        assert_eq!(r, Rect::new(384.0, 216.0, 1152.0, 648.0));
        let g = Geometry::new(0.5);
        let r = g.compute(&HD, LayoutCommand::Generic(Generic::Center)).unwrap();
        assert_eq!(r, Rect::new(480.0, 270.0, 960.0, 540.0));
    }

    #[test]
    fn scale_is_clamped() {
        assert_eq!(Geometry::new(3.0).center_scale(), 1.0);
        assert_eq!(Geometry::new(0.0).center_scale(), DEFAULT_CENTER_SCALE);
        assert_eq!(Geometry::new(f64::NAN).center_scale(), DEFAULT_CENTER_SCALE);
    }

    #[test]
    fn empty_bounds_fail_fast() {
        for b in [
            Rect::new(0.0, 0.0, 0.0, 100.0),
            Rect::new(0.0, 0.0, 100.0, -5.0),
            Rect::new(f64::NAN, 0.0, 100.0, 100.0),
        ] {
            assert_eq!(
                compute(&b, LayoutCommand::Generic(Generic::FullScreen)),
                Err(Error::EmptyBounds)
            );
        }
    }
}
