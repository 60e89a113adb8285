//! Choose the display a window belongs to.

use config::BoundsMode;
use mac_winops::{Rect, ScreenInfo, WinOps};
use tracing::debug;

use crate::{Error, Result};

/// Layout bounds of `screen` under `mode`.
pub fn bounds_of(screen: &ScreenInfo, mode: BoundsMode) -> Rect {
    match mode {
        BoundsMode::Visible => screen.visible,
        BoundsMode::Full => screen.frame,
    }
}

/// Bounds of the first display in `screens` whose frame intersects `frame`.
///
/// With no frame, or when no display intersects it, the primary display
/// (`screens[0]`) is used. Intersection is tested against each display's full
/// frame; the returned rectangle follows `mode`.
pub fn locate_in(screens: &[ScreenInfo], frame: Option<&Rect>, mode: BoundsMode) -> Result<Rect> {
    let primary = screens.first().ok_or(Error::NoDisplay)?;
    let Some(frame) = frame else {
        debug!("no window frame; using primary display");
        return Ok(bounds_of(primary, mode));
    };
    match screens
        .iter()
        .enumerate()
        .find(|(_, s)| s.frame.intersects(frame))
    {
        Some((idx, screen)) => {
            debug!(display = idx, %frame, "window intersects display");
            Ok(bounds_of(screen, mode))
        }
        None => {
            debug!(%frame, "window on no display; using primary display");
            Ok(bounds_of(primary, mode))
        }
    }
}

/// Enumerate displays through `ops` and locate `frame` among them.
pub fn locate(ops: &dyn WinOps, frame: Option<&Rect>, mode: BoundsMode) -> Result<Rect> {
    locate_in(&ops.screens(), frame, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screens() -> Vec<ScreenInfo> {
        vec![
            ScreenInfo {
                frame: Rect::new(0.0, 0.0, 1920.0, 1080.0),
                visible: Rect::new(0.0, 25.0, 1920.0, 1055.0),
            },
            ScreenInfo::uniform(Rect::new(1920.0, 0.0, 2560.0, 1440.0)),
        ]
    }

    #[test]
    fn no_frame_uses_primary() {
        let b = locate_in(&screens(), None, BoundsMode::Visible).unwrap();
        assert_eq!(b, Rect::new(0.0, 25.0, 1920.0, 1055.0));
        let b = locate_in(&screens(), None, BoundsMode::Full).unwrap();
        assert_eq!(b, Rect::new(0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn first_intersecting_display_wins() {
        let straddling = Rect::new(1800.0, 100.0, 400.0, 300.0);
        let b = locate_in(&screens(), Some(&straddling), BoundsMode::Full).unwrap();
        assert_eq!(b, Rect::new(0.0, 0.0, 1920.0, 1080.0));
        let secondary = Rect::new(2500.0, 100.0, 400.0, 300.0);
        let b = locate_in(&screens(), Some(&secondary), BoundsMode::Full).unwrap();
        assert_eq!(b, Rect::new(1920.0, 0.0, 2560.0, 1440.0));
    }

    #[test]
    fn offscreen_frame_falls_back_to_primary() {
        let lost = Rect::new(-5000.0, -5000.0, 100.0, 100.0);
        let b = locate_in(&screens(), Some(&lost), BoundsMode::Full).unwrap();
        assert_eq!(b, Rect::new(0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn edge_touching_frame_is_not_on_display() {
        let touching = Rect::new(4480.0, 0.0, 100.0, 100.0);
        let b = locate_in(&screens(), Some(&touching), BoundsMode::Full).unwrap();
        assert_eq!(b, Rect::new(0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn no_displays_is_an_error() {
        assert_eq!(locate_in(&[], None, BoundsMode::Visible), Err(Error::NoDisplay));
    }
}
