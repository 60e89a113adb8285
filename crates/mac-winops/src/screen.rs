//! Display enumeration.
//!
//! AppKit reports screen frames with a bottom-left origin on the primary
//! display. The engine works in Accessibility coordinates (top-left origin,
//! y down), so every frame is flipped against the primary display's height.

use objc2_app_kit::NSScreen;
use objc2_foundation::{MainThreadMarker, NSRect};
use tracing::trace;

use crate::{
    error::{Error, Result},
    geom::Rect,
    ops::ScreenInfo,
};

/// Convert an AppKit rect into Accessibility global coordinates.
pub(crate) fn flip(r: NSRect, primary_height: f64) -> Rect {
    Rect::new(
        r.origin.x,
        primary_height - (r.origin.y + r.size.height),
        r.size.width,
        r.size.height,
    )
}

/// Enumerate displays in AppKit order; the first entry is the primary display.
///
/// Requires the AppKit main thread.
pub(crate) fn screens() -> Result<Vec<ScreenInfo>> {
    let mtm = MainThreadMarker::new().ok_or(Error::MainThread)?;
    let screens = NSScreen::screens(mtm);
    let Some(primary) = screens.iter().next() else {
        return Ok(Vec::new());
    };
    let primary_height = primary.frame().size.height;
    let out: Vec<ScreenInfo> = screens
        .iter()
        .map(|s| ScreenInfo {
            frame: flip(s.frame(), primary_height),
            visible: flip(s.visibleFrame(), primary_height),
        })
        .collect();
    trace!(count = out.len(), "screens enumerated");
    Ok(out)
}
