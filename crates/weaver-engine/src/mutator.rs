//! Apply a destination rectangle to a window.
//!
//! Position and size are written independently, in that order. A failed write
//! is logged and reported; the other write still happens and nothing is
//! rolled back.

use std::fmt::{Display, Formatter, Result as FmtResult};

use mac_winops::{Rect, WinOps, WindowRef};
use tracing::{trace, warn};

/// Outcome of one attribute write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    /// The OS accepted the write.
    Ok,
    /// The write failed with the given OS error.
    Failed(String),
}

impl WriteStatus {
    /// True for [`WriteStatus::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl Display for WriteStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Failed(e) => write!(f, "failed ({e})"),
        }
    }
}

/// Result of applying one rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    /// Window written to.
    pub target: WindowRef,
    /// Requested frame.
    pub rect: Rect,
    /// `AXPosition` write.
    pub position: WriteStatus,
    /// `AXSize` write.
    pub size: WriteStatus,
}

impl ApplyReport {
    /// Both writes succeeded.
    pub fn is_complete(&self) -> bool {
        self.position.is_ok() && self.size.is_ok()
    }

    /// Exactly one write succeeded.
    pub fn is_partial(&self) -> bool {
        self.position.is_ok() != self.size.is_ok()
    }
}

/// Write `rect` to `window`: position first, then size.
pub fn apply(ops: &dyn WinOps, window: &WindowRef, rect: Rect) -> ApplyReport {
    let position = match ops.set_window_position(window, rect.origin()) {
        Ok(()) => WriteStatus::Ok,
        Err(e) => {
            warn!(%window, attr = "AXPosition", "attribute write failed: {}", e);
            WriteStatus::Failed(e.to_string())
        }
    };
    let size = match ops.set_window_size(window, rect.size()) {
        Ok(()) => WriteStatus::Ok,
        Err(e) => {
            warn!(%window, attr = "AXSize", "attribute write failed: {}", e);
            WriteStatus::Failed(e.to_string())
        }
    };
    trace!(%window, %rect, %position, %size, "applied frame");
    ApplyReport {
        target: *window,
        rect,
        position,
        size,
    }
}
