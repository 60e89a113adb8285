//! The OS boundary used by the layout engine.
//!
//! [`WinOps`] groups every query and mutation the engine performs against the
//! windowing system: the Accessibility trust gate, process enumeration and
//! activation, window lookup, frame reads, the two attribute writes, and
//! display enumeration. [`RealWinOps`](crate::RealWinOps) talks to macOS;
//! [`MockWinOps`](crate::MockWinOps) backs tests.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    Result,
    geom::{Point, Rect, Size},
};

/// A running application as seen by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    /// Process identifier.
    pub pid: i32,
    /// Localized application name (may be empty).
    pub name: String,
    /// Bundle identifier, when the process has one.
    pub bundle_id: Option<String>,
}

impl Display for AppInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.name.is_empty() {
            write!(f, "pid {}", self.pid)
        } else {
            write!(f, "{} (pid {})", self.name, self.pid)
        }
    }
}

/// Opaque handle to one OS window owned by one process.
///
/// Handles are cheap to copy. The window itself is owned by the OS; a handle
/// can go stale when the window closes, in which case operations on it fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowRef {
    /// Owning process.
    pub pid: i32,
    /// Backend-assigned identifier, unique within one `WinOps` instance.
    pub id: u64,
}

impl Display for WindowRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "win#{}@pid{}", self.id, self.pid)
    }
}

/// One physical display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenInfo {
    /// Full display frame.
    pub frame: Rect,
    /// Work area: the frame minus menu bar and Dock.
    pub visible: Rect,
}

impl ScreenInfo {
    /// A display whose work area equals its frame.
    pub const fn uniform(frame: Rect) -> Self {
        Self {
            frame,
            visible: frame,
        }
    }
}

/// Trait abstraction over window operations to improve testability.
///
/// Implementations must keep `screens()` order stable for the life of the
/// process, with the primary display first.
pub trait WinOps: Send + Sync {
    /// Whether the process is trusted for Accessibility control.
    fn accessibility_ok(&self) -> bool;
    /// Ask the OS to prompt for Accessibility trust; returns current trust.
    fn request_accessibility(&self) -> bool;
    /// Pid of this process.
    fn own_pid(&self) -> i32;
    /// The application that currently has keyboard focus.
    fn frontmost_app(&self) -> Option<AppInfo>;
    /// Regular (non-background) running applications, in OS order.
    fn regular_apps(&self) -> Vec<AppInfo>;
    /// Bring the application forward, ignoring other apps.
    fn activate_app(&self, pid: i32) -> Result<()>;
    /// The application's focused window (`AXFocusedWindow`).
    fn focused_window(&self, pid: i32) -> Result<WindowRef>;
    /// The application's main window (`AXMainWindow`).
    fn main_window(&self, pid: i32) -> Result<WindowRef>;
    /// The first entry of the application's window list (`AXWindows`).
    fn first_window(&self, pid: i32) -> Result<WindowRef>;
    /// Current frame of a window.
    fn window_frame(&self, win: &WindowRef) -> Result<Rect>;
    /// Write the window's `AXPosition` attribute.
    fn set_window_position(&self, win: &WindowRef, origin: Point) -> Result<()>;
    /// Write the window's `AXSize` attribute.
    fn set_window_size(&self, win: &WindowRef, size: Size) -> Result<()>;
    /// Enumerate displays, primary first.
    fn screens(&self) -> Vec<ScreenInfo>;
}
