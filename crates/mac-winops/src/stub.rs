//! `RealWinOps` for platforms without the Accessibility API.
//!
//! Every query reports nothing and every operation fails with
//! [`Error::Unsupported`], so the engine degrades to its error paths.

use std::process;

use crate::{
    error::{Error, Result},
    geom::{Point, Rect, Size},
    ops::{AppInfo, ScreenInfo, WinOps, WindowRef},
};

/// Placeholder backend used when not running on macOS.
#[derive(Debug, Default)]
pub struct RealWinOps;

impl RealWinOps {
    /// Create a backend. The argument is accepted for API parity.
    pub fn new(_open_settings_on_denied: bool) -> Self {
        Self
    }
}

impl WinOps for RealWinOps {
    fn accessibility_ok(&self) -> bool {
        permissions::accessibility_ok()
    }
    fn request_accessibility(&self) -> bool {
        permissions::request_accessibility()
    }
    fn own_pid(&self) -> i32 {
        process::id() as i32
    }
    fn frontmost_app(&self) -> Option<AppInfo> {
        None
    }
    fn regular_apps(&self) -> Vec<AppInfo> {
        Vec::new()
    }
    fn activate_app(&self, _pid: i32) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn focused_window(&self, _pid: i32) -> Result<WindowRef> {
        Err(Error::Unsupported)
    }
    fn main_window(&self, _pid: i32) -> Result<WindowRef> {
        Err(Error::Unsupported)
    }
    fn first_window(&self, _pid: i32) -> Result<WindowRef> {
        Err(Error::Unsupported)
    }
    fn window_frame(&self, _win: &WindowRef) -> Result<Rect> {
        Err(Error::Unsupported)
    }
    fn set_window_position(&self, _win: &WindowRef, _origin: Point) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn set_window_size(&self, _win: &WindowRef, _size: Size) -> Result<()> {
        Err(Error::Unsupported)
    }
    fn screens(&self) -> Vec<ScreenInfo> {
        Vec::new()
    }
}
