//! Production `WinOps` backed by the Accessibility API and AppKit.

use std::{ffi::c_void, num::NonZeroUsize, process};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{
    app,
    ax::{self, AXElem, ATTR_FOCUSED_WINDOW, ATTR_MAIN_WINDOW, ATTR_POSITION, ATTR_SIZE},
    error::{Error, Result},
    geom::{Point, Rect, Size},
    handles::HandleRegistry,
    ops::{AppInfo, ScreenInfo, WinOps, WindowRef},
    screen,
};

/// Number of window handles kept alive. The engine tracks one window at a
/// time, so older handles only matter for in-flight operations.
const HANDLE_CAP: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Production implementation of `WinOps`.
///
/// Resolved AX window elements are retained in a small LRU registry and handed
/// out as [`WindowRef`]s. Resolving the same window again yields the same id.
pub struct RealWinOps {
    /// Retained AX elements keyed by `WindowRef::id`.
    handles: Mutex<HandleRegistry<AXElem>>,
    /// Also open System Settings when prompting for trust.
    open_settings_on_denied: bool,
}

impl Default for RealWinOps {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RealWinOps {
    /// Create a backend. `open_settings_on_denied` adds a System Settings
    /// redirect to the trust prompt.
    pub fn new(open_settings_on_denied: bool) -> Self {
        Self {
            handles: Mutex::new(HandleRegistry::new(HANDLE_CAP)),
            open_settings_on_denied,
        }
    }

    fn register(&self, pid: i32, elem: AXElem) -> WindowRef {
        self.handles.lock().intern(pid, elem, AXElem::same_element)
    }

    fn with_elem<T>(
        &self,
        win: &WindowRef,
        f: impl FnOnce(*mut c_void) -> Result<T>,
    ) -> Result<T> {
        let mut handles = self.handles.lock();
        let elem = handles.get(win).ok_or(Error::StaleHandle(win.id))?;
        f(elem.as_ptr())
    }

    fn resolve(&self, pid: i32, attr: &'static str) -> Result<WindowRef> {
        ax::ax_check()?;
        let app = ax::app_element(pid)?;
        let win = ax::copy_element(&app, attr)?;
        Ok(self.register(pid, win))
    }
}

impl WinOps for RealWinOps {
    fn accessibility_ok(&self) -> bool {
        permissions::accessibility_ok()
    }

    fn request_accessibility(&self) -> bool {
        let ok = permissions::request_accessibility();
        if !ok && self.open_settings_on_denied {
            permissions::open_accessibility_settings();
        }
        ok
    }

    fn own_pid(&self) -> i32 {
        process::id() as i32
    }

    fn frontmost_app(&self) -> Option<AppInfo> {
        app::frontmost_app()
    }

    fn regular_apps(&self) -> Vec<AppInfo> {
        app::regular_apps()
    }

    fn activate_app(&self, pid: i32) -> Result<()> {
        app::activate_pid(pid)
    }

    fn focused_window(&self, pid: i32) -> Result<WindowRef> {
        self.resolve(pid, ATTR_FOCUSED_WINDOW)
    }

    fn main_window(&self, pid: i32) -> Result<WindowRef> {
        self.resolve(pid, ATTR_MAIN_WINDOW)
    }

    fn first_window(&self, pid: i32) -> Result<WindowRef> {
        ax::ax_check()?;
        let app = ax::app_element(pid)?;
        let win = ax::first_of_windows(&app)?;
        Ok(self.register(pid, win))
    }

    fn window_frame(&self, win: &WindowRef) -> Result<Rect> {
        self.with_elem(win, |w| {
            let p = ax::get_point(w, ATTR_POSITION)?;
            let s = ax::get_size(w, ATTR_SIZE)?;
            Ok(Rect::from((p, s)))
        })
    }

    fn set_window_position(&self, win: &WindowRef, origin: Point) -> Result<()> {
        self.with_elem(win, |w| ax::set_point(w, ATTR_POSITION, origin))
    }

    fn set_window_size(&self, win: &WindowRef, size: Size) -> Result<()> {
        self.with_elem(win, |w| ax::set_size(w, ATTR_SIZE, size))
    }

    fn screens(&self) -> Vec<ScreenInfo> {
        match screen::screens() {
            Ok(s) => s,
            Err(e) => {
                warn!("screen enumeration failed: {}", e);
                Vec::new()
            }
        }
    }
}

impl Drop for RealWinOps {
    fn drop(&mut self) {
        debug!("releasing {} window handles", self.handles.lock().len());
    }
}
