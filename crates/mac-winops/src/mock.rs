//! In-memory `WinOps` for tests (enabled with the `test-utils` feature).
//!
//! The mock models a tiny desktop: a set of regular apps, the frontmost pid,
//! per-app focused/main/listed windows with frames, and a display list. Every
//! trait call is recorded as a short string (`"activate:42"`,
//! `"set_position:3"`, ...) so tests can assert on the exact OS traffic, and
//! each operation can be made to fail.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use parking_lot::Mutex;

use crate::{
    error::{Error, Result},
    geom::{Point, Rect, Size},
    ops::{AppInfo, ScreenInfo, WinOps, WindowRef},
};

/// AX "cannot complete" code returned by injected write failures.
pub const MOCK_WRITE_FAILURE: i32 = -25204;

/// Window slots of one mock application.
#[derive(Debug, Clone, Default)]
struct MockApp {
    focused: Option<u64>,
    main: Option<u64>,
    list: Vec<u64>,
}

#[derive(Debug, Default)]
struct MockState {
    own_pid: i32,
    frontmost: Option<i32>,
    apps: Vec<AppInfo>,
    windows: HashMap<i32, MockApp>,
    frames: HashMap<u64, Rect>,
    screens: Vec<ScreenInfo>,
    next_id: u64,
}

/// Simple mock implementation for tests.
#[derive(Clone)]
pub struct MockWinOps {
    state: Arc<Mutex<MockState>>,
    calls: Arc<Mutex<Vec<String>>>,
    trusted: Arc<AtomicBool>,
    activation_focuses: Arc<AtomicBool>,
    fail_activate: Arc<AtomicBool>,
    fail_frame: Arc<AtomicBool>,
    fail_position: Arc<AtomicBool>,
    fail_size: Arc<AtomicBool>,
}

impl Default for MockWinOps {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWinOps {
    /// A trusted desktop with no apps, no displays, and own pid 1.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                own_pid: 1,
                next_id: 1,
                ..MockState::default()
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
            trusted: Arc::new(AtomicBool::new(true)),
            activation_focuses: Arc::new(AtomicBool::new(true)),
            fail_activate: Arc::new(AtomicBool::new(false)),
            fail_frame: Arc::new(AtomicBool::new(false)),
            fail_position: Arc::new(AtomicBool::new(false)),
            fail_size: Arc::new(AtomicBool::new(false)),
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    /// Set whether Accessibility trust is granted.
    pub fn set_trusted(&self, v: bool) {
        self.trusted.store(v, Ordering::SeqCst);
    }
    /// Set the pid reported as this process.
    pub fn set_own_pid(&self, pid: i32) {
        self.state.lock().own_pid = pid;
    }
    /// Register a regular application.
    pub fn add_app(&self, pid: i32, name: &str) {
        let mut st = self.state.lock();
        st.apps.push(AppInfo {
            pid,
            name: name.to_string(),
            bundle_id: Some(format!("com.example.{}", name.to_ascii_lowercase())),
        });
        st.windows.entry(pid).or_default();
    }
    /// Set the frontmost pid (`None` for no frontmost app).
    pub fn set_frontmost(&self, pid: Option<i32>) {
        self.state.lock().frontmost = pid;
    }
    /// Whether `activate_app` makes the app frontmost (default `true`).
    pub fn set_activation_focuses(&self, v: bool) {
        self.activation_focuses.store(v, Ordering::SeqCst);
    }
    /// Add a window to `pid`'s window list. The first window added to an app
    /// also becomes its focused and main window.
    pub fn add_window(&self, pid: i32, frame: Rect) -> WindowRef {
        let mut st = self.state.lock();
        let id = st.next_id;
        st.next_id += 1;
        st.frames.insert(id, frame);
        let app = st.windows.entry(pid).or_default();
        if app.list.is_empty() {
            app.focused = Some(id);
            app.main = Some(id);
        }
        app.list.push(id);
        WindowRef { pid, id }
    }
    /// Override `pid`'s focused window.
    pub fn set_focused(&self, pid: i32, win: Option<WindowRef>) {
        self.state.lock().windows.entry(pid).or_default().focused = win.map(|w| w.id);
    }
    /// Override `pid`'s main window.
    pub fn set_main(&self, pid: i32, win: Option<WindowRef>) {
        self.state.lock().windows.entry(pid).or_default().main = win.map(|w| w.id);
    }
    /// Remove every window of `pid` from its list, focused and main slots.
    pub fn clear_windows(&self, pid: i32) {
        self.state.lock().windows.insert(pid, MockApp::default());
    }
    /// Replace the display list.
    pub fn set_screens(&self, screens: Vec<ScreenInfo>) {
        self.state.lock().screens = screens;
    }
    /// Current frame of a mock window.
    pub fn frame_of(&self, win: &WindowRef) -> Option<Rect> {
        self.state.lock().frames.get(&win.id).copied()
    }
    /// Fail `activate_app`.
    pub fn set_fail_activate(&self, v: bool) {
        self.fail_activate.store(v, Ordering::SeqCst);
    }
    /// Fail `window_frame`.
    pub fn set_fail_frame(&self, v: bool) {
        self.fail_frame.store(v, Ordering::SeqCst);
    }
    /// Fail `set_window_position`.
    pub fn set_fail_position(&self, v: bool) {
        self.fail_position.store(v, Ordering::SeqCst);
    }
    /// Fail `set_window_size`.
    pub fn set_fail_size(&self, v: bool) {
        self.fail_size.store(v, Ordering::SeqCst);
    }
    /// Snapshot of recorded calls.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
    /// True if exactly `s` was recorded.
    pub fn calls_contains(&self, s: &str) -> bool {
        self.calls.lock().iter().any(|x| x == s)
    }
    /// Number of recorded calls starting with `prefix`.
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.lock().iter().filter(|x| x.starts_with(prefix)).count()
    }
    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn slot(&self, pid: i32, pick: impl FnOnce(&MockApp) -> Option<u64>) -> Result<WindowRef> {
        let st = self.state.lock();
        let app = st.windows.get(&pid).ok_or(Error::AppElement)?;
        pick(app)
            .map(|id| WindowRef { pid, id })
            .ok_or(Error::NoWindow)
    }
}

impl WinOps for MockWinOps {
    fn accessibility_ok(&self) -> bool {
        self.record("accessibility_ok");
        self.trusted.load(Ordering::SeqCst)
    }
    fn request_accessibility(&self) -> bool {
        self.record("request_accessibility");
        self.trusted.load(Ordering::SeqCst)
    }
    fn own_pid(&self) -> i32 {
        self.state.lock().own_pid
    }
    fn frontmost_app(&self) -> Option<AppInfo> {
        self.record("frontmost_app");
        let st = self.state.lock();
        let pid = st.frontmost?;
        let app = st.apps.iter().find(|a| a.pid == pid).cloned();
        Some(app.unwrap_or(AppInfo {
            pid,
            name: String::new(),
            bundle_id: None,
        }))
    }
    fn regular_apps(&self) -> Vec<AppInfo> {
        self.record("regular_apps");
        self.state.lock().apps.clone()
    }
    fn activate_app(&self, pid: i32) -> Result<()> {
        self.record(format!("activate:{pid}"));
        if self.fail_activate.load(Ordering::SeqCst) {
            return Err(Error::ActivationFailed);
        }
        if self.activation_focuses.load(Ordering::SeqCst) {
            self.state.lock().frontmost = Some(pid);
        }
        Ok(())
    }
    fn focused_window(&self, pid: i32) -> Result<WindowRef> {
        self.record(format!("focused_window:{pid}"));
        self.slot(pid, |a| a.focused)
    }
    fn main_window(&self, pid: i32) -> Result<WindowRef> {
        self.record(format!("main_window:{pid}"));
        self.slot(pid, |a| a.main)
    }
    fn first_window(&self, pid: i32) -> Result<WindowRef> {
        self.record(format!("first_window:{pid}"));
        self.slot(pid, |a| a.list.first().copied())
    }
    fn window_frame(&self, win: &WindowRef) -> Result<Rect> {
        self.record(format!("frame:{}", win.id));
        if self.fail_frame.load(Ordering::SeqCst) {
            return Err(Error::WindowGone);
        }
        self.frame_of(win).ok_or(Error::StaleHandle(win.id))
    }
    fn set_window_position(&self, win: &WindowRef, origin: Point) -> Result<()> {
        self.record(format!("set_position:{}", win.id));
        if self.fail_position.load(Ordering::SeqCst) {
            return Err(Error::AxCode(MOCK_WRITE_FAILURE));
        }
        let mut st = self.state.lock();
        let frame = st
            .frames
            .get_mut(&win.id)
            .ok_or(Error::StaleHandle(win.id))?;
        frame.x = origin.x;
        frame.y = origin.y;
        Ok(())
    }
    fn set_window_size(&self, win: &WindowRef, size: Size) -> Result<()> {
        self.record(format!("set_size:{}", win.id));
        if self.fail_size.load(Ordering::SeqCst) {
            return Err(Error::AxCode(MOCK_WRITE_FAILURE));
        }
        let mut st = self.state.lock();
        let frame = st
            .frames
            .get_mut(&win.id)
            .ok_or(Error::StaleHandle(win.id))?;
        frame.w = size.width;
        frame.h = size.height;
        Ok(())
    }
    fn screens(&self) -> Vec<ScreenInfo> {
        self.record("screens");
        self.state.lock().screens.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_window_becomes_focused_and_main() {
        let mock = MockWinOps::new();
        mock.add_app(42, "Editor");
        let a = mock.add_window(42, Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = mock.add_window(42, Rect::new(10.0, 10.0, 100.0, 100.0));
        assert_eq!(mock.focused_window(42).unwrap(), a);
        assert_eq!(mock.main_window(42).unwrap(), a);
        assert_eq!(mock.first_window(42).unwrap(), a);
        mock.set_focused(42, Some(b));
        assert_eq!(mock.focused_window(42).unwrap(), b);
        assert_eq!(mock.focused_window(7), Err(Error::AppElement));
    }

    #[test]
    fn writes_update_frames_independently() {
        let mock = MockWinOps::new();
        let w = mock.add_window(5, Rect::new(0.0, 0.0, 10.0, 10.0));
        mock.set_fail_size(true);
        mock.set_window_position(&w, Point { x: 3.0, y: 4.0 }).unwrap();
        assert!(
            mock.set_window_size(
                &w,
                Size {
                    width: 1.0,
                    height: 1.0
                }
            )
            .is_err()
        );
        assert_eq!(mock.frame_of(&w), Some(Rect::new(3.0, 4.0, 10.0, 10.0)));
        assert!(mock.calls_contains("set_position:1"));
        assert_eq!(mock.count_calls("set_"), 2);
    }

    #[test]
    fn activation_moves_focus_unless_disabled() {
        let mock = MockWinOps::new();
        mock.add_app(9, "Mail");
        mock.activate_app(9).unwrap();
        assert_eq!(mock.frontmost_app().map(|a| a.pid), Some(9));
        mock.set_frontmost(None);
        mock.set_activation_focuses(false);
        mock.activate_app(9).unwrap();
        assert_eq!(mock.frontmost_app(), None);
    }
}
