//! Target window selection.
//!
//! Selection runs three branches in order:
//!
//! 1. **Frontmost-foreign**: the frontmost app is not this process. Adopt it,
//!    activate it, and resolve its window.
//! 2. **Sticky-previous**: this process is frontmost and an app was selected
//!    earlier. Re-resolve that app's window; the selected app does not change.
//! 3. **Interactive fallback**: nothing selected yet and this process is
//!    frontmost. Ask a [`Chooser`] to pick among the regular foreign apps.
//!
//! Window resolution tries the focused window, then the main window, then the
//! first entry of the window list. [`SelectionState`] is only written when a
//! window resolves, and then the process and window are written together.

use std::{sync::Arc, time::Duration};

use config::Config;
use mac_winops::{AppInfo, Error as WinOpsError, Result as WinOpsResult, WinOps, WindowRef};
use tokio::time::{Instant, sleep};
use tracing::{debug, trace, warn};

use crate::{Error, Result};

/// The currently targeted application and window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Selected process.
    pub process: Option<AppInfo>,
    /// Window resolved from `process`.
    pub window: Option<WindowRef>,
}

impl SelectionState {
    /// True when a window is tracked.
    pub fn is_tracking(&self) -> bool {
        self.window.is_some()
    }

    /// Set process and window together.
    fn adopt(&mut self, app: AppInfo, window: WindowRef) {
        self.process = Some(app);
        self.window = Some(window);
    }
}

/// Interactive picker used when no target can be inferred.
///
/// `choose` is synchronous and may block until the operator answers. It
/// returns the index of the chosen app in `apps`; `None` or an out-of-range
/// index cancels.
pub trait Chooser: Send + Sync {
    /// Pick one of `apps`.
    fn choose(&self, apps: &[AppInfo]) -> Option<usize>;
}

/// Chooser that always cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelChooser;

impl Chooser for CancelChooser {
    fn choose(&self, _apps: &[AppInfo]) -> Option<usize> {
        None
    }
}

/// Timing for the post-activation wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationWait {
    /// Upper bound on the wait.
    pub timeout: Duration,
    /// Delay between frontmost checks.
    pub poll_interval: Duration,
}

impl Default for ActivationWait {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(200),
            poll_interval: Duration::from_millis(20),
        }
    }
}

impl ActivationWait {
    /// Timing from the loaded configuration.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            timeout: cfg.activation_timeout(),
            poll_interval: cfg.poll_interval(),
        }
    }
}

/// Resolves the target window for an operation.
pub struct Selector {
    /// OS boundary.
    ops: Arc<dyn WinOps>,
    /// Fallback picker.
    chooser: Arc<dyn Chooser>,
    /// Post-activation wait.
    wait: ActivationWait,
}

impl Selector {
    /// Create a selector.
    pub fn new(ops: Arc<dyn WinOps>, chooser: Arc<dyn Chooser>, wait: ActivationWait) -> Self {
        Self { ops, chooser, wait }
    }

    /// Run selection and update `state` on success.
    ///
    /// On failure `state` is left exactly as it was.
    pub async fn select(&self, state: &mut SelectionState) -> Result<WindowRef> {
        if !self.ops.accessibility_ok() {
            self.ops.request_accessibility();
            return Err(Error::PermissionDenied);
        }
        let own = self.ops.own_pid();
        let front = self.ops.frontmost_app();

        if let Some(app) = front.filter(|a| a.pid != own) {
            debug!(%app, "selecting frontmost app");
            self.activate_and_wait(app.pid).await;
            let win = self.resolve_window(app.pid)?;
            state.adopt(app, win);
            return Ok(win);
        }

        if let Some(prev) = state.process.clone() {
            debug!(app = %prev, "frontmost is self; reusing previous app");
            let win = self.resolve_window(prev.pid)?;
            state.adopt(prev, win);
            return Ok(win);
        }

        let app = self.choose_interactively(own)?;
        debug!(%app, "operator chose app");
        self.activate_and_wait(app.pid).await;
        let win = self.resolve_window(app.pid)?;
        state.adopt(app, win);
        Ok(win)
    }

    /// Show the chooser over the regular foreign apps.
    fn choose_interactively(&self, own: i32) -> Result<AppInfo> {
        let mut apps = self.ops.regular_apps();
        apps.retain(|a| a.pid != own);
        if apps.is_empty() {
            return Err(Error::NoTargetWindow("no candidate applications".into()));
        }
        match self.chooser.choose(&apps) {
            Some(idx) if idx < apps.len() => Ok(apps.swap_remove(idx)),
            Some(idx) => {
                debug!(idx, count = apps.len(), "chooser index out of range");
                Err(Error::NoTargetWindow("selection cancelled".into()))
            }
            None => Err(Error::NoTargetWindow("selection cancelled".into())),
        }
    }

    /// Activate `pid` and poll until it is frontmost or the wait elapses.
    async fn activate_and_wait(&self, pid: i32) {
        if let Err(e) = self.ops.activate_app(pid) {
            warn!(pid, "activation failed: {}", e);
        }
        let deadline = Instant::now() + self.wait.timeout;
        loop {
            if self.ops.frontmost_app().is_some_and(|a| a.pid == pid) {
                trace!(pid, "app is frontmost");
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                debug!(pid, "activation wait elapsed; resolving anyway");
                return;
            }
            sleep(self.wait.poll_interval.min(deadline - now)).await;
        }
    }

    /// Focused window, else main window, else first listed window.
    fn resolve_window(&self, pid: i32) -> Result<WindowRef> {
        if pid == self.ops.own_pid() {
            return Err(Error::SelfTarget);
        }
        if !self.ops.accessibility_ok() {
            self.ops.request_accessibility();
            return Err(Error::PermissionDenied);
        }
        let lookups: [(&str, fn(&dyn WinOps, i32) -> WinOpsResult<WindowRef>); 3] = [
            ("focused", |o, p| o.focused_window(p)),
            ("main", |o, p| o.main_window(p)),
            ("first", |o, p| o.first_window(p)),
        ];
        for (kind, lookup) in lookups {
            match lookup(self.ops.as_ref(), pid) {
                Ok(win) => {
                    debug!(pid, %win, kind, "resolved window");
                    return Ok(win);
                }
                Err(WinOpsError::Permission) => return Err(Error::PermissionDenied),
                Err(e) => debug!(pid, kind, "window lookup failed: {}", e),
            }
        }
        Err(Error::NoTargetWindow(format!("pid {pid} has no window")))
    }
}
