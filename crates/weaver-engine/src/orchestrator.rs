//! The resize pipeline: permission gate, selection, display, geometry, apply.

use std::sync::Arc;

use config::{BoundsMode, Config, LayoutCommand, ReselectPolicy};
use mac_winops::{Rect, WinOps, WindowRef};
use tracing::{debug, info, warn};

use crate::{
    Error, Result, display,
    geometry::Geometry,
    mutator::{self, ApplyReport},
    selector::{ActivationWait, Chooser, SelectionState, Selector},
};

/// Tunables for a [`Resizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizerCfg {
    /// Layout calculator.
    pub geometry: Geometry,
    /// Which display rectangle bounds layouts.
    pub bounds: BoundsMode,
    /// When selection runs.
    pub reselect: ReselectPolicy,
    /// Post-activation wait.
    pub wait: ActivationWait,
}

impl Default for ResizerCfg {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            bounds: BoundsMode::default(),
            reselect: ReselectPolicy::default(),
            wait: ActivationWait::default(),
        }
    }
}

impl ResizerCfg {
    /// Settings from the loaded configuration.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            geometry: Geometry::new(cfg.center_scale),
            bounds: cfg.bounds,
            reselect: cfg.reselect,
            wait: ActivationWait::from_config(cfg),
        }
    }
}

/// Owns the selection state and runs layout commands against it.
pub struct Resizer {
    /// OS boundary.
    ops: Arc<dyn WinOps>,
    /// Target selection.
    selector: Selector,
    /// Settings.
    cfg: ResizerCfg,
    /// Currently tracked app and window.
    state: SelectionState,
    /// Last frame read from, or applied to, a window.
    last_frame: Option<(WindowRef, Rect)>,
}

impl Resizer {
    /// Create a resizer with nothing tracked.
    pub fn new(ops: Arc<dyn WinOps>, chooser: Arc<dyn Chooser>, cfg: ResizerCfg) -> Self {
        let selector = Selector::new(ops.clone(), chooser, cfg.wait);
        Self {
            ops,
            selector,
            cfg,
            state: SelectionState::default(),
            last_frame: None,
        }
    }

    /// Snapshot of the selection state.
    pub fn selection(&self) -> SelectionState {
        self.state.clone()
    }

    /// Run selection now, replacing the tracked window on success.
    pub async fn reselect(&mut self) -> Result<WindowRef> {
        self.ensure_permission()?;
        self.selector.select(&mut self.state).await
    }

    /// Snap the target window to `command`.
    ///
    /// Attribute write failures do not make this an `Err`; inspect the
    /// returned report. Every `Err` means no attribute was written.
    pub async fn resize(&mut self, command: LayoutCommand) -> Result<ApplyReport> {
        self.ensure_permission()?;
        let target = self.target().await?;
        let frame = self.current_frame(&target);
        let bounds = display::locate(self.ops.as_ref(), frame.as_ref(), self.cfg.bounds)?;
        let rect = self.cfg.geometry.compute(&bounds, command)?;
        debug!(%command, %bounds, %rect, "computed layout");
        let report = mutator::apply(self.ops.as_ref(), &target, rect);
        if report.is_complete() {
            self.last_frame = Some((target, rect));
            info!(%command, window = %target, %rect, "window placed");
        }
        Ok(report)
    }

    /// Run `command` and reduce the outcome to pass/fail, logging failures.
    pub async fn resize_or_log(&mut self, command: LayoutCommand) -> bool {
        let outcome = self.resize(command).await;
        log_outcome(command, &outcome)
    }

    /// Abort with `PermissionDenied` after requesting trust when untrusted.
    fn ensure_permission(&self) -> Result<()> {
        if self.ops.accessibility_ok() {
            return Ok(());
        }
        self.ops.request_accessibility();
        Err(Error::PermissionDenied)
    }

    /// The window this command operates on, selecting per policy.
    async fn target(&mut self) -> Result<WindowRef> {
        let tracked = self.state.window;
        match (self.cfg.reselect, tracked) {
            (ReselectPolicy::Tracked, Some(win)) => Ok(win),
            (ReselectPolicy::Tracked, None) => self.selector.select(&mut self.state).await,
            (ReselectPolicy::Always, _) => match self.selector.select(&mut self.state).await {
                Ok(win) => Ok(win),
                Err(Error::PermissionDenied) => Err(Error::PermissionDenied),
                Err(e) => match tracked {
                    Some(win) => {
                        debug!("reselection failed ({}); keeping tracked window", e);
                        Ok(win)
                    }
                    None => Err(e),
                },
            },
        }
    }

    /// Read the window's frame, falling back to the cached one.
    fn current_frame(&mut self, win: &WindowRef) -> Option<Rect> {
        match self.ops.window_frame(win) {
            Ok(frame) => {
                self.last_frame = Some((*win, frame));
                Some(frame)
            }
            Err(e) => {
                let cached = self
                    .last_frame
                    .filter(|(w, _)| w == win)
                    .map(|(_, frame)| frame);
                debug!(window = %win, cached = cached.is_some(), "frame read failed: {}", e);
                cached
            }
        }
    }
}

/// Reduce a resize outcome to pass/fail, logging anything short of a
/// complete placement.
///
/// A missing permission is reported at `info!`; every other failure at
/// `warn!`.
pub fn log_outcome(command: LayoutCommand, outcome: &Result<ApplyReport>) -> bool {
    match outcome {
        Ok(report) if report.is_complete() => true,
        Ok(report) => {
            warn!(
                %command,
                window = %report.target,
                position = %report.position,
                size = %report.size,
                "window only partially placed"
            );
            false
        }
        Err(Error::PermissionDenied) => {
            info!(%command, "accessibility permission required; grant it and retry");
            false
        }
        Err(e) => {
            warn!(%command, "resize failed: {}", e);
            false
        }
    }
}
