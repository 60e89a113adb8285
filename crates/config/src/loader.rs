//! Parse and load user configuration.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error,
    bindings::{Binding, default_bindings, validate_bindings},
    default_config_path,
};

/// Default scale for the `center` command.
pub const DEFAULT_CENTER_SCALE: f64 = 0.6;

/// Which rectangle of a display counts as its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsMode {
    /// The work area: excludes the menu bar and Dock.
    #[default]
    Visible,
    /// The full display frame.
    Full,
}

/// When the orchestrator runs window selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReselectPolicy {
    /// Select only when no window is tracked yet.
    #[default]
    Tracked,
    /// Select before every command.
    Always,
}

/// Resolved weaver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fraction of the display used by the `center` command, in `(0, 1]`.
    pub center_scale: f64,
    /// Display rectangle used as layout bounds.
    pub bounds: BoundsMode,
    /// Selection policy for consecutive commands.
    pub reselect: ReselectPolicy,
    /// Upper bound on the wait for an activated app to come forward.
    pub activation_timeout_ms: u64,
    /// Poll interval while waiting for activation.
    pub poll_interval_ms: u64,
    /// Open System Settings when Accessibility trust is missing.
    pub open_settings_on_denied: bool,
    /// Hotkey table.
    pub bindings: Vec<Binding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            center_scale: DEFAULT_CENTER_SCALE,
            bounds: BoundsMode::default(),
            reselect: ReselectPolicy::default(),
            activation_timeout_ms: 200,
            poll_interval_ms: 20,
            open_settings_on_denied: true,
            bindings: default_bindings(),
        }
    }
}

impl Config {
    /// Parse a RON document and validate it.
    pub fn from_ron(text: &str) -> Result<Self, Error> {
        let cfg: Self = ron::from_str(text).map_err(|e| Error::Parse {
            path: None,
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges and the binding table.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.center_scale > 0.0 && self.center_scale <= 1.0) {
            return Err(Error::validation(format!(
                "center_scale must be in (0, 1], got {}",
                self.center_scale
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::validation("poll_interval_ms must be greater than 0"));
        }
        validate_bindings(&self.bindings)
    }

    /// Activation wait upper bound as a `Duration`.
    pub fn activation_timeout(&self) -> Duration {
        Duration::from_millis(self.activation_timeout_ms)
    }

    /// Activation poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Load and validate a `Config` from a RON file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .ron file)".to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), "loading config");
    Config::from_ron(&text).map_err(|e| e.with_path(path))
}

/// Resolve the effective configuration.
///
/// Policy:
/// 1) Load `explicit` when provided; a missing file is an error.
/// 2) Else load `~/.weaver/config.ron` when it exists.
/// 3) Else use built-in defaults.
pub fn resolve(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>), Error> {
    if let Some(path) = explicit {
        return Ok((load_from_path(path)?, Some(path.to_path_buf())));
    }
    let preferred = default_config_path();
    if preferred.exists() {
        return Ok((load_from_path(&preferred)?, Some(preferred)));
    }
    debug!("no config file found; using defaults");
    Ok((Config::default(), None))
}
