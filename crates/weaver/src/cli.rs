//! Command-line interface definitions for weaver.

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use config::LayoutCommand;
use logging::LogArgs;
use mac_winops::Rect;

/// Command-line interface for the `weaver` binary.
#[derive(Parser, Debug)]
#[command(
    name = "weaver",
    about = "Snap macOS windows into halves, thirds, corners and more",
    version
)]
pub struct Cli {
    /// Logging controls shared across weaver binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Path to a configuration file (RON). Defaults to ~/.weaver/config.ron.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place the target window with one or more layout commands.
    Resize(ResizeArgs),
    /// Print the rectangle a layout command produces for given bounds.
    Compute(ComputeArgs),
    /// List displays and their layout bounds.
    Displays,
    /// List the applications the interactive chooser would offer.
    Apps,
    /// Print the hotkey table with dispatch ids.
    Bindings,
    /// Show Accessibility trust status.
    Permissions(PermissionsArgs),
}

/// Arguments for the `resize` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ResizeArgs {
    /// Layout commands, applied in order to the same window, e.g. `left-third`.
    #[arg(value_name = "COMMAND", num_args = 1.., required = true)]
    pub commands: Vec<LayoutCommand>,

    /// Pause between consecutive commands.
    #[arg(
        long,
        value_parser = humantime::parse_duration,
        default_value = "0s",
        value_name = "DURATION"
    )]
    pub pause: Duration,

    /// Override the configured upper bound on the activation wait.
    #[arg(long, value_parser = humantime::parse_duration, value_name = "DURATION")]
    pub activation_timeout: Option<Duration>,

    /// Run window selection before every command instead of reusing the
    /// tracked window.
    #[arg(long)]
    pub reselect: bool,
}

/// Arguments for the `compute` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ComputeArgs {
    /// Layout command, e.g. `bottom-right`.
    #[arg(value_name = "COMMAND")]
    pub command: LayoutCommand,

    /// Layout bounds as `X,Y,W,H`.
    #[arg(long, value_parser = parse_bounds, value_name = "X,Y,W,H")]
    pub bounds: Rect,

    /// Override the configured scale for `center`.
    #[arg(long, value_name = "SCALE")]
    pub center_scale: Option<f64>,
}

/// Arguments for the `permissions` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PermissionsArgs {
    /// Ask the OS to show its Accessibility trust prompt.
    #[arg(long)]
    pub prompt: bool,

    /// Open the Accessibility pane of System Settings.
    #[arg(long)]
    pub open_settings: bool,
}

/// Parse `X,Y,W,H` into a rectangle with positive size.
pub fn parse_bounds(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, w, h] = parts.as_slice() else {
        return Err(format!("expected X,Y,W,H, got '{s}'"));
    };
    let num = |v: &str| {
        v.parse::<f64>()
            .map_err(|_| format!("'{v}' is not a number"))
    };
    let rect = Rect::new(num(*x)?, num(*y)?, num(*w)?, num(*h)?);
    if rect.is_empty() {
        return Err("width and height must be positive".to_string());
    }
    Ok(rect)
}
