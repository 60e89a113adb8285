//! Subcommand implementations.

use std::sync::Arc;

use config::{BoundsMode, Config, ReselectPolicy, normalize_chord};
use mac_winops::{RealWinOps, WinOps};
use tokio::{runtime::Builder, time::sleep};
use tracing::{debug, info};
use weaver_engine::{
    Error as EngineError, Geometry, HotkeyMap, ResizeService, Resizer, ResizerCfg, display,
};

use crate::{
    chooser::TerminalChooser,
    cli::{ComputeArgs, PermissionsArgs, ResizeArgs},
    error::{Error, Result},
};

/// Production window operations configured from `cfg`.
fn winops(cfg: &Config) -> Arc<dyn WinOps> {
    Arc::new(RealWinOps::new(cfg.open_settings_on_denied))
}

/// Run layout commands through the resize service.
///
/// AppKit display enumeration needs the main thread, so the service runs on
/// a current-thread runtime driven from here.
pub fn resize(cfg: &Config, args: &ResizeArgs) -> Result<()> {
    let mut cfg = cfg.clone();
    if let Some(t) = args.activation_timeout {
        cfg.activation_timeout_ms = u64::try_from(t.as_millis()).unwrap_or(u64::MAX);
    }
    if args.reselect {
        cfg.reselect = ReselectPolicy::Always;
    }
    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(async {
        let resizer = Resizer::new(
            winops(&cfg),
            Arc::new(TerminalChooser),
            ResizerCfg::from_config(&cfg),
        );
        let handle = ResizeService::spawn(resizer);
        for (i, command) in args.commands.iter().copied().enumerate() {
            if i > 0 && !args.pause.is_zero() {
                sleep(args.pause).await;
            }
            // The service has already logged anything short of success.
            let report = handle.resize(command).await?;
            if report.is_complete() {
                println!("{command}: {} -> {}", report.target, report.rect);
                continue;
            }
            return Err(Error::Incomplete {
                command: command.to_string(),
                position: report.position.to_string(),
                size: report.size.to_string(),
            });
        }
        Ok::<_, Error>(())
    })
}

/// Print the rectangle for a command and explicit bounds.
pub fn compute(cfg: &Config, args: &ComputeArgs) -> Result<()> {
    let geometry = Geometry::new(args.center_scale.unwrap_or(cfg.center_scale));
    let rect = geometry.compute(&args.bounds, args.command)?;
    println!("{} {} {} {}", rect.x, rect.y, rect.w, rect.h);
    Ok(())
}

/// List displays in enumeration order.
pub fn displays(cfg: &Config) -> Result<()> {
    let screens = winops(cfg).screens();
    if screens.is_empty() {
        return Err(EngineError::NoDisplay.into());
    }
    let mode = match cfg.bounds {
        BoundsMode::Visible => "visible",
        BoundsMode::Full => "full",
    };
    for (i, s) in screens.iter().enumerate() {
        let primary = if i == 0 { " (primary)" } else { "" };
        println!(
            "{i}{primary}: frame {} visible {} bounds[{mode}] {}",
            s.frame,
            s.visible,
            display::bounds_of(s, cfg.bounds)
        );
    }
    Ok(())
}

/// List the apps the chooser would offer.
pub fn apps(cfg: &Config) -> Result<()> {
    let ops = winops(cfg);
    let own = ops.own_pid();
    let apps: Vec<_> = ops
        .regular_apps()
        .into_iter()
        .filter(|a| a.pid != own)
        .collect();
    debug!(count = apps.len(), "regular apps");
    for (i, app) in apps.iter().enumerate() {
        let bundle = app.bundle_id.as_deref().unwrap_or("-");
        println!("{i}: {app} [{bundle}]");
    }
    Ok(())
}

/// Print the hotkey table.
pub fn bindings(cfg: &Config) -> Result<()> {
    let map = HotkeyMap::new(&cfg.bindings);
    for (id, b) in map.iter() {
        let chord = normalize_chord(&b.chord)?;
        println!("{id:>3}  {chord:<24} {}", b.command);
    }
    Ok(())
}

/// Report, and optionally request, Accessibility trust.
pub fn permission_status(args: &PermissionsArgs) -> Result<()> {
    let trusted = if args.prompt {
        permissions::request_accessibility()
    } else {
        permissions::check_permissions().accessibility_ok
    };
    if args.open_settings {
        permissions::open_accessibility_settings();
    }
    println!(
        "accessibility: {}",
        if trusted { "granted" } else { "not granted" }
    );
    if !trusted {
        info!(
            "grant access in System Settings: {}",
            permissions::ACCESSIBILITY_SETTINGS_URL
        );
    }
    Ok(())
}
