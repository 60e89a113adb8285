//! Running applications via NSWorkspace.

use objc2_app_kit::{
    NSApplicationActivationOptions, NSApplicationActivationPolicy, NSRunningApplication,
    NSWorkspace,
};
use tracing::debug;

use crate::{
    error::{Error, Result},
    ops::AppInfo,
};

fn app_info(app: &NSRunningApplication) -> AppInfo {
    unsafe {
        AppInfo {
            pid: app.processIdentifier(),
            name: app
                .localizedName()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            bundle_id: app.bundleIdentifier().map(|s| s.to_string()),
        }
    }
}

/// The application currently owning keyboard focus.
pub(crate) fn frontmost_app() -> Option<AppInfo> {
    let app = unsafe { NSWorkspace::sharedWorkspace().frontmostApplication() }?;
    Some(app_info(&app))
}

/// Running applications with a regular activation policy (Dock icon, menu bar).
pub(crate) fn regular_apps() -> Vec<AppInfo> {
    unsafe {
        NSWorkspace::sharedWorkspace()
            .runningApplications()
            .iter()
            .filter(|a| a.activationPolicy() == NSApplicationActivationPolicy::Regular)
            .map(|a| app_info(&a))
            .collect()
    }
}

/// Activate `pid`, ignoring other apps.
pub(crate) fn activate_pid(pid: i32) -> Result<()> {
    #[allow(deprecated)]
    let ok = unsafe {
        let Some(app) =
            NSRunningApplication::runningApplicationWithProcessIdentifier(pid as libc::pid_t)
        else {
            return Err(Error::ActivationFailed);
        };
        app.activateWithOptions(NSApplicationActivationOptions::ActivateIgnoringOtherApps)
    };
    if !ok {
        debug!("activateWithOptions returned false for pid={}", pid);
        return Err(Error::ActivationFailed);
    }
    debug!("activated app pid={}", pid);
    Ok(())
}
