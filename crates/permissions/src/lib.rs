//! Accessibility permission checks for weaver.
//!
//! Moving another application's windows requires the process to be trusted
//! for Accessibility control. This crate exposes the three operations the
//! engine needs at that boundary:
//!
//! - [`accessibility_ok`] queries trust without side effects.
//! - [`request_accessibility`] queries trust and asks macOS to show its
//!   permission prompt when the process is not yet trusted.
//! - [`open_accessibility_settings`] redirects the user to the Accessibility
//!   pane of System Settings.
//!
//! On platforms other than macOS the process is never trusted and the prompt
//! and settings redirect are no-ops.

use std::process::Command;

/// URL of the Accessibility pane in System Settings.
pub const ACCESSIBILITY_SETTINGS_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";

#[cfg(target_os = "macos")]
mod sys {
    use core_foundation::{
        base::TCFType,
        boolean::CFBoolean,
        dictionary::{CFDictionary, CFDictionaryRef},
        string::{CFString, CFStringRef},
    };

    #[link(name = "ApplicationServices", kind = "framework")]
    unsafe extern "C" {
        fn AXIsProcessTrusted() -> bool;
        fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
        static kAXTrustedCheckOptionPrompt: CFStringRef;
    }

    pub(crate) fn trusted() -> bool {
        unsafe { AXIsProcessTrusted() }
    }

    pub(crate) fn trusted_with_prompt() -> bool {
        let key = unsafe { CFString::wrap_under_get_rule(kAXTrustedCheckOptionPrompt) };
        let options = CFDictionary::from_CFType_pairs(&[(key, CFBoolean::true_value())]);
        unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) }
    }
}

#[cfg(not(target_os = "macos"))]
mod sys {
    pub(crate) fn trusted() -> bool {
        false
    }

    pub(crate) fn trusted_with_prompt() -> bool {
        false
    }
}

/// Check whether the process is trusted for Accessibility control.
///
/// Fast and side-effect free.
pub fn accessibility_ok() -> bool {
    sys::trusted()
}

/// Check trust and, if the process is not trusted, ask macOS to show the
/// Accessibility permission prompt.
///
/// Returns the trust state at the time of the call. The prompt is
/// asynchronous: a `false` return means the caller should abort and let the
/// user retry after granting permission.
pub fn request_accessibility() -> bool {
    let ok = sys::trusted_with_prompt();
    if !ok {
        tracing::info!("accessibility_not_trusted: requested system prompt");
    }
    ok
}

/// Open the Accessibility pane of System Settings.
///
/// Failures are logged, never returned: the redirect is a convenience for the
/// user and the caller has no recovery action.
pub fn open_accessibility_settings() {
    if !cfg!(target_os = "macos") {
        return;
    }
    if Command::new("open")
        .arg(ACCESSIBILITY_SETTINGS_URL)
        .spawn()
        .is_err()
    {
        tracing::warn!("failed to open Accessibility settings");
    }
}

/// Current permission status for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionsStatus {
    /// Accessibility (AX) permission; `true` if granted.
    pub accessibility_ok: bool,
}

/// Snapshot the permissions weaver depends on. Performs no prompting.
pub fn check_permissions() -> PermissionsStatus {
    PermissionsStatus {
        accessibility_ok: accessibility_ok(),
    }
}
