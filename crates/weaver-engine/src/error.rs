use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the weaver engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Accessibility trust is not granted; the OS prompt has been requested.
    #[error("Accessibility permission not granted")]
    PermissionDenied,

    /// Selection found no process, or a process with no usable window.
    #[error("No target window: {0}")]
    NoTargetWindow(String),

    /// The only candidate was this process itself.
    #[error("Refusing to target this process")]
    SelfTarget,

    /// Layout bounds with non-positive or non-finite size.
    #[error("Layout bounds have no area")]
    EmptyBounds,

    /// The windowing system reported no displays.
    #[error("No displays available")]
    NoDisplay,

    /// The resize service task has stopped.
    #[error("Resize service closed")]
    ServiceClosed,

    /// Errors originating from the window operations layer.
    #[error("Window operation failed: {0}")]
    WinOps(#[from] mac_winops::Error),
}
