use thiserror::Error;

/// Errors that can occur during window operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Accessibility permission is required but not granted.
    #[error("Accessibility permission missing")]
    Permission,

    /// Failed to create an Accessibility API application element.
    #[error("Failed to create AX application element")]
    AppElement,

    /// The process exposes no window for the requested lookup.
    #[error("No window available")]
    NoWindow,

    /// An Accessibility API operation failed with the given error code.
    #[error("AX operation failed: code {0}")]
    AxCode(i32),

    /// The AX element became invalid (e.g., window closed) during the operation.
    #[error("AX element invalid (window gone)")]
    WindowGone,

    /// Operation must be executed on the main thread.
    #[error("Operation requires main thread")]
    MainThread,

    /// The requested attribute or operation is not supported.
    #[error("Unsupported attribute")]
    Unsupported,

    /// Failed to activate the application.
    #[error("Activation failed")]
    ActivationFailed,

    /// A `WindowRef` no longer maps to a live AX element in this process.
    #[error("Stale window handle {0}")]
    StaleHandle(u64),

    /// The windowing system reported no displays.
    #[error("No displays available")]
    NoDisplay,
}

pub type Result<T> = std::result::Result<T, Error>;
