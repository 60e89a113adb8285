//! mac-winops: the macOS windowing boundary for weaver.
//!
//! Provides the [`WinOps`] trait the layout engine is written against, the
//! geometry types shared across the workspace, and two implementations:
//!
//! - [`RealWinOps`]: Accessibility API + AppKit. On platforms other than
//!   macOS this is a stub that reports no apps, windows or displays.
//! - [`MockWinOps`]: in-memory desktop for tests (feature `test-utils`).
//!
//! All window lookups and mutations require Accessibility permission.

mod error;
pub mod geom;
#[cfg(any(target_os = "macos", test))]
mod handles;
mod ops;

#[cfg(target_os = "macos")]
mod app;
#[cfg(target_os = "macos")]
mod ax;
#[cfg(target_os = "macos")]
mod real;
#[cfg(target_os = "macos")]
mod screen;
#[cfg(not(target_os = "macos"))]
mod stub;

#[cfg(any(test, feature = "test-utils"))]
mod mock;

pub use error::{Error, Result};
pub use geom::{Point, Rect, Size};
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MOCK_WRITE_FAILURE, MockWinOps};
pub use ops::{AppInfo, ScreenInfo, WinOps, WindowRef};
#[cfg(target_os = "macos")]
pub use real::RealWinOps;
#[cfg(not(target_os = "macos"))]
pub use stub::RealWinOps;
