//! weaver-engine: window targeting and layout for weaver.
//!
//! A layout command flows through one pipeline, owned by [`Resizer`]:
//!
//! 1. check Accessibility trust (request it and abort when missing),
//! 2. select the target window ([`Selector`]),
//! 3. find the display the window is on ([`display::locate`]),
//! 4. compute the destination rectangle ([`Geometry`]),
//! 5. write position and size ([`mutator::apply`]).
//!
//! [`ResizeService`] confines a `Resizer` to one task so pipelines never
//! interleave, and [`HotkeyMap`] routes hotkey ids into it.
//!
//! All OS access goes through `mac_winops::WinOps`, so the engine runs against
//! `MockWinOps` in tests.

pub mod display;
mod error;
pub mod geometry;
mod hotkeys;
pub mod mutator;
mod orchestrator;
pub mod selector;
mod service;

pub use error::{Error, Result};
pub use geometry::{Geometry, compute};
pub use hotkeys::HotkeyMap;
pub use mutator::{ApplyReport, WriteStatus};
pub use orchestrator::{Resizer, ResizerCfg, log_outcome};
pub use selector::{ActivationWait, CancelChooser, Chooser, SelectionState, Selector};
pub use service::{ResizeHandle, ResizeService};
