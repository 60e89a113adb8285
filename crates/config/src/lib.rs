//! Shared configuration types for weaver: layout commands, hotkey bindings,
//! and the RON configuration file.
#![warn(unsafe_op_in_unsafe_fn)]

use std::{env, path::PathBuf};

mod bindings;
mod error;
mod layout;
mod loader;

#[cfg(test)]
mod test_parse;

pub use bindings::{Binding, default_bindings, normalize_chord, validate_bindings};
pub use error::Error;
pub use layout::{Corner, Generic, Half, LayoutCommand, Third, TwoThirds, Vertical};
pub use loader::{
    BoundsMode, Config, DEFAULT_CENTER_SCALE, ReselectPolicy, load_from_path, resolve,
};

/// Determine the preferred user config path (`~/.weaver/config.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".weaver");
    p.push("config.ron");
    p
}
