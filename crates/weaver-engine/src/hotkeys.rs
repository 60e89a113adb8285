//! Hotkey id → layout command dispatch.
//!
//! The host registers each chord with the OS under the id assigned here and
//! calls [`HotkeyMap::dispatch`] when a chord fires.

use std::collections::BTreeMap;

use config::{Binding, LayoutCommand};
use tracing::{debug, warn};

use crate::service::ResizeHandle;

/// Bindings keyed by opaque, 1-based ids in table order.
#[derive(Debug, Clone, Default)]
pub struct HotkeyMap {
    /// Id → binding.
    entries: BTreeMap<u32, Binding>,
}

impl HotkeyMap {
    /// Assign ids to `bindings`.
    pub fn new(bindings: &[Binding]) -> Self {
        let entries = (1u32..).zip(bindings.iter().cloned()).collect();
        Self { entries }
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Command bound to `id`.
    pub fn command(&self, id: u32) -> Option<LayoutCommand> {
        self.entries.get(&id).map(|b| b.command)
    }

    /// Iterate `(id, binding)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Binding)> {
        self.entries.iter().map(|(id, b)| (*id, b))
    }

    /// Queue the command bound to `id` on the resize service.
    ///
    /// Returns the dispatched command; unknown ids and a closed service are
    /// logged and yield `None`.
    pub fn dispatch(&self, id: u32, handle: &ResizeHandle) -> Option<LayoutCommand> {
        let Some(binding) = self.entries.get(&id) else {
            debug!(id, "unknown hotkey id");
            return None;
        };
        debug!(id, chord = %binding.chord, command = %binding.command, "hotkey");
        match handle.submit(binding.command) {
            Ok(()) => Some(binding.command),
            Err(e) => {
                warn!(id, "hotkey dispatch failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use config::{Generic, Third, default_bindings};

    use super::*;

    #[test]
    fn ids_follow_table_order() {
        let map = HotkeyMap::new(&default_bindings());
        assert_eq!(map.len(), 9);
        assert_eq!(map.command(4), Some(LayoutCommand::Third(Third::Center)));
        assert_eq!(
            map.command(9),
            Some(LayoutCommand::Generic(Generic::Center))
        );
        assert_eq!(map.command(0), None);
        assert_eq!(map.command(10), None);
        let ids: Vec<u32> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }
}
