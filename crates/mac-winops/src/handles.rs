//! Bounded registry mapping [`WindowRef`] ids to retained OS window handles.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::ops::WindowRef;

/// LRU table of window handles.
///
/// Interning an element that is already registered returns its existing id,
/// so the same OS window keeps one `WindowRef` across lookups.
pub(crate) struct HandleRegistry<T> {
    /// `(pid, handle)` keyed by `WindowRef::id`.
    map: LruCache<u64, (i32, T)>,
    /// Next id to hand out.
    next_id: u64,
}

impl<T> HandleRegistry<T> {
    /// Create a registry holding at most `cap` handles.
    pub(crate) fn new(cap: NonZeroUsize) -> Self {
        Self {
            map: LruCache::new(cap),
            next_id: 1,
        }
    }

    /// Register `elem` for `pid`, reusing the id of an equal entry.
    pub(crate) fn intern(
        &mut self,
        pid: i32,
        elem: T,
        same: impl Fn(&T, &T) -> bool,
    ) -> WindowRef {
        let existing = self
            .map
            .iter()
            .find(|(_, (p, e))| *p == pid && same(e, &elem))
            .map(|(id, _)| *id);
        if let Some(id) = existing {
            // The fresh element is dropped.
            self.map.promote(&id);
            return WindowRef { pid, id };
        }
        let id = self.next_id;
        self.next_id += 1;
        self.map.put(id, (pid, elem));
        WindowRef { pid, id }
    }

    /// Handle for `win`, if still registered.
    pub(crate) fn get(&mut self, win: &WindowRef) -> Option<&T> {
        self.map
            .get(&win.id)
            .filter(|(pid, _)| *pid == win.pid)
            .map(|(_, elem)| elem)
    }

    /// Number of registered handles.
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}
