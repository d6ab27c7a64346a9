//! Debug-only reentry check for table operations.
//!
//! Table operations run user code: `K: Display` while a key is rendered and
//! `K: Eq` while a chain is scanned. If that code reaches back into the same
//! table, debug builds panic and name both operations. Release builds keep
//! only a marker that makes the owner `!Sync`.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table tracker. Guard each public operation with
/// `let _op = self.reentry.enter("name");`.
#[derive(Debug, Default)]
pub(crate) struct ReentryCheck {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    // Send but !Sync in every build profile.
    _not_sync: PhantomData<Cell<()>>,
}

impl ReentryCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _not_sync: PhantomData,
        }
    }

    /// Mark `op` as running. Panics if another operation is already running.
    #[cfg(debug_assertions)]
    #[inline]
    pub(crate) fn enter(&self, op: &'static str) -> OpGuard<'_> {
        if let Some(outer) = self.active.get() {
            panic!("reentrant `{op}` while `{outer}` is running on the same table");
        }
        self.active.set(Some(op));
        OpGuard { owner: self }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    pub(crate) fn enter(&self, _op: &'static str) -> OpGuard<'_> {
        OpGuard {
            _owner: PhantomData,
        }
    }

    #[cfg(all(test, debug_assertions))]
    fn running(&self) -> Option<&'static str> {
        self.active.get()
    }
}

/// Clears the running operation on drop, including during unwinding.
pub(crate) struct OpGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ReentryCheck,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a ReentryCheck>,
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.active.get().is_some());
            self.owner.active.set(None);
        }
    }
}
