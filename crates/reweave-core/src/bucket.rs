//! Per-context slot storage.
//!
//! A bucket holds four ordered slot lists and three cursors. Slot identity is
//! positional: the Nth hook call of a kind always addresses the Nth slot of
//! that kind, so the cursors rewind to zero at every call entry.

use std::any::Any;
use std::rc::Rc;

use crate::guards::GuardList;
use crate::hooks::SlotUpdater;

/// An effect body, already adapted to return its optional cleanup.
pub(crate) type EffectFn = Box<dyn FnOnce() -> Option<CleanupFn>>;
pub(crate) type CleanupFn = Box<dyn FnOnce()>;

pub(crate) struct StateSlot {
    /// Current value; replaced wholesale by the updater.
    pub(crate) value: Rc<dyn Any>,
    /// Stable updater handle created at slot allocation.
    pub(crate) updater: Rc<dyn SlotUpdater>,
}

pub(crate) struct EffectSlot {
    /// Guard list from the most recent call; `None` means "no guards".
    pub(crate) guards: Option<GuardList>,
    /// Thunk awaiting `effects()`, present only when guards changed.
    pub(crate) pending: Option<EffectFn>,
}

pub(crate) struct MemoSlot {
    pub(crate) value: Option<Rc<dyn Any>>,
    pub(crate) guards: Option<GuardList>,
}

#[derive(Default)]
pub(crate) struct Bucket {
    pub(crate) state_slots: Vec<StateSlot>,
    pub(crate) effects: Vec<EffectSlot>,
    /// Parallel-indexed to `effects`; holds the cleanup returned by the
    /// previous run of the effect at the same index.
    pub(crate) cleanups: Vec<Option<CleanupFn>>,
    pub(crate) memoizations: Vec<MemoSlot>,
    pub(crate) next_state_idx: usize,
    pub(crate) next_effect_idx: usize,
    pub(crate) next_memo_idx: usize,
}

impl Bucket {
    pub(crate) fn rewind_cursors(&mut self) {
        self.next_state_idx = 0;
        self.next_effect_idx = 0;
        self.next_memo_idx = 0;
    }

    pub(crate) fn has_pending_effects(&self) -> bool {
        self.effects.iter().any(|slot| slot.pending.is_some())
    }

    /// Takes the cleanup at `idx`, tolerating a missing or already-cleared
    /// entry.
    pub(crate) fn take_cleanup(&mut self, idx: usize) -> Option<CleanupFn> {
        self.cleanups.get_mut(idx).and_then(Option::take)
    }

    pub(crate) fn store_cleanup(&mut self, idx: usize, cleanup: CleanupFn) {
        if self.cleanups.len() <= idx {
            self.cleanups.resize_with(idx + 1, || None);
        }
        self.cleanups[idx] = Some(cleanup);
    }

    pub(crate) fn clear(&mut self) {
        self.state_slots.clear();
        self.effects.clear();
        self.cleanups.clear();
        self.memoizations.clear();
        self.rewind_cursors();
    }
}
