//! Hook contexts: the token for one continuous lineage of calls into a
//! wrapped function.
//!
//! A context owns its bucket outright; dropping every handle to a lineage
//! frees its slots with it. There is deliberately no `Clone` impl — the
//! inherent [`Context::clone`] is the structural lineage clone, valid only
//! from `Ready`.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::rc::Rc;

use crate::bucket::{Bucket, EffectSlot, MemoSlot, StateSlot};
use crate::error::HookError;
use crate::events::{EventHub, Notification};
use crate::runtime::{self, FunctionId};
use crate::scheduler;

/// Lifecycle of a [`Context`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// No slots committed yet (fresh, or just reset); the next call may
    /// build the context's shape.
    Open,
    /// The function body is currently executing inside this context.
    Active,
    /// The body returned and left at least one effect to apply.
    Pending,
    /// The body returned with nothing pending, or effects were just applied.
    Ready,
    /// Transient, during `effects()` or `reset()`.
    Locked,
}

pub struct Context {
    pub(crate) inner: Rc<ContextInner>,
}

pub(crate) struct ContextInner {
    pub(crate) lifecycle: Cell<Lifecycle>,
    pub(crate) bucket: RefCell<Bucket>,
    pub(crate) owner: FunctionId,
    pub(crate) hub: Rc<EventHub>,
    pub(crate) return_value: RefCell<Option<Rc<dyn Any>>>,
}

impl Context {
    pub(crate) fn fresh(owner: FunctionId, hub: Rc<EventHub>) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                lifecycle: Cell::new(Lifecycle::Open),
                bucket: RefCell::new(Bucket::default()),
                owner,
                hub,
                return_value: RefCell::new(None),
            }),
        }
    }

    /// Another handle to the same lineage. Internal only; the public
    /// `clone()` is structural.
    pub(crate) fn handle(inner: &Rc<ContextInner>) -> Self {
        Self {
            inner: inner.clone(),
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.inner.lifecycle.get()
    }

    /// The last value the wrapped function returned, if any.
    pub fn return_value<R: 'static>(&self) -> Option<Rc<R>> {
        self.inner
            .return_value
            .borrow()
            .clone()
            .and_then(|value| value.downcast::<R>().ok())
    }

    /// Applies pending effect thunks in slot-index order.
    ///
    /// Each application first runs (and clears) the previous cleanup at that
    /// index, then the effect body, then stores any returned cleanup. The
    /// matching `cleanup`/`effect` notifications are queued even when a thunk
    /// panics; the panic then resumes on this caller.
    pub fn effects(&self) -> Result<(), HookError> {
        if self.state() != Lifecycle::Pending {
            return Err(HookError::NoPendingEffects);
        }
        self.inner.lifecycle.set(Lifecycle::Locked);
        let busy = runtime::enter_busy();

        let outcome = run_pending_effects(&self.inner);

        let settled = if self.inner.bucket.borrow().has_pending_effects() {
            Lifecycle::Pending
        } else {
            Lifecycle::Ready
        };
        self.inner.lifecycle.set(settled);
        drop(busy);

        if let Err(panic) = outcome {
            resume_unwind(panic);
        }
        Ok(())
    }

    /// Runs every outstanding cleanup in index order, clears all slots and
    /// cursors, and returns the context to `Open`.
    ///
    /// A no-op when already `Open`; fails with `ContextBusy` when invoked
    /// re-entrantly from inside `effects()` or another `reset()`. Structural
    /// clearing completes even if a cleanup panics.
    pub fn reset(&self) -> Result<(), HookError> {
        match self.state() {
            Lifecycle::Open => return Ok(()),
            Lifecycle::Locked => return Err(HookError::ContextBusy),
            _ => {}
        }
        self.inner.lifecycle.set(Lifecycle::Locked);
        // Cleanups observe an active context, like the body that created
        // them; they may read slots but never reshape them.
        let frame = runtime::push_frame(self.inner.clone(), false);
        let clear = ClearOnDrop {
            inner: &self.inner,
        };

        let count = self.inner.bucket.borrow().cleanups.len();
        for idx in 0..count {
            let Some(cleanup) = self.inner.bucket.borrow_mut().take_cleanup(idx) else {
                continue;
            };
            let outcome = catch_unwind(AssertUnwindSafe(cleanup));
            scheduler::schedule(
                self.inner.hub.clone(),
                Notification::Cleanup {
                    context: Context::handle(&self.inner),
                    slot: idx,
                },
            );
            if let Err(panic) = outcome {
                resume_unwind(panic);
            }
        }

        drop(clear);
        drop(frame);
        Ok(())
    }

    /// Structurally clones a `Ready` lineage: state values are carried over
    /// into independent slots, effect slots keep only their guard lists,
    /// cleanups start empty, memoizations are copied.
    #[allow(clippy::should_implement_trait)]
    pub fn clone(&self) -> Result<Context, HookError> {
        if self.state() != Lifecycle::Ready {
            return Err(HookError::ContextNotCloneable);
        }
        let cloned = Context::fresh(self.inner.owner, self.inner.hub.clone());
        cloned.inner.lifecycle.set(Lifecycle::Ready);
        *cloned.inner.return_value.borrow_mut() = self.inner.return_value.borrow().clone();

        let src = self.inner.bucket.borrow();
        let mut dst = cloned.inner.bucket.borrow_mut();
        dst.next_state_idx = src.next_state_idx;
        dst.next_effect_idx = src.next_effect_idx;
        dst.next_memo_idx = src.next_memo_idx;
        dst.state_slots = src
            .state_slots
            .iter()
            .enumerate()
            .map(|(idx, slot)| StateSlot {
                value: slot.value.clone(),
                updater: slot.updater.rebind(&cloned.inner, idx),
            })
            .collect();
        dst.effects = src
            .effects
            .iter()
            .map(|slot| EffectSlot {
                guards: slot.guards.clone(),
                pending: None,
            })
            .collect();
        dst.cleanups = Vec::new();
        dst.memoizations = src
            .memoizations
            .iter()
            .map(|slot| MemoSlot {
                value: slot.value.clone(),
                guards: slot.guards.clone(),
            })
            .collect();
        drop(dst);
        drop(src);

        Ok(cloned)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Restores the bucket and lifecycle to the open state when dropped, so a
/// panicking cleanup cannot leave a half-reset lineage behind.
struct ClearOnDrop<'a> {
    inner: &'a Rc<ContextInner>,
}

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.inner.bucket.borrow_mut().clear();
        *self.inner.return_value.borrow_mut() = None;
        self.inner.lifecycle.set(Lifecycle::Open);
    }
}

type PanicPayload = Box<dyn Any + Send>;

fn run_pending_effects(inner: &Rc<ContextInner>) -> Result<(), PanicPayload> {
    let count = inner.bucket.borrow().effects.len();
    for idx in 0..count {
        let pending = inner
            .bucket
            .borrow_mut()
            .effects
            .get_mut(idx)
            .and_then(|slot| slot.pending.take());
        let Some(effect) = pending else {
            continue;
        };
        apply_effect(inner, idx, effect)?;
    }
    Ok(())
}

fn apply_effect(
    inner: &Rc<ContextInner>,
    idx: usize,
    effect: crate::bucket::EffectFn,
) -> Result<(), PanicPayload> {
    // Previous cleanup runs strictly before the new effect body. Its slot is
    // cleared up front and its notification queued whether or not it panics.
    if let Some(cleanup) = inner.bucket.borrow_mut().take_cleanup(idx) {
        let outcome = catch_unwind(AssertUnwindSafe(cleanup));
        scheduler::schedule(
            inner.hub.clone(),
            Notification::Cleanup {
                context: Context::handle(inner),
                slot: idx,
            },
        );
        outcome?;
    }

    let outcome = catch_unwind(AssertUnwindSafe(effect));
    let result = match outcome {
        Ok(cleanup) => {
            if let Some(cleanup) = cleanup {
                inner.bucket.borrow_mut().store_cleanup(idx, cleanup);
            }
            Ok(())
        }
        Err(panic) => Err(panic),
    };
    scheduler::schedule(
        inner.hub.clone(),
        Notification::Effect {
            context: Context::handle(inner),
            slot: idx,
        },
    );
    result
}
