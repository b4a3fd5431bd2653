//! The hook primitives.
//!
//! All of these are ambient: they address the topmost context on the
//! thread's call stack, so they work equally from a wrapped function body or
//! from any plain helper it calls (a "custom hook"). Outside an active
//! context they fail with [`HookError::NoActiveContext`].
//!
//! Guard-taking primitives come in pairs. The bare form passes no guards —
//! for effects that means "re-run every call", for memoizations "keyed on the
//! callable's identity". The `_with` form takes an explicit [`GuardList`]
//! built with [`guards!`](macro@crate::guards); an empty list means "run
//! once".

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use web_time::{Duration, Instant};

use crate::bucket::{CleanupFn, EffectSlot, MemoSlot, StateSlot};
use crate::clock;
use crate::context::{Context, ContextInner};
use crate::error::HookError;
use crate::events::Notification;
use crate::guards::{Guard, GuardList, SameValue, guards_changed};
use crate::runtime;
use crate::scheduler;

fn with_active_context<T>(
    f: impl FnOnce(&Rc<ContextInner>, bool) -> Result<T, HookError>,
) -> Result<T, HookError> {
    match runtime::current_frame() {
        Some((context, open_shape)) => f(&context, open_shape),
        None => Err(HookError::NoActiveContext),
    }
}

/// Type-erased updater stored in a state slot. Created once per slot; clones
/// of a lineage rebind it to the new context.
pub(crate) trait SlotUpdater: 'static {
    fn rebind(&self, context: &Rc<ContextInner>, slot: usize) -> Rc<dyn SlotUpdater>;
    fn as_any(&self) -> &dyn Any;
}

/// Stable update handle returned by [`use_reducer`].
///
/// Dispatching computes `reducer(&current, action)`, replaces the slot value
/// in place, and queues a `state` notification. A dispatch that outlives its
/// lineage (context dropped, or slots cleared by a reset) is dropped with a
/// log warning rather than panicking.
pub struct Dispatch<A: 'static> {
    inner: Rc<DispatchInner<A>>,
}

struct DispatchInner<A> {
    context: Weak<ContextInner>,
    slot: usize,
    reducer: Rc<dyn Fn(&dyn Any, A) -> Option<Rc<dyn Any>>>,
}

impl<A: 'static> Dispatch<A> {
    pub fn dispatch(&self, action: A) {
        let Some(context) = self.inner.context.upgrade() else {
            log::debug!("state update dropped: context no longer exists");
            return;
        };
        let slot = self.inner.slot;
        let prev = {
            let bucket = context.bucket.borrow();
            match bucket.state_slots.get(slot) {
                Some(entry) => entry.value.clone(),
                None => {
                    log::warn!("state update dropped: slot {slot} no longer exists");
                    return;
                }
            }
        };
        // Reducer runs without any bucket borrow held; it may freely call
        // other hooks or dispatches.
        let Some(next) = (self.inner.reducer)(&*prev, action) else {
            log::warn!("state update dropped: slot {slot} holds a different type");
            return;
        };
        {
            let mut bucket = context.bucket.borrow_mut();
            let Some(entry) = bucket.state_slots.get_mut(slot) else {
                log::warn!("state update dropped: slot {slot} no longer exists");
                return;
            };
            entry.value = next.clone();
        }
        scheduler::schedule(
            context.hub.clone(),
            Notification::State {
                context: Context::handle(&context),
                slot,
                prev,
                next,
            },
        );
    }
}

impl<A: 'static> Clone for Dispatch<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: 'static> SlotUpdater for Dispatch<A> {
    fn rebind(&self, context: &Rc<ContextInner>, slot: usize) -> Rc<dyn SlotUpdater> {
        Rc::new(Self {
            inner: Rc::new(DispatchInner {
                context: Rc::downgrade(context),
                slot,
                reducer: self.inner.reducer.clone(),
            }),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reducer-backed state slot.
///
/// The slot is allocated on the first call while the context shape is open
/// (initial value computed lazily); afterwards the same `(value, dispatch)`
/// pair is returned on every call at this position.
pub fn use_reducer<T, A, R>(
    reducer: R,
    init: impl FnOnce() -> T,
) -> Result<(T, Dispatch<A>), HookError>
where
    T: Clone + 'static,
    A: 'static,
    R: Fn(&T, A) -> T + 'static,
{
    reducer_slot(reducer, init, None)
}

/// [`use_reducer`], dispatching `action` once at first allocation.
pub fn use_reducer_with_action<T, A, R>(
    reducer: R,
    init: impl FnOnce() -> T,
    action: A,
) -> Result<(T, Dispatch<A>), HookError>
where
    T: Clone + 'static,
    A: 'static,
    R: Fn(&T, A) -> T + 'static,
{
    reducer_slot(reducer, init, Some(action))
}

fn reducer_slot<T, A, R>(
    reducer: R,
    init: impl FnOnce() -> T,
    initial_action: Option<A>,
) -> Result<(T, Dispatch<A>), HookError>
where
    T: Clone + 'static,
    A: 'static,
    R: Fn(&T, A) -> T + 'static,
{
    with_active_context(|context, open_shape| {
        let (slot_idx, exists) = {
            let mut bucket = context.bucket.borrow_mut();
            let idx = bucket.next_state_idx;
            bucket.next_state_idx += 1;
            (idx, idx < bucket.state_slots.len())
        };

        let dispatch = if exists {
            let updater = context.bucket.borrow().state_slots[slot_idx].updater.clone();
            updater
                .as_any()
                .downcast_ref::<Dispatch<A>>()
                .cloned()
                .ok_or(HookError::ImmutableContextShape)?
        } else {
            if !open_shape {
                return Err(HookError::ImmutableContextShape);
            }
            // Initial value is computed lazily, outside any bucket borrow.
            let value: Rc<dyn Any> = Rc::new(init());
            let reducer = Rc::new(reducer);
            let erased: Rc<dyn Fn(&dyn Any, A) -> Option<Rc<dyn Any>>> =
                Rc::new(move |prev: &dyn Any, action: A| {
                    let prev = prev.downcast_ref::<T>()?;
                    Some(Rc::new(reducer(prev, action)) as Rc<dyn Any>)
                });
            let dispatch = Dispatch {
                inner: Rc::new(DispatchInner {
                    context: Rc::downgrade(context),
                    slot: slot_idx,
                    reducer: erased,
                }),
            };
            {
                let mut bucket = context.bucket.borrow_mut();
                debug_assert_eq!(slot_idx, bucket.state_slots.len());
                bucket.state_slots.push(StateSlot {
                    value,
                    updater: Rc::new(dispatch.clone()),
                });
            }
            if let Some(action) = initial_action {
                dispatch.dispatch(action);
            }
            dispatch
        };

        let value = context.bucket.borrow().state_slots[slot_idx].value.clone();
        let value = value
            .downcast::<T>()
            .map_err(|_| HookError::ImmutableContextShape)?;
        Ok(((*value).clone(), dispatch))
    })
}

enum StateUpdate<T> {
    Set(T),
    Apply(Box<dyn FnOnce(&T) -> T>),
}

/// Stable setter returned by [`use_state`].
pub struct Setter<T: 'static> {
    dispatch: Dispatch<StateUpdate<T>>,
}

impl<T: 'static> Setter<T> {
    /// Replaces the slot value.
    pub fn set(&self, value: T) {
        self.dispatch.dispatch(StateUpdate::Set(value));
    }

    /// Replaces the slot value with `producer(&previous)`.
    pub fn update(&self, producer: impl FnOnce(&T) -> T + 'static) {
        self.dispatch.dispatch(StateUpdate::Apply(Box::new(producer)));
    }
}

impl<T: 'static> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Self {
            dispatch: self.dispatch.clone(),
        }
    }
}

/// Plain state slot: [`use_reducer`] with a replace-or-apply reducer.
pub fn use_state<T: Clone + 'static>(
    init: impl FnOnce() -> T,
) -> Result<(T, Setter<T>), HookError> {
    let (value, dispatch) = use_reducer(
        |prev: &T, update: StateUpdate<T>| match update {
            StateUpdate::Set(value) => value,
            StateUpdate::Apply(producer) => producer(prev),
        },
        init,
    )?;
    Ok((value, Setter { dispatch }))
}

/// Cleanup handed back by an effect body; see [`on_cleanup`].
pub struct Cleanup(pub(crate) Option<CleanupFn>);

/// Registers `f` to run before this effect's next application and on
/// `reset()`.
pub fn on_cleanup(f: impl FnOnce() + 'static) -> Cleanup {
    Cleanup(Some(Box::new(f)))
}

/// What an effect body may return: `()` for no cleanup, or a [`Cleanup`].
pub trait IntoCleanup {
    fn into_cleanup(self) -> Cleanup;
}

impl IntoCleanup for () {
    fn into_cleanup(self) -> Cleanup {
        Cleanup(None)
    }
}

impl IntoCleanup for Cleanup {
    fn into_cleanup(self) -> Cleanup {
        self
    }
}

/// Deferred effect with no guards: re-queued on every call.
///
/// The body does not run here; it runs when the caller applies the context's
/// pending effects.
pub fn use_effect<C: IntoCleanup>(f: impl FnOnce() -> C + 'static) -> Result<(), HookError> {
    effect_slot(None, f)
}

/// Deferred effect gated on `guards`; an empty list runs exactly once.
pub fn use_effect_with<C: IntoCleanup>(
    guards: GuardList,
    f: impl FnOnce() -> C + 'static,
) -> Result<(), HookError> {
    effect_slot(Some(guards), f)
}

fn effect_slot<C: IntoCleanup>(
    guards: Option<GuardList>,
    f: impl FnOnce() -> C + 'static,
) -> Result<(), HookError> {
    with_active_context(|context, open_shape| {
        let mut bucket = context.bucket.borrow_mut();
        let idx = bucket.next_effect_idx;
        bucket.next_effect_idx += 1;
        if idx >= bucket.effects.len() {
            if !open_shape {
                return Err(HookError::ImmutableContextShape);
            }
            debug_assert_eq!(idx, bucket.effects.len());
            bucket.effects.push(EffectSlot {
                guards: None,
                pending: None,
            });
        }
        let slot = &mut bucket.effects[idx];
        if guards_changed(slot.guards.as_ref(), guards.as_ref()) {
            slot.pending = Some(Box::new(move || f().into_cleanup().0));
        }
        // Stored regardless of change, for the next comparison.
        slot.guards = guards;
        Ok(())
    })
}

/// Guard token for the bare memo/callback forms: the callable's type stands
/// in for its identity, since Rust closures have none across calls.
struct FnToken(TypeId);

impl SameValue for FnToken {
    fn same_value(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

fn identity_guards<F: 'static>() -> GuardList {
    let mut guards = GuardList::new();
    guards.push(Guard::of(FnToken(TypeId::of::<F>())));
    guards
}

/// Memoized computation keyed on the callable's identity: the same call site
/// never recomputes; passing a different function type does.
pub fn use_memo<T: 'static, F: FnOnce() -> T + 'static>(f: F) -> Result<Rc<T>, HookError> {
    memo_slot(identity_guards::<F>(), f)
}

/// Memoized computation gated on `guards`; recomputes iff they changed.
pub fn use_memo_with<T: 'static>(
    guards: GuardList,
    f: impl FnOnce() -> T,
) -> Result<Rc<T>, HookError> {
    memo_slot(guards, f)
}

fn memo_slot<T: 'static>(guards: GuardList, f: impl FnOnce() -> T) -> Result<Rc<T>, HookError> {
    with_active_context(|context, open_shape| {
        let idx = {
            let mut bucket = context.bucket.borrow_mut();
            let idx = bucket.next_memo_idx;
            if idx >= bucket.memoizations.len() {
                if !open_shape {
                    return Err(HookError::ImmutableContextShape);
                }
                debug_assert_eq!(idx, bucket.memoizations.len());
                bucket.memoizations.push(MemoSlot {
                    value: None,
                    guards: None,
                });
            }
            bucket.next_memo_idx += 1;
            idx
        };

        let changed = {
            let bucket = context.bucket.borrow();
            guards_changed(bucket.memoizations[idx].guards.as_ref(), Some(&guards))
        };
        if changed {
            // Compute outside any bucket borrow; `f` may call hooks.
            let value: Rc<dyn Any> = Rc::new(f());
            let mut bucket = context.bucket.borrow_mut();
            let slot = &mut bucket.memoizations[idx];
            slot.value = Some(value);
            slot.guards = Some(guards);
        }

        let value = context.bucket.borrow().memoizations[idx].value.clone();
        value
            .and_then(|value| value.downcast::<T>().ok())
            .ok_or(HookError::ImmutableContextShape)
    })
}

/// Memoizes the callable itself, returning a stable `Rc<F>` until the guards
/// change. The bare form is keyed on the callable's identity, so the first
/// instance passed at this call site is the one every later call receives.
pub fn use_callback<F: 'static>(f: F) -> Result<Rc<F>, HookError> {
    memo_slot(identity_guards::<F>(), move || f)
}

/// [`use_callback`] gated on an explicit guard list.
pub fn use_callback_with<F: 'static>(guards: GuardList, f: F) -> Result<Rc<F>, HookError> {
    memo_slot(guards, move || f)
}

/// A state slot seeded with a shared mutable cell. The cell's identity is
/// stable for the lineage's lifetime; mutate through `borrow_mut`.
pub fn use_ref<T: 'static>(init: impl FnOnce() -> T) -> Result<Rc<RefCell<T>>, HookError> {
    let (cell, _) = use_state(|| Rc::new(RefCell::new(init())))?;
    Ok(cell)
}

struct ThrottleSlot<A> {
    callable: RefCell<Box<dyn FnMut(A)>>,
    interval: Duration,
    last_run: Cell<Option<Instant>>,
}

/// Stable rate-limited wrapper returned by [`use_throttle`].
pub struct Throttled<A: 'static> {
    inner: Rc<ThrottleSlot<A>>,
}

impl<A: 'static> Throttled<A> {
    /// Runs the wrapped callable unless it already ran within the interval.
    pub fn call(&self, args: A) {
        let now = clock::now();
        let due = match self.inner.last_run.get() {
            Some(last) => now.saturating_duration_since(last) > self.inner.interval,
            None => true,
        };
        if !due {
            return;
        }
        self.inner.last_run.set(Some(now));
        let mut callable = self.inner.callable.borrow_mut();
        (*callable)(args);
    }
}

impl<A: 'static> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Rate-limited callable in a single state slot: the callable, its interval,
/// and the last-run timestamp, with a stable wrapper across calls.
pub fn use_throttle<A: 'static>(
    f: impl FnMut(A) + 'static,
    interval: Duration,
) -> Result<Throttled<A>, HookError> {
    let (inner, _) = use_state(|| {
        Rc::new(ThrottleSlot {
            callable: RefCell::new(Box::new(f) as Box<dyn FnMut(A)>),
            interval,
            last_run: Cell::new(None),
        })
    })?;
    Ok(Throttled { inner })
}
