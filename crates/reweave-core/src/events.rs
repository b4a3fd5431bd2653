//! Per-wrapped-function event hub.
//!
//! Three independent listener sets (`state`, `effect`, `cleanup`). Listeners
//! are registered under slotmap keys so they can be removed by identity, and
//! every delivery is isolated: a panicking listener is logged and skipped,
//! never aborting the remaining listeners or the drain.

use std::any::Any;
use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::context::Context;

new_key_type! {
    pub struct ListenerKey;
}

/// A state slot was updated. `prev`/`next` are the type-erased old and new
/// values; downcast to the slot's type to inspect them.
pub struct StateEvent {
    pub context: Context,
    pub slot: usize,
    pub prev: Rc<dyn Any>,
    pub next: Rc<dyn Any>,
}

/// An effect thunk was applied.
pub struct EffectEvent {
    pub context: Context,
    pub slot: usize,
}

/// A cleanup thunk ran (before an effect re-run, or during reset).
pub struct CleanupEvent {
    pub context: Context,
    pub slot: usize,
}

type StateListener = Rc<dyn Fn(&StateEvent)>;
type EffectListener = Rc<dyn Fn(&EffectEvent)>;
type CleanupListener = Rc<dyn Fn(&CleanupEvent)>;

/// Listener bundle for [`subscribe`](crate::Wrapped::subscribe); any subset
/// of the three channels may be present.
#[derive(Default)]
pub struct Listeners {
    pub(crate) state: Option<StateListener>,
    pub(crate) effect: Option<EffectListener>,
    pub(crate) cleanup: Option<CleanupListener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_state(mut self, listener: impl Fn(&StateEvent) + 'static) -> Self {
        self.state = Some(Rc::new(listener));
        self
    }

    pub fn on_effect(mut self, listener: impl Fn(&EffectEvent) + 'static) -> Self {
        self.effect = Some(Rc::new(listener));
        self
    }

    pub fn on_cleanup(mut self, listener: impl Fn(&CleanupEvent) + 'static) -> Self {
        self.cleanup = Some(Rc::new(listener));
        self
    }
}

/// Keys identifying a registered listener bundle, for unsubscribing.
#[derive(Clone, Debug, Default)]
pub struct Subscription {
    state: Option<ListenerKey>,
    effect: Option<ListenerKey>,
    cleanup: Option<ListenerKey>,
}

/// Queued, not-yet-delivered notification. Built while slots mutate, emitted
/// later by the scheduler drain.
pub(crate) enum Notification {
    State {
        context: Context,
        slot: usize,
        prev: Rc<dyn Any>,
        next: Rc<dyn Any>,
    },
    Effect {
        context: Context,
        slot: usize,
    },
    Cleanup {
        context: Context,
        slot: usize,
    },
}

#[derive(Default)]
pub(crate) struct EventHub {
    state: RefCell<SlotMap<ListenerKey, StateListener>>,
    effect: RefCell<SlotMap<ListenerKey, EffectListener>>,
    cleanup: RefCell<SlotMap<ListenerKey, CleanupListener>>,
}

impl EventHub {
    pub(crate) fn subscribe(&self, listeners: Listeners) -> Subscription {
        Subscription {
            state: listeners
                .state
                .map(|l| self.state.borrow_mut().insert(l)),
            effect: listeners
                .effect
                .map(|l| self.effect.borrow_mut().insert(l)),
            cleanup: listeners
                .cleanup
                .map(|l| self.cleanup.borrow_mut().insert(l)),
        }
    }

    pub(crate) fn unsubscribe(&self, subscription: &Subscription) {
        if let Some(key) = subscription.state {
            self.state.borrow_mut().remove(key);
        }
        if let Some(key) = subscription.effect {
            self.effect.borrow_mut().remove(key);
        }
        if let Some(key) = subscription.cleanup {
            self.cleanup.borrow_mut().remove(key);
        }
    }

    /// Delivers one notification to every listener on its channel.
    /// Runs inside the scheduler drain; listener re-entry into subscribe or
    /// unsubscribe is fine because the listener list is snapshotted first.
    pub(crate) fn emit(&self, notification: Notification) {
        match notification {
            Notification::State {
                context,
                slot,
                prev,
                next,
            } => {
                let event = StateEvent {
                    context,
                    slot,
                    prev,
                    next,
                };
                let listeners: Vec<_> = self.state.borrow().values().cloned().collect();
                for listener in listeners {
                    deliver(|| listener(&event));
                }
            }
            Notification::Effect { context, slot } => {
                let event = EffectEvent { context, slot };
                let listeners: Vec<_> = self.effect.borrow().values().cloned().collect();
                for listener in listeners {
                    deliver(|| listener(&event));
                }
            }
            Notification::Cleanup { context, slot } => {
                let event = CleanupEvent { context, slot };
                let listeners: Vec<_> = self.cleanup.borrow().values().cloned().collect();
                for listener in listeners {
                    deliver(|| listener(&event));
                }
            }
        }
    }
}

fn deliver(call: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(call)).is_err() {
        log::warn!("event listener panicked during delivery; continuing");
    }
}
