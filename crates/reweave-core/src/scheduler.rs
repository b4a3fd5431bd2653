//! Deferred notification delivery.
//!
//! Every notification a call produces is queued here and delivered in enqueue
//! order, one batch per tick, decoupled from the call that triggered it. By
//! default a tick runs as soon as the runtime goes idle (no call, effect
//! application, or reset in flight). Hosts with their own event loop can
//! install a defer hook with [`set_defer`] and run the [`Tick`] whenever they
//! schedule deferred work; tests can also just call [`flush`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::events::{EventHub, Notification};

#[derive(Default)]
struct Scheduler {
    queue: VecDeque<(Rc<EventHub>, Notification)>,
    draining: bool,
    tick_requested: bool,
    defer: Option<Rc<dyn Fn(Tick)>>,
}

thread_local! {
    static SCHEDULER: RefCell<Scheduler> = RefCell::new(Scheduler::default());
}

/// A pending drain, handed to the defer hook. Run it to deliver everything
/// queued so far; dropping it unspent re-arms the scheduler so a later
/// notification requests a fresh tick.
pub struct Tick {
    spent: bool,
}

impl Tick {
    pub fn run(mut self) {
        self.spent = true;
        drain();
    }
}

impl Drop for Tick {
    fn drop(&mut self) {
        if !self.spent {
            SCHEDULER.with(|s| s.borrow_mut().tick_requested = false);
        }
    }
}

/// Installs a defer hook for this thread, replacing the idle-drain default.
pub fn set_defer(defer: impl Fn(Tick) + 'static) {
    SCHEDULER.with(|s| s.borrow_mut().defer = Some(Rc::new(defer)));
}

/// Removes the defer hook, restoring the idle-drain default.
pub fn clear_defer() {
    SCHEDULER.with(|s| s.borrow_mut().defer = None);
}

/// Delivers everything queued so far, synchronously.
pub fn flush() {
    drain();
}

pub(crate) fn schedule(hub: Rc<EventHub>, notification: Notification) {
    let defer = SCHEDULER.with(|s| {
        let mut s = s.borrow_mut();
        s.queue.push_back((hub, notification));
        // An in-progress drain picks up new items itself, and a requested
        // tick covers everything queued before it runs.
        if s.draining || s.tick_requested {
            return None;
        }
        s.tick_requested = true;
        Some(s.defer.clone())
    });
    match defer {
        Some(Some(defer)) => defer(Tick { spent: false }),
        Some(None) => {
            if !crate::runtime::is_busy() {
                drain();
            }
            // Otherwise the frame/busy guard drains on idle.
        }
        None => {}
    }
}

/// Called by the runtime when the last frame or lock unwinds.
pub(crate) fn on_idle() {
    let due = SCHEDULER.with(|s| {
        let s = s.borrow();
        s.tick_requested && !s.draining && s.defer.is_none()
    });
    if due {
        drain();
    }
}

fn drain() {
    let already_draining = SCHEDULER.with(|s| {
        let mut s = s.borrow_mut();
        if s.draining {
            true
        } else {
            s.draining = true;
            false
        }
    });
    if already_draining {
        return;
    }

    loop {
        let batch: Vec<_> = SCHEDULER.with(|s| s.borrow_mut().queue.drain(..).collect());
        if batch.is_empty() {
            break;
        }
        for (hub, notification) in batch {
            hub.emit(notification);
        }
    }

    SCHEDULER.with(|s| {
        let mut s = s.borrow_mut();
        s.draining = false;
        s.tick_requested = false;
    });
}
