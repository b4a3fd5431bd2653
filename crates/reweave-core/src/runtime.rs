//! Thread-local engine state: the stack of active contexts and the identity
//! counter for wrapped functions.
//!
//! Hook primitives always address the topmost frame, which is what lets a
//! plain helper function ("custom hook") consume slots belonging to whichever
//! wrapped function invoked it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::context::ContextInner;

pub(crate) type FunctionId = u64;

struct Frame {
    context: Rc<ContextInner>,
    /// Whether slot allocation is permitted for this call; captured at entry
    /// so the first run of a fresh (or freshly reset) context can build its
    /// shape while the visible lifecycle is already `Active`.
    open_shape: bool,
}

#[derive(Default)]
struct Runtime {
    stack: Vec<Frame>,
    /// Depth of in-flight dispatch, effect application, or reset. The
    /// scheduler only drains once this returns to zero.
    busy: usize,
    next_function_id: FunctionId,
}

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

pub(crate) fn next_function_id() -> FunctionId {
    RUNTIME.with(|r| {
        let mut r = r.borrow_mut();
        r.next_function_id += 1;
        r.next_function_id
    })
}

pub(crate) fn current_frame() -> Option<(Rc<ContextInner>, bool)> {
    RUNTIME.with(|r| {
        r.borrow()
            .stack
            .last()
            .map(|frame| (frame.context.clone(), frame.open_shape))
    })
}

pub(crate) fn is_busy() -> bool {
    RUNTIME.with(|r| r.borrow().busy > 0)
}

/// Pushes a context frame; popped (and the scheduler poked) on drop.
pub(crate) fn push_frame(context: Rc<ContextInner>, open_shape: bool) -> FrameGuard {
    RUNTIME.with(|r| {
        let mut r = r.borrow_mut();
        r.stack.push(Frame {
            context,
            open_shape,
        });
        r.busy += 1;
    });
    FrameGuard
}

pub(crate) struct FrameGuard;

impl Drop for FrameGuard {
    fn drop(&mut self) {
        let idle = RUNTIME.with(|r| {
            let mut r = r.borrow_mut();
            r.stack.pop();
            r.busy -= 1;
            r.busy == 0
        });
        if idle && !std::thread::panicking() {
            crate::scheduler::on_idle();
        }
    }
}

/// Marks the runtime busy without a stack frame (effect application).
pub(crate) fn enter_busy() -> BusyGuard {
    RUNTIME.with(|r| r.borrow_mut().busy += 1);
    BusyGuard
}

pub(crate) struct BusyGuard;

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let idle = RUNTIME.with(|r| {
            let mut r = r.borrow_mut();
            r.busy -= 1;
            r.busy == 0
        });
        if idle && !std::thread::panicking() {
            crate::scheduler::on_idle();
        }
    }
}
