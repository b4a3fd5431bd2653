//! The wrapping facade.
//!
//! [`wrap`] turns a plain function into a [`Wrapped`] callable whose
//! invocations share a [`Context`] lineage; [`auto_wrap`] layers the
//! self-threading [`Auto`] variant on top, which re-supplies its own context,
//! applies effects immediately, and hands back the bare return value.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::context::{Context, Lifecycle};
use crate::error::HookError;
use crate::events::{EventHub, Listeners, Subscription};
use crate::runtime::{self, FunctionId};

/// How a wrapped function is being invoked: starting a fresh lineage, or
/// resuming an existing one.
pub enum CallArg<'c, A> {
    Fresh(A),
    Resume(&'c Context, A),
}

/// A function processed by [`wrap`]. Cloning shares identity, lineage
/// ownership, and the event hub.
pub struct Wrapped<A, R> {
    id: FunctionId,
    hub: Rc<EventHub>,
    body: Rc<dyn Fn(A) -> Result<R, HookError>>,
}

impl<A, R> Clone for Wrapped<A, R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            hub: self.hub.clone(),
            body: self.body.clone(),
        }
    }
}

/// Wraps `f` so that calling it manages context and bucket lifecycle.
///
/// The body receives its plain arguments and reads its slots through the
/// ambient hook primitives. Calls return the [`Context`], not the body's
/// return value; read that through [`Context::return_value`].
pub fn wrap<A, R: 'static>(f: impl Fn(A) -> Result<R, HookError> + 'static) -> Wrapped<A, R> {
    Wrapped {
        id: runtime::next_function_id(),
        hub: Rc::new(EventHub::default()),
        body: Rc::new(f),
    }
}

impl<A, R: 'static> Wrapped<A, R> {
    /// Starts a fresh lineage.
    pub fn call(&self, args: A) -> Result<Context, HookError> {
        self.invoke(CallArg::Fresh(args))
    }

    /// Resumes an existing lineage. The context must belong to this wrapped
    /// function and be `Open` or `Ready`.
    pub fn resume(&self, context: &Context, args: A) -> Result<Context, HookError> {
        self.invoke(CallArg::Resume(context, args))
    }

    pub fn invoke(&self, call: CallArg<'_, A>) -> Result<Context, HookError> {
        let (context, args) = match call {
            CallArg::Fresh(args) => (Context::fresh(self.id, self.hub.clone()), args),
            CallArg::Resume(context, args) => {
                if context.inner.owner != self.id {
                    return Err(HookError::ContextOwnershipMismatch);
                }
                match context.state() {
                    Lifecycle::Open | Lifecycle::Ready => {}
                    Lifecycle::Active | Lifecycle::Locked => {
                        return Err(HookError::ContextBusy);
                    }
                    Lifecycle::Pending => {
                        return Err(HookError::ContextHasPendingEffects);
                    }
                }
                (Context::handle(&context.inner), args)
            }
        };

        // Slot allocation is permitted only for calls entered with an open
        // shape; the flag rides on the stack frame because the visible
        // lifecycle is Active either way.
        let open_shape = context.state() == Lifecycle::Open;
        context.inner.lifecycle.set(Lifecycle::Active);
        context.inner.bucket.borrow_mut().rewind_cursors();
        *context.inner.return_value.borrow_mut() = None;

        let result = {
            let _frame = runtime::push_frame(context.inner.clone(), open_shape);
            let result = (self.body)(args);
            let result = match result {
                Ok(value) => {
                    *context.inner.return_value.borrow_mut() =
                        Some(Rc::new(value) as Rc<dyn Any>);
                    Ok(())
                }
                Err(err) => Err(err),
            };
            // Settle the lifecycle before the frame unwinds, so listeners
            // delivered at idle observe the post-call state.
            let settled = if context.inner.bucket.borrow().has_pending_effects() {
                Lifecycle::Pending
            } else {
                Lifecycle::Ready
            };
            context.inner.lifecycle.set(settled);
            result
        };

        result.map(|()| context)
    }

    /// Registers listeners on this function's event hub.
    pub fn subscribe(&self, listeners: Listeners) -> Subscription {
        self.hub.subscribe(listeners)
    }

    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.hub.unsubscribe(subscription);
    }
}

/// Self-threading variant produced by [`auto_wrap`]: hides the context
/// bookkeeping entirely.
pub struct Auto<A, R> {
    wrapped: Wrapped<A, R>,
    lineage: RefCell<Option<Context>>,
}

pub fn auto_wrap<A, R: 'static>(f: impl Fn(A) -> Result<R, HookError> + 'static) -> Auto<A, R> {
    Auto {
        wrapped: wrap(f),
        lineage: RefCell::new(None),
    }
}

impl<A, R: 'static> Auto<A, R> {
    /// Calls the function, re-supplying the previous context if any, applies
    /// pending effects immediately, and returns the bare return value.
    pub fn call(&self, args: A) -> Result<Rc<R>, HookError> {
        let previous = self.lineage.borrow_mut().take();
        let result = match &previous {
            Some(context) => self.wrapped.resume(context, args),
            None => self.wrapped.call(args),
        };
        let context = match result {
            Ok(context) => context,
            Err(err) => {
                *self.lineage.borrow_mut() = previous;
                return Err(err);
            }
        };
        if context.state() == Lifecycle::Pending {
            if let Err(err) = context.effects() {
                *self.lineage.borrow_mut() = Some(context);
                return Err(err);
            }
        }
        let value = context
            .return_value::<R>()
            .expect("wrapped call records its return value");
        *self.lineage.borrow_mut() = Some(context);
        Ok(value)
    }

    /// Resets the underlying lineage; a no-op before the first call.
    pub fn reset(&self) -> Result<(), HookError> {
        let Some(context) = self.lineage.borrow_mut().take() else {
            return Ok(());
        };
        let result = context.reset();
        *self.lineage.borrow_mut() = Some(context);
        result
    }

    /// Forks an independent auto function from the current lineage.
    #[allow(clippy::should_implement_trait)]
    pub fn clone(&self) -> Result<Self, HookError> {
        let lineage = match &*self.lineage.borrow() {
            Some(context) => Some(context.clone()?),
            None => None,
        };
        Ok(Self {
            wrapped: self.wrapped.clone(),
            lineage: RefCell::new(lineage),
        })
    }

    pub fn subscribe(&self, listeners: Listeners) -> Subscription {
        self.wrapped.subscribe(listeners)
    }

    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.wrapped.unsubscribe(subscription);
    }
}
