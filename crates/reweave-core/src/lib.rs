//! # Contexts, Slots, and Guarded Effects
//!
//! Reweave lets an ordinary function keep private, ordered state across
//! repeated invocations — no object instance, no explicit state argument.
//! There are three main pieces:
//!
//! - [`wrap`] / [`auto_wrap`] — turn a plain function into one whose calls
//!   share a [`Context`] lineage.
//! - Hook primitives ([`use_state`], [`use_reducer`], [`use_effect`],
//!   [`use_memo`], [`use_callback`], [`use_ref`], [`use_throttle`]) —
//!   ambient functions the body calls to read and write its slots.
//! - The notification scheduler — batches `state`/`effect`/`cleanup` events
//!   to subscribers, decoupled from the call that produced them.
//!
//! ## Wrapped functions
//!
//! A wrapped function returns its [`Context`]; the body's return value is
//! read off the context. Passing the context back in resumes the lineage:
//!
//! ```rust
//! use reweave_core::prelude::*;
//!
//! let counter = wrap(|step: i32| -> Result<i32, HookError> {
//!     let (count, set) = use_state(|| 0)?;
//!     set.update(move |n| n + step);
//!     Ok(count)
//! });
//!
//! let cx = counter.call(1)?;
//! assert_eq!(*cx.return_value::<i32>().unwrap(), 0);
//! let cx = counter.resume(&cx, 1)?;
//! assert_eq!(*cx.return_value::<i32>().unwrap(), 1);
//! # Ok::<(), reweave_core::HookError>(())
//! ```
//!
//! Slot identity is positional: the body must call its hooks in the same
//! order and count on every invocation of one context. Diverging after the
//! first run fails with [`HookError::ImmutableContextShape`].
//!
//! ## Effects and cleanup
//!
//! Effects are deferred. The body only queues them; the caller applies them
//! with [`Context::effects`] once the call returns:
//!
//! ```rust
//! use reweave_core::prelude::*;
//!
//! let ticker = wrap(|(): ()| -> Result<(), HookError> {
//!     use_effect_with(guards![], || {
//!         // runs once, when the caller applies effects
//!         on_cleanup(|| { /* runs on reset */ })
//!     })?;
//!     Ok(())
//! });
//!
//! let cx = ticker.call(())?;
//! assert_eq!(cx.state(), Lifecycle::Pending);
//! cx.effects()?;
//! assert_eq!(cx.state(), Lifecycle::Ready);
//! # Ok::<(), reweave_core::HookError>(())
//! ```
//!
//! No guards re-runs the effect every call; `guards![]` runs it once;
//! `guards![a, b]` re-runs it when a guard stops being same-value equal
//! (NaN equals NaN, `0.0` and `-0.0` differ, `Rc` by pointer).
//!
//! ## Custom hooks
//!
//! Any plain function called from inside an active body may itself call hook
//! primitives; it consumes slots from whichever context is on top of the
//! call stack. That is the whole delegation mechanism — no registration.
//!
//! ## Auto functions
//!
//! [`auto_wrap`] hides the bookkeeping: each call re-supplies the previous
//! context, applies pending effects immediately, and returns the bare value:
//!
//! ```rust
//! use reweave_core::prelude::*;
//!
//! let count = auto_wrap(|step: i32| -> Result<i32, HookError> {
//!     let (n, set) = use_state(|| 0)?;
//!     set.update(move |n| n + step);
//!     Ok(n)
//! });
//! assert_eq!(*count.call(2)?, 0);
//! assert_eq!(*count.call(2)?, 2);
//! # Ok::<(), reweave_core::HookError>(())
//! ```
//!
//! ## Notifications
//!
//! Subscribe per wrapped function with [`Listeners`]; delivery happens in
//! enqueue order on the next tick — when the engine goes idle, when a host
//! runs the [`Tick`] handed to its [`set_defer`] hook, or on an explicit
//! [`flush`]. A panicking listener is skipped, never fatal.

pub mod clock;
pub mod context;
pub mod error;
pub mod events;
pub mod guards;
pub mod hooks;
pub mod prelude;
pub mod scheduler;
pub mod wrap;

mod bucket;
mod runtime;

pub mod tests;

pub use clock::*;
pub use context::*;
pub use error::*;
pub use events::*;
pub use guards::*;
pub use hooks::*;
pub use scheduler::{Tick, clear_defer, flush, set_defer};
pub use wrap::*;
