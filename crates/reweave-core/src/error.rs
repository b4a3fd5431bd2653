use thiserror::Error;

/// Contract violations surfaced synchronously at the call site.
///
/// None of these are retried or recovered internally; they all mean the
/// caller broke the hook protocol (wrong lifecycle state, wrong owner, or a
/// call pattern that diverged between invocations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HookError {
    /// A hook primitive was called with no context on the call stack.
    #[error("hook called outside a wrapped function or custom hook")]
    NoActiveContext,

    /// A context was passed back in while it is executing or locked.
    #[error("context is currently in use")]
    ContextBusy,

    /// A context was passed back in while its effects are still pending.
    #[error("context has pending effects that must be applied first")]
    ContextHasPendingEffects,

    /// A context was passed to a wrapped function other than its owner.
    #[error("context belongs to a different wrapped function")]
    ContextOwnershipMismatch,

    /// A hook tried to allocate a new slot after the context shape was
    /// committed, or revisited a slot with a different type.
    #[error("context shape cannot be modified")]
    ImmutableContextShape,

    /// `clone()` was called on a context that is not ready.
    #[error("context is not ready to be cloned")]
    ContextNotCloneable,

    /// `effects()` was called on a context with nothing pending.
    #[error("context has no pending effects")]
    NoPendingEffects,
}
