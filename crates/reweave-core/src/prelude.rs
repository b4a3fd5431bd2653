pub use crate::clock::{Clock, SystemClock, TestClock, set_clock};
pub use crate::context::{Context, Lifecycle};
pub use crate::error::HookError;
pub use crate::events::{CleanupEvent, EffectEvent, Listeners, StateEvent, Subscription};
pub use crate::guards::{Guard, GuardList, SameValue};
pub use crate::hooks::{
    Cleanup, Dispatch, Setter, Throttled, on_cleanup, use_callback, use_callback_with,
    use_effect, use_effect_with, use_memo, use_memo_with, use_reducer, use_reducer_with_action,
    use_ref, use_state, use_throttle,
};
pub use crate::scheduler::{Tick, clear_defer, flush, set_defer};
pub use crate::wrap::{Auto, CallArg, Wrapped, auto_wrap, wrap};
pub use crate::guards;
