//! Guard lists and the same-value comparison that decides whether an effect
//! or memoization re-runs.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

/// Same-value comparison, one guard position at a time.
///
/// The semantics mirror `Object.is`: every NaN equals every other NaN, while
/// `+0.0` and `-0.0` are distinct. `Rc` compares by pointer identity, which
/// is the closest Rust analogue of object-reference guards. Implement this
/// for your own types to use them as guards; plain `==` is almost always the
/// right body.
pub trait SameValue: 'static {
    fn same_value(&self, other: &Self) -> bool;
}

macro_rules! same_value_by_eq {
    ($($ty:ty),+ $(,)?) => {
        $(impl SameValue for $ty {
            fn same_value(&self, other: &Self) -> bool {
                self == other
            }
        })+
    };
}

same_value_by_eq!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    String,
    &'static str,
);

impl SameValue for f32 {
    fn same_value(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits() || (self.is_nan() && other.is_nan())
    }
}

impl SameValue for f64 {
    fn same_value(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits() || (self.is_nan() && other.is_nan())
    }
}

impl<T: ?Sized + 'static> SameValue for Rc<T> {
    fn same_value(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: SameValue> SameValue for Option<T> {
    fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_value(b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// One type-erased guard value.
///
/// A pair of guards at the same position compares as changed when their
/// concrete types differ, so swapping a guard's type between calls re-runs
/// the guarded work rather than silently matching.
pub struct Guard {
    value: Rc<dyn Any>,
    same: fn(&dyn Any, &dyn Any) -> bool,
}

impl Guard {
    pub fn of<T: SameValue>(value: T) -> Self {
        Self {
            value: Rc::new(value),
            same: same_value_erased::<T>,
        }
    }

    pub(crate) fn matches(&self, other: &Guard) -> bool {
        (self.same)(&*self.value, &*other.value)
    }
}

impl Clone for Guard {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            same: self.same,
        }
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

fn same_value_erased<T: SameValue>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a.same_value(b),
        _ => false,
    }
}

/// Ordered list of guards controlling one effect or memoization slot.
pub type GuardList = SmallVec<[Guard; 4]>;

/// Returns true when the guarded work must re-run.
///
/// A missing list on either side forces a re-run; an explicit empty list
/// only re-runs against a list of different length.
pub(crate) fn guards_changed(prev: Option<&GuardList>, next: Option<&GuardList>) -> bool {
    let (Some(prev), Some(next)) = (prev, next) else {
        return true;
    };
    if prev.len() != next.len() {
        return true;
    }
    prev.iter().zip(next.iter()).any(|(p, n)| !p.matches(n))
}

/// Builds a [`GuardList`] from heterogeneous values.
///
/// `guards![]` is an explicit empty list ("run once"), which is not the same
/// as passing no guards at all ("always run").
#[macro_export]
macro_rules! guards {
    () => { $crate::GuardList::new() };
    ($($guard:expr),+ $(,)?) => {{
        let mut list = $crate::GuardList::new();
        $(list.push($crate::Guard::of($guard));)+
        list
    }};
}
