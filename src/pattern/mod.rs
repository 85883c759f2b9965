//! The pattern abstraction.
//!
//! A pattern is a predicate with bindings: applied to a value it either
//! accepts (possibly binding captures along the way) or rejects. Patterns are
//! stateless trees; captures are the only stateful leaves.
//!
//! # Combinators
//!
//! | Constructor           | Accepts                                          |
//! |-----------------------|--------------------------------------------------|
//! | `any()`               | everything                                       |
//! | `is(v)`               | values equal to `v`                              |
//! | `null()`              | `None`                                           |
//! | `not_null(p)`         | `Some(x)` where `p` accepts `x`                  |
//! | `and![p, ..]`         | values every `p` accepts, left to right          |
//! | `or![p, ..]`          | values some `p` accepts; first one wins          |
//! | `instance::<U>(p)`    | `dyn Any` values of type `U` that `p` accepts    |
//! | `narrow(n, f, p)`     | values where `f` yields `Some(x)`, `p` accepts x |
//! | `pred(f)`             | values where `f` holds                           |
//! | `no_match(p)`         | values `p` rejects                               |
//! | `project(n, f, p)`    | values whose view `f(v)` `p` accepts             |
//! | `view(n, f, p)`       | values whose computed `f(v)` `p` accepts         |
//! | `pair(p, q)`          | `(a, b)` with `p` accepting a, `q` accepting b   |
//! | `triple(p, q, r)`     | `(a, b, c)`, component-wise                      |
//! | `elements([p, ..])`   | slices of matching length, element-wise          |
//!
//! New leaf patterns are written by implementing [`Pattern`] directly and
//! delegating to sub-patterns.

use std::fmt;

use crate::error::MatchError;
use crate::session::Session;
use crate::verdict::Verdict;

pub mod combinators;
pub mod structural;

pub use combinators::{
    And, Any, Instance, Is, Narrow, NoMatch, NotNull, Null, Or, Pred, and, any, instance, is,
    narrow, no_match, not_null, null, or, pred,
};
pub use structural::{Elements, Pair, Project, Triple, View, elements, pair, project, triple, view};

/// A predicate with bindings over values of type `T`.
pub trait Pattern<T: ?Sized>: fmt::Display {
    /// Apply the pattern to `value`, binding captures into `session`.
    ///
    /// Returns `Ok(Verdict::Reject)` if the value does not have the expected
    /// shape. `Err` is reserved for programming errors such as binding the
    /// same capture twice.
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError>;
}

/// A type-erased pattern.
pub type BoxPattern<'a, T> = Box<dyn Pattern<T> + 'a>;

impl<T: ?Sized, P: Pattern<T> + ?Sized> Pattern<T> for &P {
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        (**self).apply(session, value)
    }
}

impl<T: ?Sized, P: Pattern<T> + ?Sized> Pattern<T> for Box<P> {
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        (**self).apply(session, value)
    }
}

/// Convenience methods available on every pattern.
pub trait PatternExt<T: ?Sized>: Pattern<T> + Sized {
    /// Erase the pattern's type, e.g. to put differently typed patterns into
    /// one [`and`] or [`or`].
    fn boxed<'a>(self) -> BoxPattern<'a, T>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<T: ?Sized, P: Pattern<T>> PatternExt<T> for P {}

/// Conjunction of any number of patterns.
///
/// ```
/// use casematch::{and, capture, match_value, pred, with_case};
///
/// let x = capture::<i32>("x");
/// let r = match_value(&5, [with_case(and![&x, pred(|v: &i32| *v > 3)], || Ok(x.get()? * 2))]);
/// assert_eq!(r.unwrap(), 10);
/// ```
#[macro_export]
macro_rules! and {
    ($($pattern:expr),* $(,)?) => {
        $crate::pattern::and(::std::vec![$($crate::pattern::PatternExt::boxed($pattern)),*])
    };
}

/// Disjunction of any number of patterns; the first accepting one wins.
#[macro_export]
macro_rules! or {
    ($($pattern:expr),* $(,)?) => {
        $crate::pattern::or(::std::vec![$($crate::pattern::PatternExt::boxed($pattern)),*])
    };
}
