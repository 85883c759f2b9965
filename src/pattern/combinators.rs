//! The core combinator library.

use std::any::Any as StdAny;
use std::fmt;
use std::marker::PhantomData;

use itertools::Itertools;

use super::{BoxPattern, Pattern};
use crate::error::MatchError;
use crate::session::Session;
use crate::verdict::Verdict;

// ─── Leaves ─────────────────────────────────────────────────────────────────

/// Accepts every value without binding anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Any;

pub fn any() -> Any {
    Any
}

impl<T: ?Sized> Pattern<T> for Any {
    fn apply(&self, _session: &mut Session, _value: &T) -> Result<Verdict, MatchError> {
        Ok(Verdict::Accept)
    }
}

impl fmt::Display for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("_")
    }
}

/// Accepts values equal to `expected`.
#[derive(Debug, Clone)]
pub struct Is<V> {
    expected: V,
}

pub fn is<V>(expected: V) -> Is<V> {
    Is { expected }
}

impl<T, V> Pattern<T> for Is<V>
where
    T: PartialEq<V> + ?Sized,
    V: fmt::Debug,
{
    fn apply(&self, _session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        Ok(Verdict::from(*value == self.expected))
    }
}

impl<V: fmt::Debug> fmt::Display for Is<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "={:?}", self.expected)
    }
}

/// Accepts `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Null;

pub fn null() -> Null {
    Null
}

impl<T> Pattern<Option<T>> for Null {
    fn apply(&self, _session: &mut Session, value: &Option<T>) -> Result<Verdict, MatchError> {
        Ok(Verdict::from(value.is_none()))
    }
}

impl fmt::Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null")
    }
}

/// Rejects `None`; applies the inner pattern to the contents of `Some`.
#[derive(Debug, Clone)]
pub struct NotNull<P> {
    pattern: P,
}

pub fn not_null<P>(pattern: P) -> NotNull<P> {
    NotNull { pattern }
}

impl<T, P: Pattern<T>> Pattern<Option<T>> for NotNull<P> {
    fn apply(&self, session: &mut Session, value: &Option<T>) -> Result<Verdict, MatchError> {
        match value {
            Some(inner) => self.pattern.apply(session, inner),
            None => Ok(Verdict::Reject),
        }
    }
}

impl<P: fmt::Display> fmt::Display for NotNull<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NotNull({})", self.pattern)
    }
}

/// Accepts values for which the predicate holds.
#[derive(Clone)]
pub struct Pred<F> {
    predicate: F,
}

pub fn pred<T: ?Sized, F: Fn(&T) -> bool>(predicate: F) -> Pred<F> {
    Pred { predicate }
}

impl<T: ?Sized, F: Fn(&T) -> bool> Pattern<T> for Pred<F> {
    fn apply(&self, _session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        Ok(Verdict::from((self.predicate)(value)))
    }
}

impl<F> fmt::Display for Pred<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pred(...)")
    }
}

// ─── Logical combinators ────────────────────────────────────────────────────

/// Conjunction: every sub-pattern must accept the same value.
///
/// Sub-patterns run left to right and bindings accumulate. The first
/// rejection short-circuits, but bindings made by earlier sub-patterns are
/// left in place; the enclosing case clears them. An empty conjunction
/// accepts.
pub struct And<'a, T: ?Sized> {
    patterns: Vec<BoxPattern<'a, T>>,
}

pub fn and<T: ?Sized>(patterns: Vec<BoxPattern<'_, T>>) -> And<'_, T> {
    And { patterns }
}

impl<T: ?Sized> Pattern<T> for And<'_, T> {
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        for pattern in &self.patterns {
            if pattern.apply(session, value)?.is_reject() {
                return Ok(Verdict::Reject);
            }
        }
        Ok(Verdict::Accept)
    }
}

impl<T: ?Sized> fmt::Display for And<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "And({})", self.patterns.iter().join(", "))
    }
}

/// Disjunction: the first accepting alternative wins.
///
/// Every alternative but the last runs inside an excursion, so a failed
/// alternative leaves no bindings behind. The last one is applied directly.
/// An empty disjunction rejects.
pub struct Or<'a, T: ?Sized> {
    alternatives: Vec<BoxPattern<'a, T>>,
}

pub fn or<T: ?Sized>(alternatives: Vec<BoxPattern<'_, T>>) -> Or<'_, T> {
    Or { alternatives }
}

impl<T: ?Sized> Pattern<T> for Or<'_, T> {
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        let Some((last, init)) = self.alternatives.split_last() else {
            return Ok(Verdict::Reject);
        };
        for alternative in init {
            if session.excursion(|s| alternative.apply(s, value))? {
                return Ok(Verdict::Accept);
            }
        }
        last.apply(session, value)
    }
}

impl<T: ?Sized> fmt::Display for Or<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Or({})", self.alternatives.iter().join(", "))
    }
}

/// Negation: accepts exactly when the inner pattern rejects.
///
/// The inner pattern runs in an excursion and its bindings are always
/// discarded.
#[derive(Debug, Clone)]
pub struct NoMatch<P> {
    pattern: P,
}

pub fn no_match<P>(pattern: P) -> NoMatch<P> {
    NoMatch { pattern }
}

impl<T: ?Sized, P: Pattern<T>> Pattern<T> for NoMatch<P> {
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        let inner = session.excursion_with(|s| self.pattern.apply(s, value), |_| false)?;
        Ok(match inner {
            Verdict::Accept => Verdict::Reject,
            Verdict::Reject => Verdict::Accept,
        })
    }
}

impl<P: fmt::Display> fmt::Display for NoMatch<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoMatch({})", self.pattern)
    }
}

// ─── Narrowing ──────────────────────────────────────────────────────────────

/// Downcasts a `dyn Any` (optionally `+ Send`, `+ Send + Sync`) value to
/// `U`; rejects values of any other type.
pub struct Instance<U, P> {
    pattern: P,
    target: PhantomData<fn(&U)>,
}

pub fn instance<U: 'static, P: Pattern<U>>(pattern: P) -> Instance<U, P> {
    Instance {
        pattern,
        target: PhantomData,
    }
}

impl<U: 'static, P: Pattern<U>> Pattern<dyn StdAny> for Instance<U, P> {
    fn apply(&self, session: &mut Session, value: &dyn StdAny) -> Result<Verdict, MatchError> {
        match value.downcast_ref::<U>() {
            Some(narrowed) => self.pattern.apply(session, narrowed),
            None => Ok(Verdict::Reject),
        }
    }
}

impl<U: 'static, P: Pattern<U>> Pattern<dyn StdAny + Send> for Instance<U, P> {
    fn apply(
        &self,
        session: &mut Session,
        value: &(dyn StdAny + Send),
    ) -> Result<Verdict, MatchError> {
        match value.downcast_ref::<U>() {
            Some(narrowed) => self.pattern.apply(session, narrowed),
            None => Ok(Verdict::Reject),
        }
    }
}

impl<U: 'static, P: Pattern<U>> Pattern<dyn StdAny + Send + Sync> for Instance<U, P> {
    fn apply(
        &self,
        session: &mut Session,
        value: &(dyn StdAny + Send + Sync),
    ) -> Result<Verdict, MatchError> {
        match value.downcast_ref::<U>() {
            Some(narrowed) => self.pattern.apply(session, narrowed),
            None => Ok(Verdict::Reject),
        }
    }
}

impl<U, P: fmt::Display> fmt::Display for Instance<U, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance({},{})", short_type_name::<U>(), self.pattern)
    }
}

fn short_type_name<U: ?Sized>() -> &'static str {
    let full = std::any::type_name::<U>();
    // Strip the module path, but not from inside generic arguments.
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

/// Checked narrowing through a projection, typically an enum variant.
///
/// `project` returns `Some` for values of the wanted variant; `None` rejects.
pub struct Narrow<U: ?Sized, F, P> {
    name: &'static str,
    project: F,
    pattern: P,
    target: PhantomData<fn(&U)>,
}

pub fn narrow<T, U, F, P>(name: &'static str, project: F, pattern: P) -> Narrow<U, F, P>
where
    T: ?Sized,
    U: ?Sized,
    F: Fn(&T) -> Option<&U>,
{
    Narrow {
        name,
        project,
        pattern,
        target: PhantomData,
    }
}

impl<T, U, F, P> Pattern<T> for Narrow<U, F, P>
where
    T: ?Sized,
    U: ?Sized,
    F: Fn(&T) -> Option<&U>,
    P: Pattern<U>,
{
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        match (self.project)(value) {
            Some(narrowed) => self.pattern.apply(session, narrowed),
            None => Ok(Verdict::Reject),
        }
    }
}

impl<U: ?Sized, F, P: fmt::Display> fmt::Display for Narrow<U, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.pattern)
    }
}
