//! Patterns that take a value apart and hand the parts to sub-patterns.

use std::fmt;
use std::marker::PhantomData;

use itertools::Itertools;

use super::Pattern;
use crate::error::MatchError;
use crate::session::Session;
use crate::verdict::Verdict;

/// Matches a 2-tuple component-wise.
#[derive(Debug, Clone)]
pub struct Pair<P1, P2> {
    first: P1,
    second: P2,
}

pub fn pair<P1, P2>(first: P1, second: P2) -> Pair<P1, P2> {
    Pair { first, second }
}

impl<A, B, P1, P2> Pattern<(A, B)> for Pair<P1, P2>
where
    P1: Pattern<A>,
    P2: Pattern<B>,
{
    fn apply(&self, session: &mut Session, value: &(A, B)) -> Result<Verdict, MatchError> {
        if self.first.apply(session, &value.0)?.is_reject() {
            return Ok(Verdict::Reject);
        }
        self.second.apply(session, &value.1)
    }
}

impl<P1: fmt::Display, P2: fmt::Display> fmt::Display for Pair<P1, P2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.first, self.second)
    }
}

/// Matches a 3-tuple component-wise.
#[derive(Debug, Clone)]
pub struct Triple<P1, P2, P3> {
    first: P1,
    second: P2,
    third: P3,
}

pub fn triple<P1, P2, P3>(first: P1, second: P2, third: P3) -> Triple<P1, P2, P3> {
    Triple {
        first,
        second,
        third,
    }
}

impl<A, B, C, P1, P2, P3> Pattern<(A, B, C)> for Triple<P1, P2, P3>
where
    P1: Pattern<A>,
    P2: Pattern<B>,
    P3: Pattern<C>,
{
    fn apply(&self, session: &mut Session, value: &(A, B, C)) -> Result<Verdict, MatchError> {
        if self.first.apply(session, &value.0)?.is_reject()
            || self.second.apply(session, &value.1)?.is_reject()
        {
            return Ok(Verdict::Reject);
        }
        self.third.apply(session, &value.2)
    }
}

impl<P1, P2, P3> fmt::Display for Triple<P1, P2, P3>
where
    P1: fmt::Display,
    P2: fmt::Display,
    P3: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.first, self.second, self.third)
    }
}

/// Matches a slice of exactly as many elements as there are sub-patterns.
#[derive(Debug, Clone)]
pub struct Elements<P> {
    patterns: Vec<P>,
}

pub fn elements<P>(patterns: impl IntoIterator<Item = P>) -> Elements<P> {
    Elements {
        patterns: patterns.into_iter().collect(),
    }
}

impl<T, P: Pattern<T>> Pattern<[T]> for Elements<P> {
    fn apply(&self, session: &mut Session, value: &[T]) -> Result<Verdict, MatchError> {
        if value.len() != self.patterns.len() {
            return Ok(Verdict::Reject);
        }
        for (pattern, element) in self.patterns.iter().zip(value) {
            if pattern.apply(session, element)?.is_reject() {
                return Ok(Verdict::Reject);
            }
        }
        Ok(Verdict::Accept)
    }
}

impl<T, P: Pattern<T>> Pattern<Vec<T>> for Elements<P> {
    fn apply(&self, session: &mut Session, value: &Vec<T>) -> Result<Verdict, MatchError> {
        Pattern::<[T]>::apply(self, session, value.as_slice())
    }
}

impl<P: fmt::Display> fmt::Display for Elements<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.patterns.iter().join(", "))
    }
}

/// Applies a pattern to a borrowed view of the value, such as a field.
///
/// Also serves to use a pattern written for a more general type (`str`)
/// where a more specific one (`String`) is being matched.
pub struct Project<U: ?Sized, F, P> {
    name: &'static str,
    project: F,
    pattern: P,
    target: PhantomData<fn(&U)>,
}

pub fn project<T, U, F, P>(name: &'static str, project: F, pattern: P) -> Project<U, F, P>
where
    T: ?Sized,
    U: ?Sized,
    F: Fn(&T) -> &U,
{
    Project {
        name,
        project,
        pattern,
        target: PhantomData,
    }
}

impl<T, U, F, P> Pattern<T> for Project<U, F, P>
where
    T: ?Sized,
    U: ?Sized,
    F: Fn(&T) -> &U,
    P: Pattern<U>,
{
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        self.pattern.apply(session, (self.project)(value))
    }
}

impl<U: ?Sized, F, P: fmt::Display> fmt::Display for Project<U, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.pattern)
    }
}

/// Applies a pattern to a value computed from the matched value.
pub struct View<F, P> {
    name: &'static str,
    compute: F,
    pattern: P,
}

pub fn view<T, U, F, P>(name: &'static str, compute: F, pattern: P) -> View<F, P>
where
    T: ?Sized,
    F: Fn(&T) -> U,
{
    View {
        name,
        compute,
        pattern,
    }
}

impl<T, U, F, P> Pattern<T> for View<F, P>
where
    T: ?Sized,
    F: Fn(&T) -> U,
    P: Pattern<U>,
{
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        let computed = (self.compute)(value);
        self.pattern.apply(session, &computed)
    }
}

impl<F, P: fmt::Display> fmt::Display for View<F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.pattern)
    }
}
