//! A pattern paired with the action to run when it matches.

use std::fmt;

use crate::error::MatchError;
use crate::pattern::{BoxPattern, Pattern};
use crate::session::Session;
use crate::verdict::Verdict;

type Action<'a, R> = Box<dyn FnMut() -> anyhow::Result<Option<R>> + 'a>;

/// One arm of a [`match_value`](crate::match_value) call.
pub struct Case<'a, T: ?Sized, R> {
    pattern: BoxPattern<'a, T>,
    action: Action<'a, R>,
}

/// Pair `pattern` with `action`. The action runs only if the pattern
/// accepts, and may read any capture the pattern bound.
pub fn with_case<'a, T, R, P, F>(pattern: P, action: F) -> Case<'a, T, R>
where
    T: ?Sized,
    P: Pattern<T> + 'a,
    F: FnMut() -> anyhow::Result<R> + 'a,
{
    Case::new(pattern, action)
}

impl<'a, T: ?Sized, R> Case<'a, T, R> {
    pub fn new<P, F>(pattern: P, mut action: F) -> Self
    where
        P: Pattern<T> + 'a,
        F: FnMut() -> anyhow::Result<R> + 'a,
    {
        Self {
            pattern: Box::new(pattern),
            action: Box::new(move || action().map(Some)),
        }
    }

    /// Like [`Case::new`], but the action itself may decline the value by
    /// returning `Ok(None)`, in which case matching continues with the next
    /// case as if the pattern had rejected.
    pub fn partial<P, F>(pattern: P, action: F) -> Self
    where
        P: Pattern<T> + 'a,
        F: FnMut() -> anyhow::Result<Option<R>> + 'a,
    {
        Self {
            pattern: Box::new(pattern),
            action: Box::new(action),
        }
    }

    /// Apply the pattern and, if it accepts, run the action.
    ///
    /// `Ok(None)` means this case does not apply. The session is cleared
    /// before returning, whatever the outcome.
    pub(crate) fn attempt(
        &mut self,
        session: &mut Session,
        value: &T,
    ) -> Result<Option<R>, MatchError> {
        let mut attempt = session.attempt();
        let verdict = self.pattern.apply(&mut attempt, value)?;
        tracing::trace!(pattern = %self.pattern, ?verdict, "case attempted");
        match verdict {
            Verdict::Reject => Ok(None),
            Verdict::Accept => (self.action)().map_err(MatchError::from_action),
        }
    }
}

impl<T: ?Sized, R> fmt::Display for Case<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "case {} => ...", self.pattern)
    }
}
