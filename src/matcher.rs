//! The match entry points: first matching case wins.

use std::fmt;

use crate::case::Case;
use crate::error::MatchError;
use crate::session::Session;

/// Apply `cases` to `value` in order and return the result of the first
/// case whose pattern accepts.
///
/// Later cases never observe bindings made by earlier, rejected ones. If no
/// case applies the result is [`MatchError::NoPatternMatched`], carrying the
/// value's `Debug` rendering.
pub fn match_value<'a, T, R>(
    value: &T,
    cases: impl IntoIterator<Item = Case<'a, T, R>>,
) -> Result<R, MatchError>
where
    T: fmt::Debug + ?Sized,
{
    try_match(value, cases)?.ok_or_else(|| {
        tracing::debug!(?value, "no pattern matched");
        MatchError::no_pattern_matched(value)
    })
}

/// Like [`match_value`], but returns `Ok(None)` if no case applies.
pub fn try_match<'a, T, R>(
    value: &T,
    cases: impl IntoIterator<Item = Case<'a, T, R>>,
) -> Result<Option<R>, MatchError>
where
    T: ?Sized,
{
    let mut session = Session::new();
    for (index, mut case) in cases.into_iter().enumerate() {
        if let Some(result) = case.attempt(&mut session, value)? {
            tracing::trace!(index, "case matched");
            return Ok(Some(result));
        }
    }
    Ok(None)
}

/// Match a value against any number of `pattern => action` arms.
///
/// ```
/// use casematch::{any, capture, is, matching, pair};
///
/// let x = capture::<i32>("x");
/// let y = capture::<i32>("y");
/// let sum = matching!(&(1, 2);
///     pair(is(99), &y) => || Ok(y.get()?),
///     pair(&x, &y) => || Ok(x.get()? + y.get()?),
/// );
/// assert_eq!(sum.unwrap(), 3);
/// ```
#[macro_export]
macro_rules! matching {
    ($value:expr; $($pattern:expr => $action:expr),+ $(,)?) => {
        $crate::match_value($value, [$($crate::with_case($pattern, $action)),+])
    };
}

#[cfg(test)]
mod tests;
