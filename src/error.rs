//! Errors surfaced by the matching engine.

use std::fmt;

/// Everything that can go wrong during a match, apart from plain rejection.
#[derive(Debug)]
pub enum MatchError {
    /// A capture was read without having been bound in the current case.
    UnboundCapture { name: String },
    /// A capture was bound twice within one case attempt.
    DoubleBind { name: String },
    /// No case matched. `value` is the `Debug` rendering of the scrutinee.
    NoPatternMatched { value: String },
    /// The action of a matching case failed.
    Action(anyhow::Error),
}

impl MatchError {
    pub(crate) fn no_pattern_matched<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::NoPatternMatched {
            value: format!("{value:?}"),
        }
    }

    /// Lift an action error back into the taxonomy.
    ///
    /// Capture misuse inside an action (an unbound read or a double bind
    /// propagated via `?`) keeps its variant. Anything else, including the
    /// failure of a nested match run by the action, is an action failure of
    /// the enclosing case.
    pub(crate) fn from_action(err: anyhow::Error) -> Self {
        match err.downcast::<MatchError>() {
            Ok(err @ (Self::UnboundCapture { .. } | Self::DoubleBind { .. })) => err,
            Ok(err) => Self::Action(anyhow::Error::new(err)),
            Err(err) => Self::Action(err),
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundCapture { name } => {
                write!(f, "Reading unbound capture variable {name}")
            }
            Self::DoubleBind { name } => write!(f, "Re-assigned {name} in pattern match"),
            Self::NoPatternMatched { value } => write!(f, "No pattern matched {value}"),
            Self::Action(err) => write!(f, "Case action failed: {err}"),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Action(err) => Some(&**err),
            _ => None,
        }
    }
}
