/// The outcome of applying a pattern to a value.
///
/// `Reject` is ordinary control flow ("this pattern does not apply"), not an
/// error. Errors travel separately as [`MatchError`](crate::MatchError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Verdict {
    Accept,
    Reject,
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, Verdict::Reject)
    }
}

impl From<bool> for Verdict {
    fn from(holds: bool) -> Self {
        if holds {
            Verdict::Accept
        } else {
            Verdict::Reject
        }
    }
}
