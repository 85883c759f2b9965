//! The per-match binding log.
//!
//! Every capture bound during a case attempt is appended to the log. The log
//! is the undo record: unbinding a suffix of it restores exactly the binding
//! state from before that suffix began.

use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::capture::Binding;
use crate::error::MatchError;
use crate::verdict::Verdict;

/// Tracks which captures were bound during the current attempt.
///
/// One session serves one `match` call. It is neither `Send` nor `Sync`.
#[derive(Default)]
pub struct Session {
    log: Vec<Rc<dyn Binding>>,
}

impl Session {
    pub fn new() -> Self {
        Self { log: Vec::new() }
    }

    /// Number of captures bound so far in this attempt.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Names of the bound captures, in binding order.
    pub fn bound_names(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(|binding| binding.name())
    }

    pub(crate) fn record(&mut self, binding: Rc<dyn Binding>) {
        self.log.push(binding);
    }

    /// Unbind every recorded capture and empty the log.
    pub(crate) fn clear_all(&mut self) {
        for binding in self.log.drain(..) {
            binding.unbind();
        }
    }

    /// Unbind everything recorded after the first `mark` entries.
    fn rollback_to(&mut self, mark: usize) {
        let undone = self.log.len() - mark;
        for binding in self.log.drain(mark..).rev() {
            binding.unbind();
        }
        if undone > 0 {
            tracing::trace!(undone, "excursion rolled back");
        }
    }

    /// Speculatively run `op`.
    ///
    /// If `op` rejects, every capture it bound is unbound again and the
    /// result is `false`. If it accepts, its bindings stay and the result is
    /// `true`. Bindings made before the excursion are never touched.
    pub fn excursion<F>(&mut self, op: F) -> Result<bool, MatchError>
    where
        F: FnOnce(&mut Session) -> Result<Verdict, MatchError>,
    {
        let verdict = self.excursion_with(op, Verdict::is_accept)?;
        Ok(verdict.is_accept())
    }

    /// Speculatively run `op`, keeping its bindings only if `keep` approves
    /// of the value it produced.
    ///
    /// Errors from `op` also roll back before they propagate.
    pub fn excursion_with<R, F, K>(&mut self, op: F, keep: K) -> Result<R, MatchError>
    where
        F: FnOnce(&mut Session) -> Result<R, MatchError>,
        K: FnOnce(&R) -> bool,
    {
        let mark = self.log.len();
        match op(self) {
            Ok(result) => {
                if !keep(&result) {
                    self.rollback_to(mark);
                }
                Ok(result)
            }
            Err(err) => {
                self.rollback_to(mark);
                Err(err)
            }
        }
    }

    /// Borrow the session for one case attempt. The returned guard clears
    /// the session when dropped, whatever the attempt's outcome.
    pub(crate) fn attempt(&mut self) -> Attempt<'_> {
        Attempt { session: self }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.clear_all();
    }
}

/// Teardown guard for a single case attempt.
pub(crate) struct Attempt<'s> {
    session: &'s mut Session,
}

impl Deref for Attempt<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for Attempt<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        self.session.clear_all();
    }
}
