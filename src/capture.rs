//! Capture cells: named variables bound while a pattern is applied.
//!
//! A [`Capture`] is a cheap handle. The pattern tree and the case action each
//! hold a clone (or a reference) of the same handle; the pattern binds it,
//! the action reads it. The [`Session`] keeps the log of bound captures so it
//! can unbind them again.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::MatchError;
use crate::pattern::Pattern;
use crate::session::Session;
use crate::verdict::Verdict;

/// Anything the session can unbind.
pub(crate) trait Binding {
    fn name(&self) -> &str;
    fn unbind(&self);
}

struct Slot<T> {
    name: String,
    value: RefCell<Option<T>>,
}

impl<T> Binding for Slot<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn unbind(&self) {
        self.value.borrow_mut().take();
    }
}

/// A named, single-assignment-per-attempt variable.
///
/// Used as a pattern, a capture accepts any value and binds a clone of it.
pub struct Capture<T> {
    slot: Rc<Slot<T>>,
}

/// Create a new, unbound capture.
pub fn capture<T>(name: impl Into<String>) -> Capture<T> {
    Capture::new(name)
}

impl<T> Capture<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(Slot {
                name: name.into(),
                value: RefCell::new(None),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.slot.name
    }

    pub fn is_bound(&self) -> bool {
        self.slot.value.borrow().is_some()
    }
}

impl<T: 'static> Capture<T> {
    /// Bind the capture and record it in `session`.
    ///
    /// Fails with [`MatchError::DoubleBind`] if already bound in this attempt.
    pub fn bind(&self, session: &mut Session, value: T) -> Result<(), MatchError> {
        let mut slot = self.slot.value.borrow_mut();
        if slot.is_some() {
            return Err(MatchError::DoubleBind {
                name: self.slot.name.clone(),
            });
        }
        *slot = Some(value);
        drop(slot);
        session.record(self.slot.clone());
        Ok(())
    }
}

impl<T: Clone> Capture<T> {
    /// Read the bound value.
    ///
    /// Only meaningful inside the action of a case whose pattern bound this
    /// capture (or in a pattern applied after the binding one).
    pub fn get(&self) -> Result<T, MatchError> {
        self.slot
            .value
            .borrow()
            .clone()
            .ok_or_else(|| MatchError::UnboundCapture {
                name: self.slot.name.clone(),
            })
    }
}

impl<T> Clone for Capture<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> fmt::Display for Capture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slot.name)
    }
}

impl<T: fmt::Debug> fmt::Debug for Capture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture")
            .field("name", &self.slot.name)
            .field("value", &self.slot.value.borrow())
            .finish()
    }
}

impl<T: Clone + 'static> Pattern<T> for Capture<T> {
    fn apply(&self, session: &mut Session, value: &T) -> Result<Verdict, MatchError> {
        self.bind(session, value.clone())?;
        Ok(Verdict::Accept)
    }
}
