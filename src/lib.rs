//! Structural pattern matching with captures and first-match-wins cases.
//!
//! A [`Pattern`] describes the expected shape of a value. Applying it binds
//! [`Capture`]s to parts of the value; a [`Case`] pairs a pattern with an
//! action that reads those captures. [`match_value`] tries cases in order and
//! returns the first result.
//!
//! # Example
//!
//! ```rust
//! use casematch::{any, capture, is, matching, pair};
//!
//! let x = capture::<i32>("x");
//! let y = capture::<i32>("y");
//! let z = capture::<i32>("z");
//! let w = capture::<i32>("w");
//!
//! let value = ((1, 2), (3, 4));
//! let result = matching!(&value;
//!     pair(pair(is(99), &y), pair(&z, &w)) => || Ok(y.get()? + z.get()? + w.get()?),
//!     pair(pair(&x, &y), pair(&z, &w))     => || Ok(x.get()? + y.get()? + z.get()? + w.get()?),
//!     any()                                => || Ok(0),
//! );
//!
//! assert_eq!(result.unwrap(), 10);
//! // Captures are only bound while a case runs.
//! assert!(!x.is_bound());
//! ```
//!
//! Rejection is an ordinary return value ([`Verdict::Reject`]). Alternation
//! and negation try sub-patterns speculatively and undo their bindings via
//! [`Session::excursion`].

mod capture;
mod case;
mod error;
mod matcher;
pub mod pattern;
mod session;
mod verdict;

pub use capture::{Capture, capture};
pub use case::{Case, with_case};
pub use error::MatchError;
pub use matcher::{match_value, try_match};
pub use pattern::{
    BoxPattern, Pattern, PatternExt, and, any, elements, instance, is, narrow, no_match, not_null,
    null, or, pair, pred, project, triple, view,
};
pub use session::Session;
pub use verdict::Verdict;
