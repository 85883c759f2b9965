use std::any::Any as StdAny;
use std::cell::Cell;
use std::panic::{AssertUnwindSafe, catch_unwind};

use proptest::prelude::{any as arb, prop_assert, prop_assert_eq, proptest};

use super::*;
use crate::capture::{Capture, capture};
use crate::case::with_case;
use crate::pattern::*;
use crate::{and, matching, or};

type Quad = ((i32, i32), (i32, i32));

fn sum_of(value: &Quad) -> Result<i32, MatchError> {
    let x = capture::<i32>("x");
    let y = capture::<i32>("y");
    let z = capture::<i32>("z");
    let w = capture::<i32>("w");
    matching!(value;
        pair(pair(is(99), &y), pair(&z, &w)) => || Ok(y.get()? + z.get()? + w.get()?),
        pair(pair(&x, &y), pair(&z, &w)) => || Ok(x.get()? + y.get()? + z.get()? + w.get()?),
    )
}

#[test]
fn test_nested_pairs_first_case() {
    assert_eq!(sum_of(&((99, 2), (3, 4))).unwrap(), 9);
}

#[test]
fn test_nested_pairs_fall_through_to_catch_all() {
    assert_eq!(sum_of(&((1, 2), (3, 4))).unwrap(), 10);
}

#[test]
fn test_partial_bindings_do_not_leak_into_next_case() {
    // The first case binds y before rejecting on the second component.
    let x = capture::<i32>("x");
    let y = capture::<i32>("y");
    let result = matching!(&(1, 2);
        pair(&y, is(99)) => || Ok(("first", 0, 0)),
        pair(&x, &y) => || Ok(("second", x.get()?, y.get()?)),
    );
    assert_eq!(result.unwrap(), ("second", 1, 2));
}

#[test]
fn test_first_match_wins() {
    let ran_second = Cell::new(false);
    let result = match_value(
        &7,
        [
            with_case(any(), || Ok("first")),
            with_case(any(), || {
                ran_second.set(true);
                Ok("second")
            }),
        ],
    );
    assert_eq!(result.unwrap(), "first");
    assert!(!ran_second.get());
}

#[test]
fn test_exhaustion_reports_the_value() {
    let err = matching!(&(5, "five");
        pair(is(1), any()) => || Ok(()),
        pair(is(2), any()) => || Ok(()),
    )
    .unwrap_err();
    match err {
        MatchError::NoPatternMatched { value } => assert_eq!(value, r#"(5, "five")"#),
        err => panic!("unexpected error {err:?}"),
    }
}

#[test]
fn test_try_match_returns_none_when_exhausted() {
    let result = try_match(&3, [with_case(is(4), || Ok(()))]).unwrap();
    assert_eq!(result, None);
}

#[test]
fn test_any_runs_action_once_with_nothing_bound() {
    let x = capture::<i32>("x");
    let runs = Cell::new(0);
    let result = match_value(
        &1,
        [with_case(any(), || {
            runs.set(runs.get() + 1);
            Ok(x.is_bound())
        })],
    );
    assert!(!result.unwrap());
    assert_eq!(runs.get(), 1);
}

#[test]
fn test_or_exposes_only_the_winning_alternative() {
    let a = capture::<i32>("a");
    let b = capture::<i32>("b");
    let c = capture::<i32>("c");
    let result = matching!(&(1, 2);
        or![pair(&a, is(0)), pair(&b, &c)] => || Ok((a.is_bound(), b.get()?, c.get()?)),
    );
    assert_eq!(result.unwrap(), (false, 1, 2));
}

#[test]
fn test_no_match_leaves_nothing_bound() {
    let x = capture::<i32>("x");
    let seen = Cell::new(None);
    let result = matching!(&4;
        no_match(and![&x, is(4)]) => || Ok("not four"),
        any() => || {
            seen.set(Some(x.is_bound()));
            Ok("four")
        },
    );
    assert_eq!(result.unwrap(), "four");
    assert_eq!(seen.get(), Some(false));
}

#[test]
fn test_and_rejection_is_cleaned_up_at_case_boundary() {
    // And leaves its earlier conjuncts bound on rejection; the case teardown
    // is what clears them.
    let x = capture::<i32>("x");
    let bound_in_next_case = Cell::new(true);
    let result = matching!(&5;
        and![&x, is(0)] => || Ok("zero"),
        any() => || {
            bound_in_next_case.set(x.is_bound());
            Ok("other")
        },
    );
    assert_eq!(result.unwrap(), "other");
    assert!(!bound_in_next_case.get());
}

#[test]
fn test_predicate_reads_earlier_capture() {
    let x = capture::<i32>("x");
    let y = capture::<i32>("y");
    let same = matching!(&(3, 3);
        and![pair(&x, &y), pred(|_: &(i32, i32)| x.get().ok() == y.get().ok())] => || Ok(true),
        any() => || Ok(false),
    );
    assert!(same.unwrap());
}

#[test]
fn test_capture_reuse_across_calls_is_independent() {
    let x = capture::<i32>("x");
    let first = match_value(&1, [with_case(&x, || Ok(x.get()?))]).unwrap();
    assert!(!x.is_bound());
    let second = match_value(&2, [with_case(&x, || Ok(x.get()?))]).unwrap();
    assert_eq!((first, second), (1, 2));
}

#[test]
fn test_unbound_read_surfaces_as_such() {
    let x = capture::<i32>("x");
    let y = capture::<i32>("y");
    let err = match_value(&1, [with_case(&x, || Ok(y.get()?))]).unwrap_err();
    assert!(matches!(err, MatchError::UnboundCapture { name } if name == "y"));
    assert!(!x.is_bound());
}

#[test]
fn test_double_bind_fails_fast() {
    let x = capture::<i32>("x");
    let err = matching!(&(1, 1);
        pair(&x, &x) => || Ok(()),
        any() => || Ok(()),
    )
    .unwrap_err();
    assert!(matches!(err, MatchError::DoubleBind { name } if name == "x"));
    assert!(!x.is_bound());
}

#[test]
fn test_action_failure_propagates() {
    let err = matching!(&1;
        any() => || -> anyhow::Result<()> { anyhow::bail!("action failed") },
    )
    .unwrap_err();
    assert!(matches!(err, MatchError::Action(e) if e.to_string() == "action failed"));
}

#[test]
fn test_captures_cleared_when_action_panics() {
    let x = capture::<i32>("x");
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        match_value(&1, [with_case(&x, || -> anyhow::Result<()> { panic!("boom") })])
    }));
    assert!(outcome.is_err());
    assert!(!x.is_bound());
}

#[test]
fn test_nested_exhaustion_is_an_action_failure() {
    let inner = capture::<&'static str>("inner");
    let err = match_value(
        &"outer",
        [with_case(&inner, || -> anyhow::Result<()> {
            Ok(match_value(&42, [with_case(is(0), || Ok(()))])?)
        })],
    )
    .unwrap_err();
    match err {
        MatchError::Action(err) => assert!(matches!(
            err.downcast_ref::<MatchError>(),
            Some(MatchError::NoPatternMatched { value }) if value == "42"
        )),
        err => panic!("unexpected error {err:?}"),
    }
    assert!(!inner.is_bound());
}

#[test]
fn test_partial_case_falls_through() {
    let x = capture::<i32>("x");
    let result = match_value(
        &4,
        [
            Case::partial(&x, || Ok(if x.get()? % 2 == 1 { Some("odd") } else { None })),
            with_case(any(), || Ok("other")),
        ],
    );
    assert_eq!(result.unwrap(), "other");
}

#[test]
fn test_instance_dispatch_on_dyn_any() {
    fn describe(value: &(dyn StdAny + 'static)) -> String {
        let n = capture::<i64>("n");
        let s = capture::<String>("s");
        match_value(
            value,
            [
                with_case(instance::<i64, _>(&n), || Ok(format!("int {}", n.get()?))),
                with_case(instance::<String, _>(&s), || Ok(format!("str {}", s.get()?))),
                with_case(any(), || Ok("unknown".to_string())),
            ],
        )
        .unwrap()
    }

    assert_eq!(describe(&5i64), "int 5");
    assert_eq!(describe(&"hi".to_string()), "str hi");
    assert_eq!(describe(&1.0f32), "unknown");
}

#[test]
fn test_options() {
    let inner: Capture<u8> = capture("inner");
    let describe = |value: &Option<u8>| {
        matching!(value;
            null() => || Ok(0),
            not_null(&inner) => || Ok(inner.get()? + 1),
        )
        .unwrap()
    };
    assert_eq!(describe(&None), 0);
    assert_eq!(describe(&Some(4)), 5);
}

#[derive(Debug, Clone, PartialEq)]
enum Term {
    Const(String),
    App(Box<Term>, Box<Term>),
}

#[test]
fn test_custom_leaf_pattern() {
    // A user-defined decomposition delegating to sub-patterns.
    struct App<P, Q>(P, Q);

    impl<P: Pattern<Term>, Q: Pattern<Term>> Pattern<Term> for App<P, Q> {
        fn apply(
            &self,
            session: &mut crate::Session,
            value: &Term,
        ) -> Result<crate::Verdict, MatchError> {
            let Term::App(f, arg) = value else {
                return Ok(crate::Verdict::Reject);
            };
            if self.0.apply(session, f)?.is_reject() {
                return Ok(crate::Verdict::Reject);
            }
            self.1.apply(session, arg)
        }
    }

    impl<P: std::fmt::Display, Q: std::fmt::Display> std::fmt::Display for App<P, Q> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "App({}, {})", self.0, self.1)
        }
    }

    let succ = || Term::Const("Suc".into());
    let term = Term::App(Box::new(succ()), Box::new(Term::Const("0".into())));
    let arg = capture::<Term>("arg");
    let result = matching!(&term;
        App(is(succ()), &arg) => || Ok(arg.get()?),
        any() => || Ok(term.clone()),
    );
    assert_eq!(result.unwrap(), Term::Const("0".into()));
    assert_eq!(App(is(succ()), &arg).to_string(), r#"App(=Const("Suc"), arg)"#);
}

proptest! {
    #[test]
    fn prop_any_always_matches(v in arb::<i64>()) {
        let result = match_value(&v, [with_case(any(), || Ok(v))]);
        prop_assert_eq!(result.unwrap(), v);
    }

    #[test]
    fn prop_or_keeps_only_second_alternative_bindings(a in arb::<i32>(), b in arb::<i32>()) {
        let p = capture::<i32>("p");
        let q = capture::<i32>("q");
        let result = matching!(&(a, b);
            or![pair(&p, pred(|_: &i32| false)), pair(any(), &q)]
                => || Ok((p.is_bound(), q.get()?)),
        );
        prop_assert_eq!(result.unwrap(), (false, b));
    }

    #[test]
    fn prop_no_match_of_capture_never_binds(v in arb::<u16>()) {
        let x = capture::<u16>("x");
        let result = try_match(&v, [with_case(no_match(&x), || Ok(()))]).unwrap();
        prop_assert_eq!(result, None);
        prop_assert!(!x.is_bound());
    }

    #[test]
    fn prop_first_case_wins_when_both_match(v in arb::<i32>()) {
        let result = matching!(&v;
            pred(|n: &i32| *n == v) => || Ok(1),
            any() => || Ok(2),
        );
        prop_assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn prop_exhaustion_mentions_value(v in arb::<u32>()) {
        let result: Result<(), _> = match_value(&v, [with_case(is(v.wrapping_add(1)), || Ok(()))]);
        match result {
            Err(MatchError::NoPatternMatched { value }) => prop_assert_eq!(value, v.to_string()),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
