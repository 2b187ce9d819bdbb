// switching/src/simple.rs

//! The simple dispatcher: infallible evaluators and actions, every case is
//! evaluated, and a panic inside any of them unwinds straight to the caller.

use std::fmt;

use tracing::{event, Level};

type Evaluator<'a> = Box<dyn FnOnce() -> bool + 'a>;
type Action<'a> = Box<dyn FnOnce() + 'a>;

/// A single case for [`multiple_case`].
///
/// Only constructible through [`Case::new`].
pub struct Case<'a> {
  evaluator: Evaluator<'a>,
  action: Action<'a>,
}

impl<'a> Case<'a> {
  /// Pairs an evaluator with the action to run when it returns `true`.
  pub fn new(evaluator: impl FnOnce() -> bool + 'a, action: impl FnOnce() + 'a) -> Self {
    Self {
      evaluator: Box::new(evaluator),
      action: Box::new(action),
    }
  }
}

impl fmt::Debug for Case<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Case").finish_non_exhaustive()
  }
}

/// Evaluates every case in order and runs the action of each one that matches.
///
/// There is no early exit: a matching case does not stop later evaluators from
/// running, and an action may change state that later evaluators observe.
/// Panics are not caught; the unwind reaches the caller and no later case runs.
///
/// ```
/// use std::cell::RefCell;
/// use switching::{multiple_case, Case};
///
/// let value = 2;
/// let seen = RefCell::new(Vec::new());
/// multiple_case([
///   Case::new(|| value < 4, || seen.borrow_mut().push("case 1")),
///   Case::new(|| value == 2, || seen.borrow_mut().push("case 2")),
///   Case::new(|| value > 4, || seen.borrow_mut().push("case 3")),
/// ]);
/// assert_eq!(*seen.borrow(), vec!["case 1", "case 2"]);
/// ```
pub fn multiple_case<'a>(cases: impl IntoIterator<Item = Case<'a>>) {
  event!(Level::DEBUG, "Simple dispatch starting.");

  let mut evaluated = 0usize;
  let mut matched = 0usize;
  for (case_index, case) in cases.into_iter().enumerate() {
    evaluated += 1;
    let is_match = (case.evaluator)();
    event!(Level::TRACE, case_index, matched = is_match, "Case evaluated.");
    if is_match {
      matched += 1;
      (case.action)();
    }
  }

  event!(Level::DEBUG, evaluated, matched, "Simple dispatch completed.");
}
