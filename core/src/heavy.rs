// switching/src/heavy.rs

//! The heavy dispatcher: evaluators and actions report failure through
//! `Result`, the first failure stops dispatch, and panics are captured and
//! returned as errors instead of unwinding into the caller.

use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::{event, instrument, Level};

use crate::error::{panic_message, CasePhase, SwitchingError};

type HeavyEvaluator<'a, E> = Box<dyn FnOnce() -> Result<bool, E> + 'a>;
type HeavyAction<'a, E> = Box<dyn FnOnce() -> Result<(), E> + 'a>;

/// A single case for [`multiple_heavy_case`].
///
/// `E` is the caller's error type and defaults to `anyhow::Error`.
/// Only constructible through [`HeavyCase::new`].
pub struct HeavyCase<'a, E = anyhow::Error> {
  evaluator: HeavyEvaluator<'a, E>,
  action: HeavyAction<'a, E>,
}

impl<'a, E> HeavyCase<'a, E> {
  pub fn new(
    evaluator: impl FnOnce() -> Result<bool, E> + 'a,
    action: impl FnOnce() -> Result<(), E> + 'a,
  ) -> Self {
    Self {
      evaluator: Box::new(evaluator),
      action: Box::new(action),
    }
  }
}

impl<E> fmt::Debug for HeavyCase<'_, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HeavyCase")
      .field("error_type", &std::any::type_name::<E>())
      .finish_non_exhaustive()
  }
}

/// Evaluates cases in order, running the action of each matching case, and
/// stops at the first failure.
///
/// Returns the first error produced by an evaluator or an action. If any
/// evaluator or action panics, the panic is caught and returned as
/// [`SwitchingError::Panicked`] converted into `E`; it never unwinds past this
/// call. No case after the failing one runs. An empty sequence returns `Ok(())`.
///
/// ```
/// use switching::{multiple_heavy_case, HeavyCase};
///
/// let value = 2;
/// let result: anyhow::Result<()> = multiple_heavy_case([
///   HeavyCase::new(|| Ok(value < 4), || Ok(())),
///   HeavyCase::new(|| Ok(value == 2), || panic!("some error")),
/// ]);
/// assert_eq!(result.unwrap_err().to_string(), "some error");
/// ```
#[instrument(
  name = "multiple_heavy_case",
  skip_all,
  fields(error_type = %std::any::type_name::<E>()),
  err(Display)
)]
pub fn multiple_heavy_case<'a, E>(cases: impl IntoIterator<Item = HeavyCase<'a, E>>) -> Result<(), E>
where
  E: From<SwitchingError> + fmt::Display,
{
  event!(Level::DEBUG, "Heavy dispatch starting.");

  let position = Cell::new((0usize, CasePhase::Evaluator));
  match panic::catch_unwind(AssertUnwindSafe(|| run_cases(cases, &position))) {
    Ok(result) => result,
    Err(payload) => {
      let (case_index, phase) = position.get();
      let message = panic_message(payload.as_ref());
      event!(Level::DEBUG, case_index, %phase, %message, "Case panicked, dispatch aborted.");
      Err(E::from(SwitchingError::Panicked {
        case_index,
        phase,
        message,
      }))
    }
  }
}

/// The dispatch loop proper. Failures are logged here at DEBUG with the case
/// position; the ERROR event comes from `#[instrument(err)]` on the caller.
/// `position` tracks the running case so a caught
/// panic can be attributed to it.
fn run_cases<'a, E>(
  cases: impl IntoIterator<Item = HeavyCase<'a, E>>,
  position: &Cell<(usize, CasePhase)>,
) -> Result<(), E>
where
  E: fmt::Display,
{
  let mut evaluated = 0usize;
  let mut matched = 0usize;

  for (case_index, case) in cases.into_iter().enumerate() {
    position.set((case_index, CasePhase::Evaluator));
    evaluated += 1;
    let is_match = match (case.evaluator)() {
      Ok(is_match) => is_match,
      Err(e) => {
        event!(Level::DEBUG, case_index, error = %e, "Evaluator failed, dispatch stopped.");
        return Err(e);
      }
    };
    event!(Level::TRACE, case_index, matched = is_match, "Case evaluated.");
    if !is_match {
      continue;
    }

    matched += 1;
    position.set((case_index, CasePhase::Action));
    if let Err(e) = (case.action)() {
      event!(Level::DEBUG, case_index, error = %e, "Action failed, dispatch stopped.");
      return Err(e);
    }
  }

  event!(Level::DEBUG, evaluated, matched, "Heavy dispatch completed.");
  Ok(())
}
