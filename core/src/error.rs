// switching/src/error.rs
use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Which half of a case was running when a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePhase {
  Evaluator,
  Action,
}

impl fmt::Display for CasePhase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CasePhase::Evaluator => f.write_str("evaluator"),
      CasePhase::Action => f.write_str("action"),
    }
  }
}

#[derive(Debug, Error)]
pub enum SwitchingError {
  /// An evaluator or action panicked during `multiple_heavy_case`.
  /// Displays as the panic payload's text and nothing else.
  #[error("{message}")]
  Panicked {
    case_index: usize,
    phase: CasePhase,
    message: String,
  },
}

impl SwitchingError {
  /// Zero-based position of the failing case in the dispatched sequence.
  pub fn case_index(&self) -> usize {
    match self {
      SwitchingError::Panicked { case_index, .. } => *case_index,
    }
  }

  pub fn phase(&self) -> CasePhase {
    match self {
      SwitchingError::Panicked { phase, .. } => *phase,
    }
  }
}

pub type SwitchingResult<T, E = SwitchingError> = std::result::Result<T, E>;

pub(crate) const OPAQUE_PANIC_MESSAGE: &str = "case panicked with a non-string payload";

/// Renders a panic payload as text.
///
/// `panic!` produces `&'static str` or `String` payloads. Errors raised with
/// `std::panic::panic_any` are rendered through their `Display`; boxed
/// `dyn Error` payloads and `std::io::Error` included.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    s.to_string()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else if let Some(err) = payload.downcast_ref::<anyhow::Error>() {
    err.to_string()
  } else if let Some(err) = payload.downcast_ref::<SwitchingError>() {
    err.to_string()
  } else if let Some(err) = payload.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
    err.to_string()
  } else if let Some(err) = payload.downcast_ref::<Box<dyn StdError + Send>>() {
    err.to_string()
  } else if let Some(err) = payload.downcast_ref::<std::io::Error>() {
    err.to_string()
  } else {
    OPAQUE_PANIC_MESSAGE.to_string()
  }
}
