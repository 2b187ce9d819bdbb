// src/lib.rs

//! Switching: ordered conditional dispatch.
//!
//! A dispatch call takes an ordered list of cases, each pairing an evaluator
//! (a predicate) with an action, and runs the action of every case whose
//! evaluator matches. Two flavours are provided:
//!  - [`multiple_case`] with [`Case`]: infallible cases, every evaluator always
//!    runs, panics propagate to the caller untouched.
//!  - [`multiple_heavy_case`] with [`HeavyCase`]: evaluators and actions return
//!    `Result`, the first error stops dispatch, and panics are captured and
//!    returned as [`SwitchingError::Panicked`].
//!
//! Both run synchronously on the calling thread. Cases are consumed by the
//! call; closures may borrow caller state, so an action can change what a
//! later evaluator sees.

pub mod error;
pub mod heavy;
pub mod simple;

// --- Re-exports for the Public API ---

pub use crate::error::{CasePhase, SwitchingError, SwitchingResult};
pub use crate::heavy::{multiple_heavy_case, HeavyCase};
pub use crate::simple::{multiple_case, Case};
