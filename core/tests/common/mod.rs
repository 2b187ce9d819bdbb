// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error)]
pub enum TestError {
  #[error("Switching error: {0}")]
  Switching(#[from] switching::SwitchingError),

  #[error("Test evaluator failed: {0}")]
  Evaluator(String),

  #[error("Test action failed: {0}")]
  Action(String),
}

// --- Call Recording ---

/// Records evaluator and action invocations in the order they happen.
///
/// Uses a non-poisoning lock so a recorder stays usable after a case panics.
#[derive(Debug, Default)]
pub struct CallLog {
  calls: Mutex<Vec<String>>,
}

impl CallLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&self, entry: impl Into<String>) {
    self.calls.lock().push(entry.into());
  }

  /// Records `entry` and reports success, for use as a heavy action.
  pub fn note<E>(&self, entry: impl Into<String>) -> Result<(), E> {
    self.record(entry);
    Ok(())
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  pub fn contains(&self, entry: &str) -> bool {
    self.calls.lock().iter().any(|c| c == entry)
  }
}

/// One flag per case, set when that case's action runs.
pub struct Flags {
  flags: Mutex<Vec<bool>>,
}

impl Flags {
  pub fn new(len: usize) -> Self {
    Self {
      flags: Mutex::new(vec![false; len]),
    }
  }

  pub fn set(&self, idx: usize) {
    self.flags.lock()[idx] = true;
  }

  pub fn mark<E>(&self, idx: usize) -> Result<(), E> {
    self.set(idx);
    Ok(())
  }

  pub fn snapshot(&self) -> Vec<bool> {
    self.flags.lock().clone()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counter for checking evaluator executions across a test ---
pub static EVALUATOR_EXEC_COUNTER: Lazy<AtomicUsize> = Lazy::new(|| AtomicUsize::new(0));

pub fn reset_counters() {
  EVALUATOR_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

pub fn count_evaluation() {
  EVALUATOR_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
}

pub fn evaluations() -> usize {
  EVALUATOR_EXEC_COUNTER.load(Ordering::SeqCst)
}

// --- ERROR event counting for log-level assertions ---

struct ErrorEventCounter(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> Layer<S> for ErrorEventCounter {
  fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
    if *event.metadata().level() == Level::ERROR {
      self.0.fetch_add(1, Ordering::SeqCst);
    }
  }
}

/// Runs `f` under a thread-local subscriber and returns its result along with
/// the number of ERROR events emitted meanwhile.
pub fn count_error_events<T>(f: impl FnOnce() -> T) -> (T, usize) {
  let count = Arc::new(AtomicUsize::new(0));
  let subscriber = tracing_subscriber::registry().with(ErrorEventCounter(count.clone()));
  let out = tracing::subscriber::with_default(subscriber, f);
  (out, count.load(Ordering::SeqCst))
}
