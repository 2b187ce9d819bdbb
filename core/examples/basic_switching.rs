// switching/examples/basic_switching.rs

use std::cell::Cell;
use switching::{multiple_case, Case};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
  info!("--- Simple Switching Example ---");

  let value = 2;
  multiple_case([
    Case::new(|| value < 4, || info!("case 1: value is below 4")),
    Case::new(|| value == 2, || info!("case 2: value is exactly 2")),
    Case::new(|| value > 4, || info!("case 3: value is above 4")),
  ]);

  // Rules that build on each other: each action changes what the next evaluator sees.
  let stage = Cell::new("received");
  multiple_case([
    Case::new(
      || stage.get() == "received",
      || {
        info!("validating order");
        stage.set("validated");
      },
    ),
    Case::new(
      || stage.get() == "validated",
      || {
        info!("shipping order");
        stage.set("shipped");
      },
    ),
    Case::new(|| stage.get() == "received", || info!("never reached: order already moved on")),
  ]);
  info!(final_stage = stage.get(), "Order rules applied.");
}
