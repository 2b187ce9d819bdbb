// switching/examples/heavy_switching.rs

use anyhow::{bail, Context};
use std::cell::RefCell;
use switching::{multiple_heavy_case, HeavyCase, SwitchingError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn parse_quantity(raw: &str) -> anyhow::Result<u32> {
  raw.trim().parse().with_context(|| format!("invalid quantity '{}'", raw))
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
  info!("--- Heavy Switching Example ---");

  let stock = RefCell::new(10u32);

  // Everything succeeds.
  multiple_heavy_case([
    HeavyCase::new(
      || -> anyhow::Result<bool> { Ok(parse_quantity("3")? <= *stock.borrow()) },
      || {
        *stock.borrow_mut() -= 3;
        info!(remaining = *stock.borrow(), "reserved 3 units");
        Ok(())
      },
    ),
    HeavyCase::new(
      || Ok(*stock.borrow() < 5),
      || {
        info!("stock is running low");
        Ok(())
      },
    ),
  ])?;

  // An evaluator reports an error; the second case never runs.
  let result = multiple_heavy_case([
    HeavyCase::new(
      || -> anyhow::Result<bool> { Ok(parse_quantity("lots")? <= *stock.borrow()) },
      || Ok(()),
    ),
    HeavyCase::new(|| Ok(true), || bail!("unreachable")),
  ]);
  if let Err(e) = &result {
    error!(error = %format!("{:#}", e), "Reservation rejected.");
  }

  // A panicking action is reported as an error instead of unwinding.
  let result: anyhow::Result<()> =
    multiple_heavy_case([HeavyCase::new(|| Ok(true), || panic!("warehouse offline"))]);
  if let Err(e) = result {
    if let Some(SwitchingError::Panicked { case_index, phase, message }) = e.downcast_ref::<SwitchingError>() {
      error!(case_index, %phase, %message, "Case panicked.");
    }
  }

  info!(remaining = *stock.borrow(), "Done.");
  Ok(())
}
