//! # argcount entry point
//!
//! Wires the process's standard streams into the dispatcher and maps its
//! outcome onto the exit status.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use argcount::Dispatcher;
use argcount::consts::ENV_LOG_FILTER;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<ExitCode> {
  init_tracing();

  let dispatcher = Dispatcher::from_env();
  let outcome = dispatcher.run(io::stdin().lock(), io::stdout().lock(), io::stderr().lock())?;

  debug!(?outcome, "dispatch finished");
  Ok(outcome.into())
}

/// Diagnostics go to stderr and stay silent unless `ARGCOUNT_LOG` is set.
fn init_tracing() {
  let filter = EnvFilter::try_from_env(ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("off"));

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(io::stderr))
    .with(filter)
    .init();
}
