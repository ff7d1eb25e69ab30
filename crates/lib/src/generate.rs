//! The generation trigger.
//!
//! A run is split in two, like a plan and an apply:
//! - [`plan`] resolves the Berry sources and decides what to do, touching nothing
//! - [`apply`] creates the output directory and runs `coc` when the plan says so
//!
//! Generation is gated solely on the marker file. A generator interrupted
//! before writing it leaves the step "not done", and the next build simply
//! runs it again.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::env::BuildEnv;
use crate::execute::{ExecuteError, Invocation, ProcessRunner};
use crate::layout::{self, Layout, Resolution};

#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("failed to create directory {}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Execute(#[from] ExecuteError),
}

/// Options controlling a trigger run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
  /// Regenerate even if the marker file is present.
  pub force: bool,
  /// Decide only; never create directories or spawn the generator.
  pub dry_run: bool,
  /// Program used to run `coc` (e.g. `python3`). `None` runs it directly.
  pub interpreter: Option<PathBuf>,
}

/// What a run will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
  /// No Berry sources were found; nothing to generate.
  Skip { searched: Vec<PathBuf> },
  /// The marker exists; generated tables are assumed current.
  UpToDate { layout: Layout },
  /// The generator must run.
  Generate { layout: Layout, invocation: Invocation },
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Skipped { searched: Vec<PathBuf> },
  UpToDate { layout: Layout },
  Generated { layout: Layout, marker_written: bool },
  /// Dry run: the generator would have run with this invocation.
  WouldGenerate { layout: Layout, invocation: Invocation },
}

/// Resolve sources and decide whether generation is needed.
pub fn plan(env: &BuildEnv, options: &GenerateOptions) -> Plan {
  let layout = match layout::resolve(env) {
    Resolution::Found(layout) => layout,
    Resolution::NotFound(searched) => {
      info!(searched = ?searched, "berry source directory not found, skipping code generation");
      return Plan::Skip { searched };
    }
  };

  if layout.is_generated() && !options.force {
    info!(marker = %layout.marker.display(), "berry constant tables up to date");
    return Plan::UpToDate { layout };
  }

  let invocation = Invocation::coc(&layout, options.interpreter.as_deref());
  Plan::Generate { layout, invocation }
}

/// Carry out `plan`, running the generator through `runner` if required.
pub fn apply(plan: Plan, runner: &dyn ProcessRunner) -> Result<Outcome, GenerateError> {
  let (layout, invocation) = match plan {
    Plan::Skip { searched } => return Ok(Outcome::Skipped { searched }),
    Plan::UpToDate { layout } => return Ok(Outcome::UpToDate { layout }),
    Plan::Generate { layout, invocation } => (layout, invocation),
  };

  info!(
    location = %layout.location,
    source = %layout.source_dir.display(),
    "generating berry constant tables"
  );

  fs::create_dir_all(&layout.generate_dir).map_err(|source| GenerateError::CreateDir {
    path: layout.generate_dir.clone(),
    source,
  })?;

  runner.run(&invocation)?;

  let marker_written = layout.is_generated();
  if !marker_written {
    warn!(
      marker = %layout.marker.display(),
      "generator succeeded but did not write the marker; it will run again next build"
    );
  }

  info!(output = %layout.generate_dir.display(), "berry generation complete");
  Ok(Outcome::Generated { layout, marker_written })
}

/// Plan and apply in one step, honouring `options.dry_run`.
pub fn run(env: &BuildEnv, options: &GenerateOptions, runner: &dyn ProcessRunner) -> Result<Outcome, GenerateError> {
  match plan(env, options) {
    Plan::Generate { layout, invocation } if options.dry_run => {
      info!(cmd = %invocation, "dry run, generator not started");
      Ok(Outcome::WouldGenerate { layout, invocation })
    }
    plan => apply(plan, runner),
  }
}
