//! Generator process execution.
//!
//! The trigger only ever runs one command: Berry's `coc` with a fixed
//! argument shape. [`Invocation`] captures that command line and
//! [`ProcessRunner`] runs it, so callers and tests can substitute the
//! process spawning.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

use crate::layout::Layout;

#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The program could not be started at all.
  #[error("failed to start {}", program.display())]
  Spawn { program: PathBuf, source: std::io::Error },

  /// The program ran and exited unsuccessfully.
  #[error("{} failed with exit code {code:?}", program.display())]
  Failed { program: PathBuf, code: Option<i32> },
}

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: PathBuf,
  pub args: Vec<OsString>,
  pub cwd: PathBuf,
}

impl Invocation {
  /// Build the `coc` command line for `layout`:
  ///
  /// ```text
  /// coc -o <generate> <source>/src <source>/default -c <config-header>
  /// ```
  ///
  /// With an `interpreter`, the interpreter becomes the program and the tool
  /// path is prepended to the arguments.
  pub fn coc(layout: &Layout, interpreter: Option<&Path>) -> Self {
    let mut args: Vec<OsString> = Vec::with_capacity(7);

    let program = match interpreter {
      Some(interp) => {
        args.push(layout.coc_tool.clone().into_os_string());
        interp.to_path_buf()
      }
      None => layout.coc_tool.clone(),
    };

    args.push("-o".into());
    args.push(layout.generate_dir.clone().into_os_string());
    args.push(layout.berry_src_dir().into_os_string());
    args.push(layout.berry_default_dir().into_os_string());
    args.push("-c".into());
    args.push(layout.config_header.clone().into_os_string());

    Self {
      program,
      args,
      cwd: layout.source_dir.clone(),
    }
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program.display())?;
    for arg in &self.args {
      write!(f, " {}", arg.to_string_lossy())?;
    }
    Ok(())
  }
}

/// Runs an [`Invocation`] to completion.
pub trait ProcessRunner {
  fn run(&self, invocation: &Invocation) -> Result<(), ExecuteError>;
}

/// Spawns the real process, inheriting stdio and blocking until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
  fn run(&self, invocation: &Invocation) -> Result<(), ExecuteError> {
    info!(cmd = %invocation, cwd = %invocation.cwd.display(), "executing generator");

    let status = Command::new(&invocation.program)
      .args(&invocation.args)
      .current_dir(&invocation.cwd)
      .status()
      .map_err(|source| ExecuteError::Spawn {
        program: invocation.program.clone(),
        source,
      })?;

    debug!(?status, "generator exited");

    if !status.success() {
      return Err(ExecuteError::Failed {
        program: invocation.program.clone(),
        code: status.code(),
      });
    }

    Ok(())
  }
}
