//! Build environment supplied by the host build system.
//!
//! PlatformIO hands its pre-build scripts a dictionary of project variables.
//! Here those values live in an explicit struct so the rest of the crate
//! never reads the process environment directly.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::vars;

#[derive(Debug, Error)]
pub enum EnvError {
  #[error("required environment variable {0} is not set")]
  Missing(&'static str),
}

/// Directories and identifiers describing the project being built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEnv {
  /// Project root (`PROJECT_DIR`).
  pub project_dir: PathBuf,
  /// Per-environment dependency cache root (`PROJECT_LIBDEPS_DIR`).
  pub libdeps_dir: PathBuf,
  /// Build environment name (`PIOENV`).
  pub env_name: Option<String>,
  /// Project source directory (`PROJECT_SRC_DIR`).
  pub src_dir: PathBuf,
}

impl BuildEnv {
  /// Create an environment rooted at `project_dir` with PlatformIO's default layout.
  ///
  /// Relative directories are made absolute against the current directory,
  /// since the generator runs from inside the Berry source tree.
  pub fn new(project_dir: impl Into<PathBuf>) -> Self {
    let project_dir = absolute(project_dir.into());
    Self {
      libdeps_dir: project_dir.join(".pio").join("libdeps"),
      src_dir: project_dir.join("src"),
      env_name: None,
      project_dir,
    }
  }

  pub fn with_libdeps_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.libdeps_dir = absolute(dir.into());
    self
  }

  pub fn with_env_name(mut self, name: impl Into<String>) -> Self {
    self.env_name = Some(name.into());
    self
  }

  pub fn with_src_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.src_dir = absolute(dir.into());
    self
  }

  /// Read the environment from the PlatformIO variables of the current process.
  ///
  /// For hosts that call the library directly, such as a `build.rs`; the
  /// `berrygen` binary maps the same variables through its flags. Only `PROJECT_DIR` is required. Unset or empty optional variables fall
  /// back to the defaults of [`BuildEnv::new`].
  pub fn from_process_env() -> Result<Self, EnvError> {
    let project_dir = var(vars::PROJECT_DIR).ok_or(EnvError::Missing(vars::PROJECT_DIR))?;
    let mut env = Self::new(project_dir);

    if let Some(dir) = var(vars::PROJECT_LIBDEPS_DIR) {
      env = env.with_libdeps_dir(dir);
    }
    if let Some(name) = var(vars::PIOENV) {
      env = env.with_env_name(name);
    }
    if let Some(dir) = var(vars::PROJECT_SRC_DIR) {
      env = env.with_src_dir(dir);
    }

    debug!(?env, "build environment loaded");
    Ok(env)
  }

  pub fn project_dir(&self) -> &Path {
    &self.project_dir
  }
}

fn absolute(path: PathBuf) -> PathBuf {
  std::path::absolute(&path).unwrap_or(path)
}

fn var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.is_empty())
}
