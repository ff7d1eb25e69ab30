//! Berry source discovery and derived paths.
//!
//! Berry may come from two places: the PlatformIO dependency cache for the
//! current environment, or a submodule checked out under `components/`. The
//! first existing directory wins and every other path is derived from it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::consts::{
  COC_TOOL_PATH, COMPONENT_PATH, CONFIG_HEADER_PATH, DEFAULT_SUBDIR, GENERATE_DIR, LIBDEPS_PACKAGE, MARKER_FILENAME,
  SOURCE_SUBDIR,
};
use crate::env::BuildEnv;

/// Where the Berry sources were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLocation {
  /// `<libdeps>/<env>/berry`
  LibDeps,
  /// `<project>/components/berry_lang/berry-lang`
  Component,
}

impl SourceLocation {
  pub fn as_str(&self) -> &'static str {
    match self {
      SourceLocation::LibDeps => "libdeps",
      SourceLocation::Component => "component",
    }
  }
}

impl fmt::Display for SourceLocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Result of looking for the Berry source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  Found(Layout),
  /// No candidate exists. Holds every path that was checked, in order.
  NotFound(Vec<PathBuf>),
}

/// Candidate source directories in priority order.
///
/// The libdeps candidate needs an environment name; without one only the
/// component checkout is considered.
pub fn candidates(env: &BuildEnv) -> Vec<(SourceLocation, PathBuf)> {
  let mut out = Vec::with_capacity(2);

  if let Some(name) = &env.env_name {
    out.push((SourceLocation::LibDeps, env.libdeps_dir.join(name).join(LIBDEPS_PACKAGE)));
  }

  let component = COMPONENT_PATH.iter().fold(env.project_dir.clone(), |p, seg| p.join(seg));
  out.push((SourceLocation::Component, component));

  out
}

/// Find the Berry source tree for `env`.
pub fn resolve(env: &BuildEnv) -> Resolution {
  let candidates = candidates(env);

  for (location, path) in &candidates {
    if path.is_dir() {
      debug!(%location, path = %path.display(), "berry sources found");
      return Resolution::Found(Layout::new(env, *location, path.clone()));
    }
    debug!(%location, path = %path.display(), "berry sources not at candidate");
  }

  Resolution::NotFound(candidates.into_iter().map(|(_, p)| p).collect())
}

/// Every path the generator step touches, derived from one source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
  pub location: SourceLocation,
  pub source_dir: PathBuf,
  pub generate_dir: PathBuf,
  pub marker: PathBuf,
  pub coc_tool: PathBuf,
  pub config_header: PathBuf,
}

impl Layout {
  pub fn new(env: &BuildEnv, location: SourceLocation, source_dir: PathBuf) -> Self {
    let generate_dir = source_dir.join(GENERATE_DIR);
    let marker = generate_dir.join(MARKER_FILENAME);
    let coc_tool = join_all(&source_dir, &COC_TOOL_PATH);
    let config_header = join_all(&env.src_dir, &CONFIG_HEADER_PATH);

    Self {
      location,
      source_dir,
      generate_dir,
      marker,
      coc_tool,
      config_header,
    }
  }

  /// Berry's C sources, the generator's first input.
  pub fn berry_src_dir(&self) -> PathBuf {
    self.source_dir.join(SOURCE_SUBDIR)
  }

  /// Berry's default modules, the generator's second input.
  pub fn berry_default_dir(&self) -> PathBuf {
    self.source_dir.join(DEFAULT_SUBDIR)
  }

  pub fn is_generated(&self) -> bool {
    self.marker.is_file()
  }
}

fn join_all(base: &Path, segments: &[&str]) -> PathBuf {
  segments.iter().fold(base.to_path_buf(), |p, seg| p.join(seg))
}
