//! Read-only report of the generator layout for a build environment.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::env::BuildEnv;
use crate::layout::{self, Layout, Resolution};

#[derive(Debug, Clone, Serialize)]
pub struct Status {
  pub env: BuildEnv,
  /// `None` when no Berry source directory was found.
  pub layout: Option<Layout>,
  /// Candidate directories that were checked, in priority order.
  pub searched: Vec<PathBuf>,
  pub generated: bool,
  pub config_header_present: bool,
  /// Number of regular files under the generated directory.
  pub generated_files: usize,
}

impl Status {
  /// Whether the next `generate` run would start the generator.
  pub fn needs_generation(&self) -> bool {
    self.layout.is_some() && !self.generated
  }
}

pub fn status(env: &BuildEnv) -> Status {
  let searched = layout::candidates(env).into_iter().map(|(_, p)| p).collect();

  let layout = match layout::resolve(env) {
    Resolution::Found(layout) => Some(layout),
    Resolution::NotFound(_) => None,
  };

  let (generated, config_header_present, generated_files) = match &layout {
    Some(l) => (l.is_generated(), l.config_header.is_file(), count_files(&l.generate_dir)),
    None => (false, false, 0),
  };

  Status {
    env: env.clone(),
    layout,
    searched,
    generated,
    config_header_present,
    generated_files,
  }
}

fn count_files(dir: &Path) -> usize {
  if !dir.is_dir() {
    return 0;
  }

  WalkDir::new(dir)
    .into_iter()
    .filter_map(Result::ok)
    .filter(|e| e.file_type().is_file())
    .count()
}
