//! Implementation of the `berrygen generate` command.
//!
//! This is what the PlatformIO pre-build hook runs. It resolves the Berry
//! sources, skips quietly when there are none, and otherwise runs `coc`
//! unless the generated tables are already present.

use anyhow::{Context, Result};

use berrygen_lib::{BuildEnv, ExecuteError, GenerateOptions, Invocation, Outcome, ProcessRunner, SystemRunner, run};

use crate::output::{print_info, print_stat, print_success, print_warning};

/// Announces the generator on the console before handing it to [`SystemRunner`].
struct ConsoleRunner {
  verbose: bool,
}

impl ProcessRunner for ConsoleRunner {
  fn run(&self, invocation: &Invocation) -> Result<(), ExecuteError> {
    print_info("Berry: generating constant tables...");
    if self.verbose {
      print_stat("Command", &invocation.to_string());
    }
    SystemRunner.run(invocation)
  }
}

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or if the
/// generator fails to start or exits unsuccessfully.
pub fn cmd_generate(env: &BuildEnv, options: &GenerateOptions, verbose: bool) -> Result<()> {
  let outcome = run(env, options, &ConsoleRunner { verbose }).context("Berry code generation failed")?;

  match outcome {
    Outcome::Skipped { searched } => {
      print_warning("Berry: source directory not found, skipping code generation");
      if verbose {
        for path in &searched {
          print_stat("Searched", &path.display().to_string());
        }
      }
    }
    Outcome::UpToDate { layout } => {
      print_success("Berry: constant tables up to date");
      if verbose {
        print_stat("Marker", &layout.marker.display().to_string());
      }
    }
    Outcome::Generated { layout, marker_written } => {
      print_success("Berry: generation complete");
      print_stat("Output", &layout.generate_dir.display().to_string());
      if !marker_written {
        print_warning(&format!(
          "Berry: generator did not create {}; it will run again on the next build",
          layout.marker.display()
        ));
      }
    }
    Outcome::WouldGenerate { invocation, .. } => {
      print_info("Berry: constant tables would be generated");
      print_stat("Command", &invocation.to_string());
      print_stat("Working dir", &invocation.cwd.display().to_string());
    }
  }

  Ok(())
}
