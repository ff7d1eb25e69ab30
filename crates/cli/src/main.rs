mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use berrygen_lib::{BuildEnv, GenerateOptions};
use berrygen_lib::consts::vars;

use crate::output::print_error;

/// berrygen - Berry constant-table generator for PlatformIO builds
#[derive(Parser)]
#[command(name = "berrygen")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(flatten)]
  env: EnvArgs,

  /// Defaults to `generate` when omitted
  #[command(subcommand)]
  command: Option<Commands>,
}

/// Project directories, normally exported by PlatformIO.
#[derive(Args)]
struct EnvArgs {
  /// Project root (default: current directory)
  #[arg(long, global = true, env = vars::PROJECT_DIR)]
  project_dir: Option<PathBuf>,

  /// Library dependency cache root (default: <project>/.pio/libdeps)
  #[arg(long, global = true, env = vars::PROJECT_LIBDEPS_DIR)]
  libdeps_dir: Option<PathBuf>,

  /// Build environment name
  #[arg(long, global = true, env = vars::PIOENV)]
  env_name: Option<String>,

  /// Project source directory (default: <project>/src)
  #[arg(long, global = true, env = vars::PROJECT_SRC_DIR)]
  src_dir: Option<PathBuf>,
}

impl EnvArgs {
  fn into_build_env(self) -> Result<BuildEnv> {
    let project_dir = match self.project_dir {
      Some(dir) => dir,
      None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let mut env = BuildEnv::new(project_dir);
    if let Some(dir) = self.libdeps_dir {
      env = env.with_libdeps_dir(dir);
    }
    if let Some(name) = self.env_name.filter(|n| !n.is_empty()) {
      env = env.with_env_name(name);
    }
    if let Some(dir) = self.src_dir {
      env = env.with_src_dir(dir);
    }
    Ok(env)
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Generate Berry constant tables if they are missing
  Generate {
    /// Regenerate even if the tables already exist
    #[arg(short, long)]
    force: bool,

    /// Show what would be run without running it
    #[arg(long)]
    dry_run: bool,

    /// Program used to run the coc tool (e.g. python3)
    #[arg(long)]
    interpreter: Option<PathBuf>,
  },

  /// Show where Berry was found and whether tables are generated
  Status {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(e) = run(cli) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  let verbose = cli.verbose;
  let env = cli.env.into_build_env()?;
  debug!(?env, "resolved build environment");

  match cli.command.unwrap_or(Commands::Generate {
    force: false,
    dry_run: false,
    interpreter: None,
  }) {
    Commands::Generate {
      force,
      dry_run,
      interpreter,
    } => {
      let options = GenerateOptions {
        force,
        dry_run,
        interpreter,
      };
      cmd::cmd_generate(&env, &options, verbose)
    }
    Commands::Status { json } => cmd::cmd_status(&env, json),
  }
}
