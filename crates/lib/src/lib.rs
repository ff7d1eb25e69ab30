//! berrygen-lib: Core logic for the Berry constant-table pre-build step
//!
//! This crate decides whether Berry's generated constant tables are present
//! and, if not, runs Berry's `coc` generator to produce them:
//! - `BuildEnv`: the project directories supplied by the host build system
//! - `Layout`: the resolved Berry source tree and every path derived from it
//! - `Plan`: what a run would do (skip, nothing, or generate)
//! - `Invocation`: the exact generator command line

pub mod consts;
pub mod env;
pub mod execute;
pub mod generate;
pub mod layout;
pub mod status;


pub use env::BuildEnv;
pub use execute::{ExecuteError, Invocation, ProcessRunner, SystemRunner};
pub use generate::{GenerateError, GenerateOptions, Outcome, Plan, apply, plan, run};
pub use layout::{Layout, Resolution, SourceLocation};
