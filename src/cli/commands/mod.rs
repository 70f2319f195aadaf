//! Command implementations for the data validator CLI
//!
//! - `validate`: the validation pass and its output stages
//! - `shared`: logging, configuration loading and the run report

pub mod shared;
pub mod validate;

pub use shared::RunReport;
pub use validate::{RunOptions, execute};

use crate::Result;
use crate::cli::args::Args;

/// Main command runner
pub fn run(args: Args) -> Result<RunReport> {
    validate::run_validate(args)
}
