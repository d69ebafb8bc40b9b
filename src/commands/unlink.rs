//! Unlink command implementation.
use std::path::Path;

use crate::cli::Mode;
use crate::engine::{self, Summary};
use crate::error::DotlinkError;
use crate::logging::Logger;

use super::{Environment, mutation_pass, prepare};

/// Validate `file`, then remove every link it declares.
///
/// Sources are not required to exist; every record must still be well
/// formed and its link parent must exist.
///
/// # Errors
///
/// Returns an error if a guard fails, any record is invalid, or an entry
/// cannot be removed.
pub fn run(file: &Path, env: &Environment, log: &Logger) -> Result<Summary, DotlinkError> {
    let path = prepare(file, env, Mode::Unlink, log)?;

    log.stage("Removing links");
    engine::unlink(mutation_pass(&path, &env.settings)?, &env.home, log)
}
