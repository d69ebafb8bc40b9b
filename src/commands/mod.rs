//! Command orchestration: environment resolution, guards and the two passes.
pub mod link;
pub mod unlink;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::Mode;
use crate::config::settings::ROOT_ENV;
use crate::config::{self, Settings, validation};
use crate::engine::Summary;
use crate::error::{ArgumentError, DotlinkError, EnvironmentError};
use crate::exec::Executor;
use crate::logging::Logger;
use crate::platform::Platform;

/// Process state a run depends on, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Home directory every record path resolves against.
    pub home: PathBuf,
    /// Directory the tool was started from.
    pub cwd: PathBuf,
    /// Effective settings.
    pub settings: Settings,
    /// Detected host platform.
    pub platform: Platform,
}

impl Environment {
    /// Resolve the environment of the current process.
    ///
    /// The platform is checked first so an unsupported host fails before any
    /// file is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform is unsupported, the home or current
    /// directory cannot be determined, or the settings file is invalid.
    pub fn from_process() -> Result<Self, DotlinkError> {
        let platform = Platform::detect()?;
        let home = dirs::home_dir().ok_or(EnvironmentError::HomeNotFound)?;
        let cwd = std::env::current_dir().map_err(EnvironmentError::CurrentDir)?;
        let settings = match Settings::default_path() {
            Some(path) => Settings::load(&path)?,
            None => Settings::default(),
        }
        .with_root_override(std::env::var_os(ROOT_ENV).map(PathBuf::from));

        Ok(Self {
            home,
            cwd,
            settings,
            platform,
        })
    }

    /// Mapping file path resolved against the working directory.
    #[must_use]
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.cwd.join(file)
    }
}

/// Check that `file` carries the configured mapping file name.
///
/// # Errors
///
/// Returns [`ArgumentError::FileName`] on mismatch.
pub fn check_file_name(file: &Path, settings: &Settings) -> Result<(), ArgumentError> {
    let found = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if found == settings.file_name {
        Ok(())
    } else {
        Err(ArgumentError::FileName {
            expected: settings.file_name.clone(),
            found,
        })
    }
}

/// Check that `cwd` lies inside `root`.
///
/// Both paths are canonicalized when possible so that symlinked homes
/// compare equal.
///
/// # Errors
///
/// Returns [`EnvironmentError::OutsideRoot`] if it does not.
pub fn ensure_within_root(cwd: &Path, root: &Path) -> Result<(), EnvironmentError> {
    let outside = || EnvironmentError::OutsideRoot {
        root: root.to_path_buf(),
        cwd: cwd.to_path_buf(),
    };
    let root = dunce::canonicalize(root).map_err(|_| outside())?;
    let cwd = dunce::canonicalize(cwd).unwrap_or_else(|_| cwd.to_path_buf());
    if cwd.starts_with(&root) {
        Ok(())
    } else {
        Err(outside())
    }
}

/// Run the guards and the validation pass for `mode`.
///
/// Returns the resolved mapping file path.
fn prepare(
    file: &Path,
    env: &Environment,
    mode: Mode,
    log: &Logger,
) -> Result<PathBuf, DotlinkError> {
    log.stage("Checking environment");
    check_file_name(file, &env.settings)?;
    let root = env.settings.resolved_root(&env.home);
    ensure_within_root(&env.cwd, &root)?;
    log.debug(&format!("platform: {}", env.platform.os));
    log.debug(&format!("home: {}", env.home.display()));
    log.debug(&format!("root: {}", root.display()));

    let path = env.resolve(file);
    log.stage(&format!("Validating {}", file.display()));
    let count = validation::validate(config::records(&path, &env.settings)?, &env.home, mode)?;
    log.info(&format!("{count} record(s) valid"));
    Ok(path)
}

/// Open a fresh pass over the mapping file for the mutation stage.
fn mutation_pass(
    path: &Path,
    settings: &Settings,
) -> Result<impl Iterator<Item = Result<config::LinkRecord, DotlinkError>>, DotlinkError> {
    Ok(config::records(path, settings)?.link_records())
}

/// Run `mode` over the mapping file `file`.
///
/// # Errors
///
/// Returns the first error of any stage; nothing is modified unless every
/// record validates.
pub fn run(
    mode: Mode,
    file: &Path,
    env: &Environment,
    exec: Arc<dyn Executor>,
    log: &Logger,
) -> Result<Summary, DotlinkError> {
    let summary = match mode {
        Mode::Link => link::run(file, env, exec, log)?,
        Mode::Unlink => unlink::run(file, env, log)?,
    };
    log.info(&format!(
        "{}: {} record(s), {} changed",
        summary.mode, summary.records, summary.changed
    ));
    Ok(summary)
}
