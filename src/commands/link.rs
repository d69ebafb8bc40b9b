//! Link command implementation.
use std::path::Path;
use std::sync::Arc;

use crate::cli::Mode;
use crate::engine::{self, Summary};
use crate::error::DotlinkError;
use crate::exec::Executor;
use crate::logging::Logger;

use super::{Environment, mutation_pass, prepare};

/// Validate `file`, then create every link it declares.
///
/// # Errors
///
/// Returns an error if `ln` is unavailable, a guard fails, any record is
/// invalid, or a link cannot be created.
pub fn run(
    file: &Path,
    env: &Environment,
    exec: Arc<dyn Executor>,
    log: &Logger,
) -> Result<Summary, DotlinkError> {
    let strategy = env.platform.link_strategy(exec)?;
    let path = prepare(file, env, Mode::Link, log)?;

    log.stage("Creating links");
    log.debug(&format!("using ln {} ({})", strategy.flags(), strategy.os()));
    engine::link(
        mutation_pass(&path, &env.settings)?,
        &env.home,
        strategy.as_ref(),
        log,
    )
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::{PlatformError, ValidationError};
    use crate::platform::Platform;
    use crate::test_helpers::MockExecutor;

    fn env_in(home: &Path) -> Environment {
        let root = home.join("dotfiles");
        std::fs::create_dir_all(&root).unwrap();
        Environment {
            home: home.to_path_buf(),
            cwd: root,
            settings: Settings::default(),
            platform: Platform::detect().unwrap(),
        }
    }

    #[test]
    fn missing_ln_fails_before_reading_mapping() {
        let home = tempfile::tempdir().unwrap();
        let env = env_in(home.path());
        let err = run(
            Path::new("links.conf"),
            &env,
            Arc::new(MockExecutor::new(false)),
            &Logger::new("test"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DotlinkError::Platform(PlatformError::MissingTool(_))
        ));
    }

    #[test]
    fn late_invalid_record_prevents_every_link() {
        let home = tempfile::tempdir().unwrap();
        let env = env_in(home.path());
        std::fs::write(home.path().join("dotfiles/rc"), "rc").unwrap();
        std::fs::write(
            home.path().join("dotfiles/links.conf"),
            "f,dotfiles/rc,.rc\nf,dotfiles/missing,.missing\n",
        )
        .unwrap();
        let exec = Arc::new(MockExecutor::new(true));

        let err = run(
            Path::new("links.conf"),
            &env,
            exec.clone(),
            &Logger::new("test"),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            DotlinkError::Validation(ValidationError::MissingFile { line: 2, .. })
        ));
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn valid_mapping_issues_one_ln_per_record() {
        let home = tempfile::tempdir().unwrap();
        let env = env_in(home.path());
        std::fs::write(home.path().join("dotfiles/rc"), "rc").unwrap();
        std::fs::create_dir(home.path().join("dotfiles/nvim")).unwrap();
        std::fs::write(
            home.path().join("dotfiles/links.conf"),
            "f,dotfiles/rc,.rc\nd,dotfiles/nvim,.nvim\n",
        )
        .unwrap();
        let exec = Arc::new(MockExecutor::new(true));

        let summary = run(
            Path::new("links.conf"),
            &env,
            exec.clone(),
            &Logger::new("test"),
        )
        .unwrap();

        assert_eq!(summary.records, 2);
        let calls = exec.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].ends_with(".rc"), "{calls:?}");
        assert!(calls[1].ends_with(".nvim"), "{calls:?}");
    }
}
