//! Symlink resource.
use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};

use super::ResourceChange;
use super::helpers::fs::remove_entry;
use crate::platform::LinkStrategy;

/// A symlink that can be forced into place or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub target: PathBuf,
    /// Where the symlink lives.
    pub link: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(target: PathBuf, link: PathBuf) -> Self {
        Self { target, link }
    }

    /// Resolve a record's relative paths against `home`.
    #[must_use]
    pub fn in_home(home: &Path, source: &str, link: &str) -> Self {
        Self::new(home.join(source), home.join(link))
    }

    /// Human-readable description of this resource.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.link.display())
    }

    /// Whether `link` is already a symlink storing exactly `target`.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        std::fs::read_link(&self.link).is_ok_and(|existing| existing == self.target)
    }

    /// Refuse to touch `link` when doing so would remove `target`.
    fn ensure_not_over_target(&self) -> Result<()> {
        if self.target.starts_with(&self.link) {
            bail!(
                "link path {} contains the source {}",
                self.link.display(),
                self.target.display()
            );
        }
        Ok(())
    }

    /// Force the symlink into place, replacing whatever occupies `link`.
    ///
    /// # Errors
    ///
    /// Returns an error if `link` is `target` or one of its ancestors, if the
    /// existing entry cannot be removed, or if the strategy fails.
    pub fn apply(&self, strategy: &dyn LinkStrategy) -> Result<ResourceChange> {
        self.ensure_not_over_target()?;
        if self.is_correct() {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        remove_entry(&self.link)
            .with_context(|| format!("remove existing: {}", self.link.display()))?;
        strategy
            .create_link(&self.target, &self.link)
            .with_context(|| format!("create link: {}", self.link.display()))?;
        Ok(ResourceChange::Applied)
    }

    /// Remove whatever occupies `link`; absent paths are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if `link` is `target` or one of its ancestors, or if
    /// the entry exists but cannot be removed.
    pub fn remove(&self) -> Result<ResourceChange> {
        self.ensure_not_over_target()?;
        if remove_entry(&self.link)? {
            Ok(ResourceChange::Removed)
        } else {
            Ok(ResourceChange::AlreadyAbsent)
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::test_helpers::{MockExecutor, host_strategy};
    use std::sync::Arc;

    #[test]
    fn description_names_both_paths() {
        let resource = SymlinkResource::new(PathBuf::from("/source"), PathBuf::from("/link"));
        assert_eq!(resource.description(), "/source -> /link");
    }

    #[test]
    fn in_home_joins_relative_paths() {
        let resource = SymlinkResource::in_home(Path::new("/home/u"), "foo/.bashrc", ".bashrc");
        assert_eq!(resource.target, PathBuf::from("/home/u/foo/.bashrc"));
        assert_eq!(resource.link, PathBuf::from("/home/u/.bashrc"));
    }

    #[test]
    fn apply_creates_link_to_file() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join("rc"), "rc").unwrap();
        let resource = SymlinkResource::in_home(home.path(), "rc", ".rc");

        let change = resource.apply(host_strategy().as_ref()).unwrap();

        assert_eq!(change, ResourceChange::Applied);
        assert_eq!(std::fs::read_link(&resource.link).unwrap(), resource.target);
        assert!(resource.is_correct());
    }

    #[test]
    fn apply_replaces_regular_file() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join("rc"), "new").unwrap();
        std::fs::write(home.path().join(".rc"), "old").unwrap();
        let resource = SymlinkResource::in_home(home.path(), "rc", ".rc");

        resource.apply(host_strategy().as_ref()).unwrap();

        assert_eq!(std::fs::read_to_string(&resource.link).unwrap(), "new");
    }

    #[test]
    fn apply_replaces_real_directory() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join("nvim")).unwrap();
        std::fs::create_dir(home.path().join(".nvim")).unwrap();
        std::fs::write(home.path().join(".nvim/stale"), "stale").unwrap();
        let resource = SymlinkResource::in_home(home.path(), "nvim", ".nvim");

        resource.apply(host_strategy().as_ref()).unwrap();

        let meta = std::fs::symlink_metadata(&resource.link).unwrap();
        assert!(meta.file_type().is_symlink());
        assert!(!home.path().join("nvim/stale").exists());
    }

    #[test]
    fn apply_replaces_link_to_other_directory_without_nesting() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join("new")).unwrap();
        std::fs::create_dir(home.path().join("old")).unwrap();
        std::os::unix::fs::symlink(home.path().join("old"), home.path().join(".cfg")).unwrap();
        let resource = SymlinkResource::in_home(home.path(), "new", ".cfg");

        resource.apply(host_strategy().as_ref()).unwrap();

        assert!(resource.is_correct());
        assert!(std::fs::read_dir(home.path().join("old")).unwrap().next().is_none());
    }

    #[test]
    fn apply_skips_when_already_correct() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join("rc"), "rc").unwrap();
        std::os::unix::fs::symlink(home.path().join("rc"), home.path().join(".rc")).unwrap();
        let exec = Arc::new(MockExecutor::new(true));
        let strategy = crate::platform::Platform::detect()
            .unwrap()
            .link_strategy(exec.clone())
            .unwrap();

        let change = SymlinkResource::in_home(home.path(), "rc", ".rc")
            .apply(strategy.as_ref())
            .unwrap();

        assert_eq!(change, ResourceChange::AlreadyCorrect);
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn apply_refuses_self_link() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join(".rc"), "rc").unwrap();
        let resource = SymlinkResource::in_home(home.path(), ".rc", ".rc");

        let err = resource.apply(host_strategy().as_ref()).unwrap_err();

        assert!(err.to_string().contains("contains the source"));
        assert_eq!(std::fs::read_to_string(home.path().join(".rc")).unwrap(), "rc");
    }

    #[test]
    fn apply_refuses_link_over_source_ancestor() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join("foo")).unwrap();
        std::fs::write(home.path().join("foo/.bashrc"), "rc").unwrap();
        std::fs::write(home.path().join("foo/other"), "other").unwrap();
        let exec = Arc::new(MockExecutor::new(true));
        let strategy = crate::platform::Platform::detect()
            .unwrap()
            .link_strategy(exec.clone())
            .unwrap();

        let err = SymlinkResource::in_home(home.path(), "foo/.bashrc", "foo")
            .apply(strategy.as_ref())
            .unwrap_err();

        assert!(err.to_string().contains("contains the source"), "{err}");
        assert!(home.path().join("foo/.bashrc").is_file());
        assert!(home.path().join("foo/other").is_file());
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn remove_refuses_source_ancestor() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join("foo")).unwrap();
        std::fs::write(home.path().join("foo/.bashrc"), "rc").unwrap();

        let err = SymlinkResource::in_home(home.path(), "foo/.bashrc", "foo")
            .remove()
            .unwrap_err();

        assert!(err.to_string().contains("contains the source"), "{err}");
        assert!(home.path().join("foo/.bashrc").is_file());
    }

    #[test]
    fn remove_reports_absent_path() {
        let home = tempfile::tempdir().unwrap();
        let resource = SymlinkResource::in_home(home.path(), "rc", ".rc");
        assert_eq!(resource.remove().unwrap(), ResourceChange::AlreadyAbsent);
    }

    #[test]
    fn remove_deletes_link_only() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join("rc"), "rc").unwrap();
        let resource = SymlinkResource::in_home(home.path(), "rc", ".rc");
        resource.apply(host_strategy().as_ref()).unwrap();

        assert_eq!(resource.remove().unwrap(), ResourceChange::Removed);

        assert!(resource.link.symlink_metadata().is_err());
        assert!(resource.target.exists());
    }
}
