// Shared helpers for integration tests.
//
// Provides a temporary home directory with a `dotfiles/` root and a fluent
// builder so each integration test can lay out sources and a mapping file
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dotlink::commands::Environment;
use dotlink::config::Settings;
use dotlink::platform::Platform;

/// An isolated home directory backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct HomeFixture {
    /// Temporary directory standing in for `$HOME`.
    pub home: tempfile::TempDir,
}

impl HomeFixture {
    /// Path to the home directory.
    pub fn path(&self) -> &Path {
        self.home.path()
    }

    /// Path to the `dotfiles/` root inside home.
    pub fn root(&self) -> PathBuf {
        self.home.path().join("dotfiles")
    }

    /// Path of the mapping file inside the root.
    pub fn mapping(&self) -> PathBuf {
        self.root().join("links.conf")
    }

    /// Environment for a run started from the root with default settings.
    pub fn environment(&self) -> Environment {
        Environment {
            home: self.home.path().to_path_buf(),
            cwd: self.root(),
            settings: Settings::default(),
            platform: Platform::detect().expect("supported platform"),
        }
    }

    /// Whether anything, including a dangling symlink, exists at `rel`.
    pub fn entry_exists(&self, rel: &str) -> bool {
        self.home.path().join(rel).symlink_metadata().is_ok()
    }

    /// Target stored in the symlink at `rel`.
    pub fn link_target(&self, rel: &str) -> PathBuf {
        std::fs::read_link(self.home.path().join(rel)).expect("read link")
    }
}

/// Fluent builder for [`HomeFixture`].
pub struct HomeBuilder {
    fixture: HomeFixture,
}

impl HomeBuilder {
    /// Begin building a home with an empty `dotfiles/` root.
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(home.path().join("dotfiles")).expect("create root");
        Self {
            fixture: HomeFixture { home },
        }
    }

    /// Create a regular file at `rel` (relative to home) with its parents.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.fixture.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create file parent");
        }
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Create a directory at `rel` (relative to home).
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.fixture.path().join(rel)).expect("create dir");
        self
    }

    /// Write the mapping file `dotfiles/links.conf`.
    pub fn with_mapping(self, content: &str) -> Self {
        std::fs::write(self.fixture.mapping(), content).expect("write mapping");
        self
    }

    /// Finish building and return the fixture.
    pub fn build(self) -> HomeFixture {
        self.fixture
    }
}
