//! Host platform detection and per-family link strategies.
use anyhow::{Context as _, Result};
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::PlatformError;
use crate::exec::Executor;

/// Program used to create links.
const LN: &str = "ln";

/// Detected operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux with GNU coreutils.
    Linux,
    /// macOS with BSD userland.
    MacOs,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] on any host other than Linux or macOS.
    pub fn detect() -> Result<Self, PlatformError> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an operating system identifier (as in [`std::env::consts::OS`]) to a platform.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Unsupported`] for unknown identifiers.
    pub fn from_os_name(name: &str) -> Result<Self, PlatformError> {
        let os = match name {
            "linux" => Os::Linux,
            "macos" => Os::MacOs,
            other => {
                return Err(PlatformError::Unsupported {
                    platform: other.to_string(),
                });
            }
        };
        Ok(Self { os })
    }

    /// Select the link strategy for this platform.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MissingTool`] if `ln` is not on `PATH`.
    pub fn link_strategy(
        &self,
        exec: Arc<dyn Executor>,
    ) -> Result<Box<dyn LinkStrategy>, PlatformError> {
        if !exec.which(LN) {
            return Err(PlatformError::MissingTool(LN.to_string()));
        }
        Ok(match self.os {
            Os::Linux => Box::new(GnuLn { exec }),
            Os::MacOs => Box::new(BsdLn { exec }),
        })
    }
}

/// Creates symbolic links the way a host family expects.
///
/// Implementations must never dereference an existing link at the
/// destination: linking a directory onto a path that is itself a symlink to
/// a directory replaces the link rather than creating an entry inside it.
pub trait LinkStrategy: fmt::Debug {
    /// Host family this strategy targets.
    fn os(&self) -> Os;

    /// `ln` flags used for a forced, non-dereferencing symbolic link.
    fn flags(&self) -> &'static str;

    /// Create a symlink at `link` that stores `target` verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    fn create_link(&self, target: &Path, link: &Path) -> Result<()>;
}

/// GNU coreutils: `ln -sfn`.
#[derive(Debug)]
pub struct GnuLn {
    exec: Arc<dyn Executor>,
}

/// BSD userland: `ln -sfh`.
#[derive(Debug)]
pub struct BsdLn {
    exec: Arc<dyn Executor>,
}

fn run_ln(exec: &dyn Executor, flags: &str, target: &Path, link: &Path) -> Result<()> {
    exec.run(
        LN,
        &[OsStr::new(flags), target.as_os_str(), link.as_os_str()],
    )
    .with_context(|| format!("{LN} {flags} {} {}", target.display(), link.display()))?;
    Ok(())
}

impl LinkStrategy for GnuLn {
    fn os(&self) -> Os {
        Os::Linux
    }

    fn flags(&self) -> &'static str {
        "-sfn"
    }

    fn create_link(&self, target: &Path, link: &Path) -> Result<()> {
        run_ln(self.exec.as_ref(), self.flags(), target, link)
    }
}

impl LinkStrategy for BsdLn {
    fn os(&self) -> Os {
        Os::MacOs
    }

    fn flags(&self) -> &'static str {
        "-sfh"
    }

    fn create_link(&self, target: &Path, link: &Path) -> Result<()> {
        run_ln(self.exec.as_ref(), self.flags(), target, link)
    }
}
