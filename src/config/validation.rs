//! Fail-fast validation of mapping records against the filesystem.
use std::fs;
use std::path::{Path, PathBuf};

use super::record::{Kind, LinkRecord, RawRecord};
use crate::cli::Mode;
use crate::error::{ConfigError, DotlinkError, ValidationError};

/// Checks records against the filesystem rooted at a home directory.
#[derive(Debug, Clone, Copy)]
pub struct RecordValidator<'a> {
    home: &'a Path,
    check_sources: bool,
}

impl<'a> RecordValidator<'a> {
    /// Create a validator resolving paths against `home`.
    #[must_use]
    pub const fn new(home: &'a Path) -> Self {
        Self {
            home,
            check_sources: true,
        }
    }

    /// Create a validator that only checks link parents.
    ///
    /// Removing a link does not need its source, so a link whose source
    /// was deleted can still be removed.
    #[must_use]
    pub const fn links_only(home: &'a Path) -> Self {
        Self {
            home,
            check_sources: false,
        }
    }

    /// Validator for `mode`.
    #[must_use]
    pub const fn for_mode(home: &'a Path, mode: Mode) -> Self {
        match mode {
            Mode::Link => Self::new(home),
            Mode::Unlink => Self::links_only(home),
        }
    }

    /// Check that the record's source is present with the declared kind and
    /// that the link's parent directory exists.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFile`] or
    /// [`ValidationError::MissingDirectory`] naming the resolved path.
    pub fn check(&self, record: &LinkRecord) -> Result<(), ValidationError> {
        let source = self.home.join(&record.source);
        match record.kind {
            _ if !self.check_sources => {}
            Kind::Directory if !is_dir(&source) => {
                return Err(ValidationError::MissingDirectory {
                    line: record.line,
                    path: source,
                });
            }
            Kind::File if !is_file(&source) => {
                return Err(ValidationError::MissingFile {
                    line: record.line,
                    path: source,
                });
            }
            Kind::Directory | Kind::File => {}
        }

        let parent = self.link_parent(&record.link);
        if !is_dir(&parent) {
            return Err(ValidationError::MissingDirectory {
                line: record.line,
                path: parent,
            });
        }
        Ok(())
    }

    /// Parent directory of `home/link`; the home directory itself when the
    /// link has no directory component.
    fn link_parent(&self, link: &str) -> PathBuf {
        self.home
            .join(link)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| self.home.to_path_buf(), Path::to_path_buf)
    }
}

/// Follows symlinks: a link to a directory counts as a directory.
fn is_dir(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_dir())
}

/// Follows symlinks: a dangling link is not a file.
fn is_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file())
}

/// Validate every record of a pass for `mode`, stopping at the first failure.
///
/// Returns the number of records checked.
///
/// # Errors
///
/// Returns the first parse or validation error in file order.
pub fn validate<I>(records: I, home: &Path, mode: Mode) -> Result<usize, DotlinkError>
where
    I: IntoIterator<Item = Result<RawRecord, ConfigError>>,
{
    let validator = RecordValidator::for_mode(home, mode);
    let mut count = 0;
    for raw in records {
        let record = raw?.into_record()?;
        validator.check(&record)?;
        count += 1;
    }
    Ok(count)
}
