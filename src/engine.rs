//! Link engine: applies validated records to the filesystem.
//!
//! Both passes trust their input. Records are expected to have gone through
//! [`validate`](crate::config::validation::validate) first, so neither pass
//! checks that sources exist. The first failure aborts the pass; earlier
//! changes stay in place.
use std::path::Path;

use crate::cli::Mode;
use crate::config::LinkRecord;
use crate::error::{DotlinkError, ExecutionError};
use crate::logging::Logger;
use crate::platform::LinkStrategy;
use crate::resources::ResourceChange;
use crate::resources::symlink::SymlinkResource;

/// Outcome of a completed pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Mode the pass ran in.
    pub mode: Mode,
    /// Number of records processed.
    pub records: usize,
    /// Number of records that modified the filesystem.
    pub changed: usize,
}

impl Summary {
    const fn new(mode: Mode) -> Self {
        Self {
            mode,
            records: 0,
            changed: 0,
        }
    }

    const fn record(&mut self, change: ResourceChange) {
        self.records += 1;
        if change.is_change() {
            self.changed += 1;
        }
    }
}

/// Create a symlink at `home/link` pointing to `home/source` for every record.
///
/// Whatever occupies the link path is replaced. A link that already points at
/// the right source is left alone.
///
/// # Errors
///
/// Returns the first record error from the iterator, or
/// [`ExecutionError::Link`] for the first link that cannot be created.
pub fn link<I>(
    records: I,
    home: &Path,
    strategy: &dyn LinkStrategy,
    log: &Logger,
) -> Result<Summary, DotlinkError>
where
    I: IntoIterator<Item = Result<LinkRecord, DotlinkError>>,
{
    let mut summary = Summary::new(Mode::Link);
    for record in records {
        let record = record?;
        let resource = SymlinkResource::in_home(home, &record.source, &record.link);
        log.info(&resource.description());

        let change = resource
            .apply(strategy)
            .map_err(|e| ExecutionError::Link {
                line: record.line,
                link: resource.link.clone(),
                target: resource.target.clone(),
                source: e.into(),
            })?;
        if change == ResourceChange::AlreadyCorrect {
            log.debug(&format!("already linked: {}", resource.link.display()));
        }
        summary.record(change);
    }
    Ok(summary)
}

/// Remove whatever exists at `home/link` for every record.
///
/// Real directories are removed recursively; symlinks are removed as entries
/// and their targets are left untouched. Missing paths are skipped.
///
/// # Errors
///
/// Returns the first record error from the iterator, or
/// [`ExecutionError::Unlink`] for the first entry that cannot be removed.
pub fn unlink<I>(records: I, home: &Path, log: &Logger) -> Result<Summary, DotlinkError>
where
    I: IntoIterator<Item = Result<LinkRecord, DotlinkError>>,
{
    let mut summary = Summary::new(Mode::Unlink);
    for record in records {
        let record = record?;
        let resource = SymlinkResource::in_home(home, &record.source, &record.link);

        let change = resource.remove().map_err(|e| ExecutionError::Unlink {
            line: record.line,
            path: resource.link.clone(),
            source: e.into(),
        })?;
        match change {
            ResourceChange::Removed => log.info(&format!("removed {}", record.link)),
            _ => log.debug(&format!("nothing at {}", resource.link.display())),
        }
        summary.record(change);
    }
    Ok(summary)
}
