//! Mapping file reading and run settings.
//!
//! The mapping file is read lazily: [`records`] opens the file and returns an
//! iterator that yields one [`RawRecord`] per line. Every pass calls
//! [`records`] again, so the file handle never outlives a pass.
pub mod record;
pub mod settings;
pub mod validation;

use std::fs::File;
use std::io::{BufRead as _, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, DotlinkError};

pub use record::{Kind, LinkRecord, RawRecord};
pub use settings::Settings;

/// Open `path` and stream its records in file order.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be opened.
pub fn records(path: &Path, settings: &Settings) -> Result<Records, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Records {
        path: path.to_path_buf(),
        delimiter: settings.delimiter,
        lines: BufReader::new(file).lines(),
        line: 0,
    })
}

/// Lazy, single-use iterator over the lines of a mapping file.
#[derive(Debug)]
pub struct Records {
    path: PathBuf,
    delimiter: char,
    lines: Lines<BufReader<File>>,
    line: usize,
}

impl Records {
    /// Convert every raw record into a [`LinkRecord`].
    ///
    /// Used by the mutation pass, which runs on already validated input.
    pub fn link_records(self) -> impl Iterator<Item = Result<LinkRecord, DotlinkError>> {
        self.map(|raw| -> Result<LinkRecord, DotlinkError> { Ok(raw?.into_record()?) })
    }
}

impl Iterator for Records {
    type Item = Result<RawRecord, ConfigError>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.lines.next()?;
        self.line += 1;
        Some(
            text.map_err(|source| ConfigError::Io {
                path: self.path.clone(),
                source,
            })
            .and_then(|text| RawRecord::parse(self.line, &text, self.delimiter)),
        )
    }
}
