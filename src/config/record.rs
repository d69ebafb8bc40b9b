//! Mapping file records.
use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, ValidationError};

/// What a record's source is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A regular file.
    File,
    /// A directory, linked as a whole.
    Directory,
}

impl Kind {
    /// Classify a kind field by its first character.
    ///
    /// `f`, `file`, `d`, `dir` are the documented spellings; any word starting
    /// with `f` or `d` is accepted the same way.
    #[must_use]
    pub fn from_prefix(field: &str) -> Option<Self> {
        if field.starts_with('d') {
            Some(Self::Directory)
        } else if field.starts_with('f') {
            Some(Self::File)
        } else {
            None
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

/// One line split into its three fields, taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number.
    pub line: usize,
    /// Kind field.
    pub kind: String,
    /// Source path relative to home.
    pub source: String,
    /// Link path relative to home.
    pub link: String,
}

impl RawRecord {
    /// Split `text` on `delimiter` into exactly three fields.
    ///
    /// Whitespace is preserved and empty fields are allowed here; emptiness
    /// is rejected by [`RawRecord::into_record`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the line has fewer or more than
    /// three fields.
    pub fn parse(line: usize, text: &str, delimiter: char) -> Result<Self, ConfigError> {
        let fields: Vec<&str> = text.split(delimiter).collect();
        match fields.as_slice() {
            [kind, source, link] => Ok(Self {
                line,
                kind: (*kind).to_string(),
                source: (*source).to_string(),
                link: (*link).to_string(),
            }),
            _ => Err(ConfigError::Parse {
                line,
                fields: fields.len(),
                delimiter,
            }),
        }
    }

    /// Check the record's shape and classify its kind.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for the first empty field,
    /// [`ValidationError::UnrecognizedKind`] when the kind matches neither
    /// prefix, [`ValidationError::UnsafePath`] for a path that is not a plain
    /// relative path, and [`ValidationError::LinkContainsSource`] when the
    /// link is the source or one of its ancestors.
    pub fn into_record(self) -> Result<LinkRecord, ValidationError> {
        for (field, value) in [
            ("kind", &self.kind),
            ("source", &self.source),
            ("link", &self.link),
        ] {
            if value.is_empty() {
                return Err(ValidationError::EmptyField {
                    line: self.line,
                    field,
                });
            }
        }

        let kind = Kind::from_prefix(&self.kind).ok_or_else(|| ValidationError::UnrecognizedKind {
            line: self.line,
            kind: self.kind.clone(),
        })?;

        for (field, value) in [("source", &self.source), ("link", &self.link)] {
            if !is_plain_relative(value) {
                return Err(ValidationError::UnsafePath {
                    line: self.line,
                    field,
                    path: value.clone(),
                });
            }
        }
        if Path::new(&self.source).starts_with(&self.link) {
            return Err(ValidationError::LinkContainsSource {
                line: self.line,
                link: self.link,
                target: self.source,
            });
        }

        Ok(LinkRecord {
            line: self.line,
            kind,
            source: self.source,
            link: self.link,
        })
    }
}

/// Whether `path` names an entry strictly below home.
///
/// Every `/`-separated segment must be a real name: no leading `/`, no
/// empty segment (so no trailing `/`), no `.` or `..`.
fn is_plain_relative(path: &str) -> bool {
    !path.starts_with('/')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// A well-formed mapping record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// 1-based line number.
    pub line: usize,
    /// Expected kind of the source.
    pub kind: Kind,
    /// Source path relative to home.
    pub source: String,
    /// Link path relative to home.
    pub link: String,
}
