//! Domain-specific error types for the link engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Every layer returns a typed error; [`DotlinkError`] aggregates them so the
//! binary has a single place that turns a failure into a message and an exit
//! code.
//!
//! # Error hierarchy
//!
//! ```text
//! DotlinkError
//! ├── Argument(ArgumentError)       : command-line misuse
//! ├── Environment(EnvironmentError) : home, working directory, root guard
//! ├── Platform(PlatformError)       : unsupported host, missing tools
//! ├── Config(ConfigError)           : mapping file I/O and line shape
//! ├── Validation(ValidationError)   : empty fields, kinds, missing paths
//! └── Execution(ExecutionError)     : link/unlink failures
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause carried by [`ExecutionError`] variants.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error type for a `dotlink` run.
#[derive(Error, Debug)]
pub enum DotlinkError {
    /// The command line could not be interpreted.
    #[error("Invalid arguments: {0}")]
    Argument(#[from] ArgumentError),

    /// The process environment does not allow the run.
    #[error("Environment error: {0}")]
    Environment(#[from] EnvironmentError),

    /// The host platform cannot create links.
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// The mapping file or settings could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A mapping record failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Creating or removing a link failed.
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

impl DotlinkError {
    /// Process exit code for this error.
    ///
    /// Every error is terminal for the run and maps to `1`; successful runs
    /// and `--help` exit with `0`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Argument(_)
            | Self::Environment(_)
            | Self::Platform(_)
            | Self::Config(_)
            | Self::Validation(_)
            | Self::Execution(_) => 1,
        }
    }
}

/// Errors that arise from command-line misuse.
#[derive(Error, Debug)]
pub enum ArgumentError {
    /// Wrong number of arguments.
    #[error("expected `--help` or a mode flag followed by a file, got {found} argument(s)")]
    Count {
        /// Number of arguments given (excluding the program name).
        found: usize,
    },

    /// Argument parsing rejected the command line.
    #[error("{0}")]
    Usage(String),

    /// The mapping file argument does not carry the expected file name.
    #[error("mapping file must be named '{expected}', got '{found}'")]
    FileName {
        /// Configured mapping file name.
        expected: String,
        /// File name that was passed.
        found: String,
    },
}

/// Errors that arise while resolving the run environment.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    /// The user's home directory could not be determined.
    #[error("cannot determine the home directory")]
    HomeNotFound,

    /// The current working directory could not be read.
    #[error("cannot read the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// The tool was started outside of its root directory.
    #[error("must be run from within {} (current directory: {})", .root.display(), .cwd.display())]
    OutsideRoot {
        /// Configured root directory.
        root: PathBuf,
        /// Directory the tool was started from.
        cwd: PathBuf,
    },
}

/// Errors that arise from platform detection.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The host operating system has no link strategy.
    #[error("unsupported platform '{platform}': only linux and macos are supported")]
    Unsupported {
        /// Operating system identifier reported by the host.
        platform: String,
    },

    /// A program required by the link strategy is not on `PATH`.
    #[error("required program '{0}' not found on PATH")]
    MissingTool(String),
}

/// Errors that arise from reading the mapping file or the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A line does not split into exactly three fields.
    #[error("line {line}: expected 3 fields separated by '{delimiter}', found {fields}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Number of fields found on the line.
        fields: usize,
        /// Delimiter the line was split on.
        delimiter: char,
    },

    /// An I/O error occurred while reading a file.
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid.
    #[error("invalid settings in {}: {message}", .path.display())]
    Settings {
        /// Path to the settings file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Errors that arise from validating a mapping record.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A record has an empty field.
    #[error("line {line}: field '{field}' is empty")]
    EmptyField {
        /// 1-based line number.
        line: usize,
        /// Name of the empty field (`kind`, `source` or `link`).
        field: &'static str,
    },

    /// The kind field starts with neither `f` nor `d`.
    #[error("line {line}: unrecognized kind '{kind}' (expected f[ile] or d[ir])")]
    UnrecognizedKind {
        /// 1-based line number.
        line: usize,
        /// The kind field as written.
        kind: String,
    },

    /// A path field is absolute or steps outside its parent (`.`, `..`,
    /// empty segments).
    #[error("line {line}: field '{field}' must be a plain path relative to home, got '{path}'")]
    UnsafePath {
        /// 1-based line number.
        line: usize,
        /// Name of the offending field (`source` or `link`).
        field: &'static str,
        /// The field as written.
        path: String,
    },

    /// The link path is the source itself or one of its ancestors, so
    /// replacing or removing it would destroy the source.
    #[error("line {line}: link '{link}' contains its own source '{target}'")]
    LinkContainsSource {
        /// 1-based line number.
        line: usize,
        /// Link field as written.
        link: String,
        /// Source field as written.
        target: String,
    },

    /// A file source is absent or not a regular file.
    #[error("line {line}: file not found: {}", .path.display())]
    MissingFile {
        /// 1-based line number.
        line: usize,
        /// Resolved path that was checked.
        path: PathBuf,
    },

    /// A directory source or a link parent is absent or not a directory.
    #[error("line {line}: directory not found: {}", .path.display())]
    MissingDirectory {
        /// 1-based line number.
        line: usize,
        /// Resolved path that was checked.
        path: PathBuf,
    },
}

/// Errors that arise while mutating the filesystem.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// A link could not be created.
    #[error("line {line}: cannot link {} -> {}", .link.display(), .target.display())]
    Link {
        /// 1-based line number.
        line: usize,
        /// Path where the link was to be created.
        link: PathBuf,
        /// Path the link was to point at.
        target: PathBuf,
        /// Underlying failure.
        source: BoxedCause,
    },

    /// An existing entry could not be removed.
    #[error("line {line}: cannot remove {}", .path.display())]
    Unlink {
        /// 1-based line number.
        line: usize,
        /// Path that could not be removed.
        path: PathBuf,
        /// Underlying failure.
        source: BoxedCause,
    },
}
