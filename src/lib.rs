//! Dotfiles symlink manager.
//!
//! Reads a mapping file of `<kind>,<source>,<link>` records, validates every
//! record against the home directory, and then creates or removes the
//! declared symlinks in file order.
//!
//! The public API is organised into layers:
//!
//! - **[`cli`]**: argument parsing into an [`cli::Invocation`]
//! - **[`config`]**: settings, mapping file reading and record validation
//! - **[`resources`]**: idempotent filesystem primitives
//! - **[`engine`]**: link and unlink passes over validated records
//! - **[`commands`]**: environment resolution, guards and pass orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;

#[cfg(test)]
pub(crate) mod test_helpers;
