//! Command-line interface.
use clap::{ArgGroup, CommandFactory as _, Parser};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::error::ArgumentError;

/// Flags that request the usage text.
const HELP_FLAGS: [&str; 2] = ["-h", "--help"];

/// Top-level CLI definition.
///
/// Exactly one mode flag with its mapping file is accepted; the argument
/// count itself is checked by [`parse`] before clap sees the input.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Create or remove dotfile symlinks from a mapping file",
    after_help = "Each line of the mapping file is <kind>,<source>,<link>; kind is f[ile] or \
                  d[ir], source and link are relative to the home directory.",
    disable_version_flag = true
)]
#[command(group(ArgGroup::new("mode").required(true).args(["link", "unlink"])))]
pub struct Cli {
    /// Validate the mapping file, then create every link it declares
    #[arg(short, long, value_name = "FILE")]
    pub link: Option<PathBuf>,

    /// Validate the mapping file, then remove every link it declares
    #[arg(short, long, value_name = "FILE")]
    pub unlink: Option<PathBuf>,
}

/// What the run does to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create links.
    Link,
    /// Remove links.
    Unlink,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link => write!(f, "link"),
            Self::Unlink => write!(f, "unlink"),
        }
    }
}

/// A successfully interpreted command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print the usage text.
    Help(String),
    /// Run `mode` over the mapping file at `file`.
    Run {
        /// Requested mode.
        mode: Mode,
        /// Mapping file path as given.
        file: PathBuf,
    },
}

/// Render the usage text.
#[must_use]
pub fn help() -> String {
    Cli::command().render_help().to_string()
}

/// Interpret the process arguments (including the program name).
///
/// Accepts exactly one argument (`-h`/`--help`) or exactly two (a mode flag
/// and its file).
///
/// # Errors
///
/// Returns [`ArgumentError::Count`] for any other count and
/// [`ArgumentError::Usage`] for unknown flags or malformed pairs.
pub fn parse<I, T>(args: I) -> Result<Invocation, ArgumentError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let user_args = args.get(1..).unwrap_or_default();
    let is_help = |arg: &OsString| HELP_FLAGS.iter().any(|flag| arg == flag);

    match user_args {
        [only] if is_help(only) => return Ok(Invocation::Help(help())),
        [first, _] if !is_help(first) => {}
        _ => {
            return Err(ArgumentError::Count {
                found: user_args.len(),
            });
        }
    }

    let cli = Cli::try_parse_from(&args)
        .map_err(|e| ArgumentError::Usage(e.render().to_string().trim_end().to_string()))?;

    match (cli.link, cli.unlink) {
        (Some(file), None) => Ok(Invocation::Run {
            mode: Mode::Link,
            file,
        }),
        (None, Some(file)) => Ok(Invocation::Run {
            mode: Mode::Unlink,
            file,
        }),
        _ => Err(ArgumentError::Usage(
            "exactly one of --link or --unlink is required".to_string(),
        )),
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Result<Invocation, ArgumentError> {
        parse(std::iter::once("dotlink").chain(args.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_link_long_and_short() {
        for flag in ["--link", "-l"] {
            assert_eq!(
                run(&[flag, "links.conf"]).unwrap(),
                Invocation::Run {
                    mode: Mode::Link,
                    file: PathBuf::from("links.conf"),
                }
            );
        }
    }

    #[test]
    fn parse_unlink_long_and_short() {
        for flag in ["--unlink", "-u"] {
            assert_eq!(
                run(&[flag, "dotfiles/links.conf"]).unwrap(),
                Invocation::Run {
                    mode: Mode::Unlink,
                    file: PathBuf::from("dotfiles/links.conf"),
                }
            );
        }
    }

    #[test]
    fn parse_help_long_and_short() {
        for flag in ["--help", "-h"] {
            let Invocation::Help(text) = run(&[flag]).unwrap() else {
                panic!("expected help for {flag}");
            };
            assert!(text.contains("--link <FILE>"));
            assert!(text.contains("--unlink <FILE>"));
        }
    }

    #[test]
    fn no_arguments_is_a_count_error() {
        assert!(matches!(run(&[]), Err(ArgumentError::Count { found: 0 })));
    }

    #[test]
    fn three_arguments_is_a_count_error() {
        assert!(matches!(
            run(&["-l", "links.conf", "extra"]),
            Err(ArgumentError::Count { found: 3 })
        ));
    }

    #[test]
    fn help_with_operand_is_rejected() {
        assert!(matches!(
            run(&["--help", "links.conf"]),
            Err(ArgumentError::Count { found: 2 })
        ));
    }

    #[test]
    fn single_mode_flag_with_inline_value_is_rejected() {
        assert!(matches!(
            run(&["--link=links.conf"]),
            Err(ArgumentError::Count { found: 1 })
        ));
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        assert!(matches!(
            run(&["--relink", "links.conf"]),
            Err(ArgumentError::Usage(_))
        ));
    }

    #[test]
    fn mode_without_file_is_a_usage_error() {
        assert!(matches!(
            run(&["--link", "--unlink"]),
            Err(ArgumentError::Usage(_))
        ));
    }

    #[test]
    fn version_flag_is_not_accepted() {
        assert!(matches!(run(&["--version"]), Err(ArgumentError::Count { found: 1 })));
        assert!(matches!(
            run(&["-V", "links.conf"]),
            Err(ArgumentError::Usage(_))
        ));
    }

    #[test]
    fn mode_display() {
        assert_eq!(Mode::Link.to_string(), "link");
        assert_eq!(Mode::Unlink.to_string(), "unlink");
    }
}
