//! `dotlink` binary entry point.
use std::error::Error as _;
use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;

use dotlink::cli::{self, Invocation};
use dotlink::commands::{self, Environment};
use dotlink::error::DotlinkError;
use dotlink::exec::SystemExecutor;
use dotlink::logging::{Logger, init_subscriber};

const COMMAND: &str = "dotlink";

fn main() -> ExitCode {
    let invocation = cli::parse(std::env::args_os());

    if let Ok(Invocation::Help(text)) = &invocation {
        return match writeln!(std::io::stdout(), "{}", text.trim_end()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    init_subscriber(COMMAND);
    let log = Logger::new(COMMAND);

    let result = invocation
        .map_err(DotlinkError::from)
        .and_then(|invocation| match invocation {
            Invocation::Help(_) => Ok(None),
            Invocation::Run { mode, file } => {
                let env = Environment::from_process()?;
                commands::run(mode, &file, &env, Arc::new(SystemExecutor), &log).map(Some)
            }
        });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&describe(&e));
            log.debug(&format!("log file: {}", log.log_path().display()));
            ExitCode::from(e.exit_code())
        }
    }
}

/// Render `err` followed by every cause not already part of its message.
fn describe(err: &DotlinkError) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    message
}
