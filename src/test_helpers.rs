//! Shared fixtures for unit tests.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::ffi::OsStr;
use std::sync::{Arc, Mutex};

use crate::exec::{ExecResult, Executor, SystemExecutor};
use crate::platform::{LinkStrategy, Platform};

/// A recording mock executor.
///
/// Every [`Executor::run`] call is stored as a single space-joined command
/// line. [`failing`](Self::failing) makes every call return an error.
#[derive(Debug)]
pub struct MockExecutor {
    calls: Mutex<Vec<String>>,
    which_result: bool,
    fail: bool,
}

impl MockExecutor {
    /// Create a mock whose runs succeed and whose `which` returns `which`.
    #[must_use]
    pub const fn new(which: bool) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            which_result: which,
            fail: false,
        }
    }

    /// Create a mock that finds every program but fails every run.
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            which_result: true,
            fail: true,
        }
    }

    /// Command lines recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Executor for MockExecutor {
    fn run(&self, program: &str, args: &[&OsStr]) -> anyhow::Result<ExecResult> {
        let line = std::iter::once(program.to_string())
            .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line);
        }
        if self.fail {
            anyhow::bail!("mock command failed");
        }
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }

    fn which(&self, _: &str) -> bool {
        self.which_result
    }
}

/// The real link strategy for the host running the tests.
pub fn host_strategy() -> Box<dyn LinkStrategy> {
    Platform::detect()
        .unwrap()
        .link_strategy(Arc::new(SystemExecutor))
        .unwrap()
}
