//! vcs::mock
//!
//! Scripted command runner for deterministic testing.
//!
//! # Design
//!
//! Responses are keyed by the invocation's working directory, i.e. the
//! repository path. Each response may be delayed so tests can force probes
//! to complete out of registration order. Every invocation is recorded.
//!
//! # Example
//!
//! ```
//! use statrepos::vcs::mock::{MockResponse, MockRunner};
//! use statrepos::vcs::{CommandRunner, Invocation, ProcessOutput};
//!
//! # tokio_test_block_on(async {
//! let runner = MockRunner::new();
//! runner.respond("/repo", MockResponse::output(ProcessOutput::ok("EDITED a.txt")));
//!
//! let out = runner.run(&Invocation::new("fossil", "/repo")).await.unwrap();
//! assert_eq!(out.stdout, "EDITED a.txt");
//! assert_eq!(runner.call_count(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use super::runner::{CommandRunner, Invocation, ProcessOutput};

/// What the mock does when invoked.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// The process ran and produced this output.
    Output(ProcessOutput),
    /// The process could not be started.
    LaunchError(String),
    /// The runner panics, simulating a crashed probe task.
    Panic(String),
}

/// A scripted response with an optional delay.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub outcome: MockOutcome,
    pub delay: Duration,
}

impl MockResponse {
    pub fn output(output: ProcessOutput) -> Self {
        Self {
            outcome: MockOutcome::Output(output),
            delay: Duration::ZERO,
        }
    }

    pub fn launch_error(message: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::LaunchError(message.into()),
            delay: Duration::ZERO,
        }
    }

    pub fn panic(message: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Panic(message.into()),
            delay: Duration::ZERO,
        }
    }

    /// Delay the response by `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Mock runner for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

#[derive(Debug, Default)]
struct MockRunnerInner {
    responses: HashMap<PathBuf, MockResponse>,
    calls: Vec<Invocation>,
    completed: Vec<PathBuf>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockRunnerInner> {
        // A panicking scripted response poisons nothing we care about.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Script the response for invocations in `cwd`.
    pub fn respond(&self, cwd: impl Into<PathBuf>, response: MockResponse) {
        self.lock().responses.insert(cwd.into(), response);
    }

    /// All invocations received, in arrival order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Working directories of finished invocations, in completion order.
    pub fn completion_order(&self) -> Vec<PathBuf> {
        self.lock().completed.clone()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let response = {
            let mut inner = self.lock();
            inner.calls.push(invocation.clone());
            inner.responses.get(&invocation.cwd).cloned()
        };

        let Some(response) = response else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no scripted response for {}", invocation.cwd.display()),
            ));
        };

        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }

        self.lock().completed.push(invocation.cwd.clone());

        match response.outcome {
            MockOutcome::Output(output) => Ok(output),
            MockOutcome::LaunchError(message) => {
                Err(io::Error::new(io::ErrorKind::NotFound, message))
            }
            MockOutcome::Panic(message) => panic!("{}", message),
        }
    }
}
