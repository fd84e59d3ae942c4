//! vcs::probe
//!
//! Query one repository's status and normalize it.
//!
//! # Algorithm
//!
//! 1. Classify the path by its marker file
//! 2. Unknown paths fail immediately; no process is started
//! 3. Run the backend's status command in the repository
//! 4. Non-zero exit (or, for Git, no output at all) is an error
//! 5. Otherwise the backend's [`StatusMatcher`] decides clean or dirty
//!
//! Fossil output that is non-empty but carries no known marker is reported
//! as dirty: something changed, even if the matcher cannot say what.
//!
//! # Invariants
//!
//! - [`StatusProbe::probe`] always returns a result; failures become
//!   [`RepoState::Error`](crate::core::types::RepoState::Error)
//! - Raw dirty output is kept only for detailed probes

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::detect::classify;
use super::matcher::{FossilMatcher, GitMatcher, StatusMatcher, Verdict};
use super::runner::{CommandRunner, Invocation, ProcessOutput, ProcessRunner};
use crate::core::config::Config;
use crate::core::types::{RepoKind, StatusResult};

/// Why a probe could not determine a status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// Neither a Git nor a Fossil marker was found.
    #[error("not a recognized repository")]
    UnrecognizedRepository,

    /// The status command failed to start or reported an error.
    #[error("{program}: {message}")]
    ProcessExecutionFailure { program: String, message: String },

    /// The status command did not finish in time.
    #[error("{program}: timed out after {after:?}")]
    TimedOut { program: String, after: Duration },
}

/// How to query one kind of repository.
#[derive(Debug, Clone)]
pub struct Backend {
    /// Executable name or path.
    pub program: String,
    /// Arguments after the program.
    pub args: Vec<String>,
    /// Extra environment for the child.
    pub env: Vec<(String, String)>,
    /// Whether empty stdout means the command failed.
    pub requires_output: bool,
    /// Output classifier.
    pub matcher: Arc<dyn StatusMatcher>,
}

impl Backend {
    /// `git status`, forced to the C locale so the clean phrase is stable.
    ///
    /// `GIT_OPTIONAL_LOCKS=0` keeps the probe from refreshing the index
    /// under a concurrently running git.
    pub fn git(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["status".into()],
            env: vec![
                ("LC_ALL".into(), "C".into()),
                ("GIT_OPTIONAL_LOCKS".into(), "0".into()),
            ],
            requires_output: true,
            matcher: Arc::new(GitMatcher::default()),
        }
    }

    /// `fossil changes`.
    pub fn fossil(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["changes".into()],
            env: Vec::new(),
            requires_output: false,
            matcher: Arc::new(FossilMatcher::default()),
        }
    }

    /// Replace the output classifier.
    pub fn with_matcher(mut self, matcher: Arc<dyn StatusMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    fn invocation(&self, cwd: &Path) -> Invocation {
        let mut inv = Invocation::new(self.program.clone(), cwd);
        for arg in &self.args {
            inv = inv.arg(arg);
        }
        for (key, value) in &self.env {
            inv = inv.env(key, value);
        }
        inv
    }
}

/// Probes repositories using a [`CommandRunner`].
#[derive(Debug)]
pub struct StatusProbe<R: CommandRunner = ProcessRunner> {
    runner: R,
    git: Backend,
    fossil: Backend,
    timeout: Option<Duration>,
}

impl StatusProbe<ProcessRunner> {
    /// Probe with real processes, binaries and timeout taken from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(ProcessRunner)
            .with_git(Backend::git(config.git_binary()))
            .with_fossil(Backend::fossil(config.fossil_binary()))
            .with_timeout(config.probe_timeout())
    }
}

impl<R: CommandRunner> StatusProbe<R> {
    /// Create a probe with the default `git` and `fossil` backends and no
    /// timeout.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            git: Backend::git("git"),
            fossil: Backend::fossil("fossil"),
            timeout: None,
        }
    }

    pub fn with_git(mut self, backend: Backend) -> Self {
        self.git = backend;
        self
    }

    pub fn with_fossil(mut self, backend: Backend) -> Self {
        self.fossil = backend;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Probe the repository at `path`.
    ///
    /// Never fails: errors are folded into an error-state result whose
    /// detail is the reason.
    pub async fn probe(&self, path: &str, detailed: bool) -> StatusResult {
        let kind = classify(Path::new(path));
        match self.try_probe(path, kind, detailed).await {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(path, %kind, error = %e, "probe failed");
                StatusResult::error(path, kind, e.to_string())
            }
        }
    }

    async fn try_probe(
        &self,
        path: &str,
        kind: RepoKind,
        detailed: bool,
    ) -> Result<StatusResult, ProbeError> {
        let backend = match kind {
            RepoKind::Git => &self.git,
            RepoKind::Fossil => &self.fossil,
            RepoKind::Unknown => return Err(ProbeError::UnrecognizedRepository),
        };

        let output = self.execute(backend, Path::new(path)).await?;

        if !output.success() || (backend.requires_output && output.stdout.trim().is_empty()) {
            return Err(ProbeError::ProcessExecutionFailure {
                program: backend.program.clone(),
                message: failure_message(&output),
            });
        }

        let result = match backend.matcher.classify(&output.stdout) {
            Verdict::Clean => StatusResult::clean(path, kind),
            Verdict::Dirty => StatusResult::dirty(path, kind, detailed.then_some(output.stdout)),
            Verdict::Unrecognized => {
                tracing::debug!(path, %kind, "output has no known marker, treating as dirty");
                StatusResult::dirty(path, kind, detailed.then_some(output.stdout))
            }
        };
        Ok(result)
    }

    async fn execute(&self, backend: &Backend, cwd: &Path) -> Result<ProcessOutput, ProbeError> {
        let invocation = backend.invocation(cwd);
        tracing::trace!(command = %invocation.display(), cwd = %cwd.display(), "running");

        let run = self.runner.run(&invocation);
        let result = match self.timeout {
            Some(after) => tokio::time::timeout(after, run)
                .await
                .map_err(|_| ProbeError::TimedOut {
                    program: backend.program.clone(),
                    after,
                })?,
            None => run.await,
        };

        result.map_err(|e| ProbeError::ProcessExecutionFailure {
            program: backend.program.clone(),
            message: format!("failed to run: {}", e),
        })
    }
}

/// Best available description of why a process failed.
fn failure_message(output: &ProcessOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = output.stdout.trim();
    if !stdout.is_empty() && !output.success() {
        return stdout.to_string();
    }
    match output.code {
        Some(0) => "produced no output".to_string(),
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RepoState;
    use crate::vcs::mock::{MockResponse, MockRunner};
    use std::fs;
    use tempfile::TempDir;

    fn git_repo(temp: &TempDir, name: &str) -> String {
        let dir = temp.path().join(name);
        fs::create_dir_all(dir.join(".git")).unwrap();
        dir.to_string_lossy().into_owned()
    }

    fn fossil_repo(temp: &TempDir, name: &str) -> String {
        let dir = temp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(".fslckout"), b"").unwrap();
        dir.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn unknown_repo_skips_process() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let probe = StatusProbe::new(runner.clone());

        let result = probe
            .probe(&temp.path().to_string_lossy(), true)
            .await;

        assert_eq!(result.state, RepoState::Error);
        assert_eq!(result.kind, RepoKind::Unknown);
        assert_eq!(result.detail.as_deref(), Some("not a recognized repository"));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn git_clean() {
        let temp = TempDir::new().unwrap();
        let repo = git_repo(&temp, "a");
        let runner = MockRunner::new();
        runner.respond(
            &repo,
            MockResponse::output(ProcessOutput::ok(
                "On branch main\nnothing to commit, working tree clean\n",
            )),
        );

        let result = StatusProbe::new(runner.clone()).probe(&repo, true).await;

        assert_eq!(result.state, RepoState::Clean);
        assert_eq!(result.kind, RepoKind::Git);
        assert!(result.detail.is_none());

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "git");
        assert_eq!(calls[0].args, vec!["status"]);
        assert!(calls[0].env.contains(&("LC_ALL".into(), "C".into())));
    }

    #[tokio::test]
    async fn git_dirty_keeps_output_only_when_detailed() {
        let temp = TempDir::new().unwrap();
        let repo = git_repo(&temp, "a");
        let out = "On branch main\nUntracked files:\n\tnew.txt\n";
        let runner = MockRunner::new();
        runner.respond(&repo, MockResponse::output(ProcessOutput::ok(out)));
        let probe = StatusProbe::new(runner);

        let detailed = probe.probe(&repo, true).await;
        assert_eq!(detailed.state, RepoState::Dirty);
        assert_eq!(detailed.detail.as_deref(), Some(out));

        let brief = probe.probe(&repo, false).await;
        assert_eq!(brief.state, RepoState::Dirty);
        assert!(brief.detail.is_none());
    }

    #[tokio::test]
    async fn git_nonzero_exit_is_error_with_stderr() {
        let temp = TempDir::new().unwrap();
        let repo = git_repo(&temp, "a");
        let runner = MockRunner::new();
        runner.respond(
            &repo,
            MockResponse::output(ProcessOutput::failed(
                128,
                "fatal: not a git repository\n",
            )),
        );

        let result = StatusProbe::new(runner).probe(&repo, false).await;

        assert_eq!(result.state, RepoState::Error);
        assert_eq!(
            result.detail.as_deref(),
            Some("git: fatal: not a git repository")
        );
    }

    #[tokio::test]
    async fn git_empty_output_is_error() {
        let temp = TempDir::new().unwrap();
        let repo = git_repo(&temp, "a");
        let runner = MockRunner::new();
        runner.respond(&repo, MockResponse::output(ProcessOutput::ok("")));

        let result = StatusProbe::new(runner).probe(&repo, false).await;

        assert_eq!(result.state, RepoState::Error);
        assert_eq!(result.detail.as_deref(), Some("git: produced no output"));
    }

    #[tokio::test]
    async fn launch_failure_is_error() {
        let temp = TempDir::new().unwrap();
        let repo = git_repo(&temp, "a");
        let runner = MockRunner::new();
        runner.respond(&repo, MockResponse::launch_error("No such file or directory"));

        let result = StatusProbe::new(runner).probe(&repo, false).await;

        assert_eq!(result.state, RepoState::Error);
        let detail = result.detail.unwrap();
        assert!(detail.contains("failed to run"));
        assert!(detail.contains("No such file or directory"));
    }

    #[tokio::test]
    async fn missing_binary_with_real_runner_is_error() {
        let temp = TempDir::new().unwrap();
        let repo = git_repo(&temp, "a");
        let probe = StatusProbe::new(ProcessRunner)
            .with_git(Backend::git("statrepos-no-such-git-binary"));

        let result = probe.probe(&repo, false).await;

        assert_eq!(result.state, RepoState::Error);
        assert_eq!(result.kind, RepoKind::Git);
    }

    #[tokio::test]
    async fn fossil_empty_is_clean() {
        let temp = TempDir::new().unwrap();
        let repo = fossil_repo(&temp, "f");
        let runner = MockRunner::new();
        runner.respond(&repo, MockResponse::output(ProcessOutput::ok("")));

        let result = StatusProbe::new(runner.clone()).probe(&repo, true).await;

        assert_eq!(result.state, RepoState::Clean);
        assert_eq!(result.kind, RepoKind::Fossil);
        assert_eq!(runner.calls()[0].program, "fossil");
        assert_eq!(runner.calls()[0].args, vec!["changes"]);
    }

    #[tokio::test]
    async fn fossil_edited_is_dirty() {
        let temp = TempDir::new().unwrap();
        let repo = fossil_repo(&temp, "f");
        let runner = MockRunner::new();
        runner.respond(&repo, MockResponse::output(ProcessOutput::ok("EDITED file.txt")));

        let result = StatusProbe::new(runner).probe(&repo, true).await;

        assert_eq!(result.state, RepoState::Dirty);
        assert!(result.detail.unwrap().contains("EDITED"));
    }

    #[tokio::test]
    async fn fossil_unmarked_output_is_dirty() {
        let temp = TempDir::new().unwrap();
        let repo = fossil_repo(&temp, "f");
        let runner = MockRunner::new();
        runner.respond(&repo, MockResponse::output(ProcessOutput::ok("ADDED new.txt\n")));

        let result = StatusProbe::new(runner).probe(&repo, false).await;

        assert_eq!(result.state, RepoState::Dirty);
    }

    #[tokio::test]
    async fn fossil_failure_is_error() {
        let temp = TempDir::new().unwrap();
        let repo = fossil_repo(&temp, "f");
        let runner = MockRunner::new();
        runner.respond(
            &repo,
            MockResponse::output(ProcessOutput::failed(1, "current directory is not within an open checkout")),
        );

        let result = StatusProbe::new(runner).probe(&repo, false).await;

        assert_eq!(result.state, RepoState::Error);
        assert!(result.detail.unwrap().contains("not within an open checkout"));
    }

    #[tokio::test]
    async fn timeout_is_error() {
        let temp = TempDir::new().unwrap();
        let repo = git_repo(&temp, "slow");
        let runner = MockRunner::new();
        runner.respond(
            &repo,
            MockResponse::output(ProcessOutput::ok("nothing to commit, working tree clean"))
                .after(Duration::from_secs(5)),
        );
        let probe = StatusProbe::new(runner).with_timeout(Some(Duration::from_millis(20)));

        let result = probe.probe(&repo, false).await;

        assert_eq!(result.state, RepoState::Error);
        assert!(result.detail.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn custom_matcher_is_used() {
        let temp = TempDir::new().unwrap();
        let repo = git_repo(&temp, "a");
        let runner = MockRunner::new();
        runner.respond(&repo, MockResponse::output(ProcessOutput::ok("propre\n")));
        let probe = StatusProbe::new(runner)
            .with_git(Backend::git("git").with_matcher(Arc::new(GitMatcher::new(["propre"]))));

        assert_eq!(probe.probe(&repo, false).await.state, RepoState::Clean);
    }

    #[test]
    fn failure_message_fallbacks() {
        assert_eq!(
            failure_message(&ProcessOutput::failed(2, "  bad thing \n")),
            "bad thing"
        );
        assert_eq!(
            failure_message(&ProcessOutput {
                code: Some(1),
                stdout: "usage: ...".into(),
                stderr: String::new(),
            }),
            "usage: ..."
        );
        assert_eq!(
            failure_message(&ProcessOutput::failed(7, "")),
            "exited with status 7"
        );
        assert_eq!(
            failure_message(&ProcessOutput::default()),
            "terminated by signal"
        );
    }
}
