use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::errors::{Result, RunparcelError, first_line};
use crate::core::traits::commit_source::CommitSource;

/// Default upper bound on a single `git` invocation.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Reads the checked-out commit with `git rev-parse HEAD`.
pub struct GitCommitSource {
    repo_dir: PathBuf,
    timeout: Duration,
}

impl GitCommitSource {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CommitSource for GitCommitSource {
    fn head_commit(&self) -> Result<String> {
        let vcs_err = |reason: String| RunparcelError::Vcs { reason };

        debug!(dir = %self.repo_dir.display(), "running git rev-parse HEAD");
        let mut child = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(&self.repo_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| vcs_err(format!("failed to execute git command: {e}")))?;

        // rev-parse prints one line, so the pipes cannot fill up while we poll.
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(vcs_err(format!(
                        "git rev-parse HEAD did not finish within {}s",
                        self.timeout.as_secs_f32()
                    )));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(vcs_err(format!("failed to wait for git: {e}"))),
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| vcs_err(format!("failed to read git output: {e}")))?;

        if !output.status.success() {
            return Err(vcs_err(format!(
                "git command failed with: {} (stderr: {})",
                output.status,
                first_line(&String::from_utf8_lossy(&output.stderr))
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
