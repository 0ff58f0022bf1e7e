//! `svn` executable provider: implements `ScmProvider` on top of `CommandRunner`.
//!
//! Every command runs with `--non-interactive --no-auth-cache`. Passwords go
//! to `svn` on stdin (`--password-from-stdin`) so they never show up in the
//! process table or in debug logs.

use std::path::Path;
use std::process::Output;

use anyhow::Result;

use crate::application::ports::{CommandRunner, ScmProvider};
use crate::domain::scm::{
    CheckinResult, ScmFileSet, ScmRepository, ScmResult, parse_committed_revision,
};

/// Default `svn` executable name.
pub const SVN_PROGRAM: &str = "svn";

/// Environment variable overriding the `svn` executable.
pub const SVN_PROGRAM_ENV: &str = "COMMONS_RELEASE_SVN";

/// Subversion provider backed by the `svn` command-line client.
pub struct SvnExeProvider<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> SvnExeProvider<R> {
    #[must_use]
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Provider using `$COMMONS_RELEASE_SVN` or `svn` from `PATH`.
    #[must_use]
    pub fn from_env(runner: R) -> Self {
        let program = std::env::var(SVN_PROGRAM_ENV).unwrap_or_else(|_| SVN_PROGRAM.to_string());
        Self::new(runner, program)
    }

    /// Runs `svn <global flags> <command args>`, authenticating when the
    /// repository carries credentials.
    async fn svn(
        &self,
        repository: &ScmRepository,
        command: &[&str],
        authenticate: bool,
    ) -> Result<Output> {
        let mut args: Vec<&str> = vec!["--non-interactive", "--no-auth-cache"];
        let creds = repository.credentials().filter(|_| authenticate);
        if let Some(c) = creds {
            args.extend(["--username", c.username.as_str()]);
            if c.password.is_some() {
                args.push("--password-from-stdin");
            }
        }
        args.extend_from_slice(command);

        match creds.and_then(|c| c.password.as_deref()) {
            Some(password) => {
                let mut input = password.as_bytes().to_vec();
                input.push(b'\n');
                self.runner
                    .run_with_stdin(&self.program, &args, &input)
                    .await
            }
            None => self.runner.run(&self.program, &args).await,
        }
    }
}

/// Converts process output into an [`ScmResult`]; stderr's first line is the
/// provider message.
fn to_result(output: &Output) -> ScmResult {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = [stdout.trim(), stderr.trim()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    if output.status.success() {
        return ScmResult::ok(combined);
    }
    let message = stderr
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map_or_else(
            || format!("svn exited with {}", output.status),
            str::to_string,
        );
    ScmResult::failed(message, combined)
}

fn path_args(files: &ScmFileSet) -> Vec<String> {
    if files.files.is_empty() {
        return vec![files.base_dir.display().to_string()];
    }
    files
        .files
        .iter()
        .map(|f| {
            if f.is_absolute() {
                f.display().to_string()
            } else {
                files.base_dir.join(f).display().to_string()
            }
        })
        .collect()
}

impl<R: CommandRunner> ScmProvider for SvnExeProvider<R> {
    async fn checkout(&self, repository: &ScmRepository, directory: &Path) -> Result<ScmResult> {
        let dir = directory.display().to_string();
        let output = self
            .svn(repository, &["checkout", repository.url(), &dir], true)
            .await?;
        Ok(to_result(&output))
    }

    async fn remove(
        &self,
        repository: &ScmRepository,
        files: &ScmFileSet,
        message: &str,
    ) -> Result<ScmResult> {
        // Working-copy removal is local; svn rejects a log message here.
        tracing::debug!(message, count = files.files.len(), "svn remove");
        let paths = path_args(files);
        let mut command: Vec<&str> = vec!["remove", "--force"];
        command.extend(paths.iter().map(String::as_str));
        let output = self.svn(repository, &command, false).await?;
        Ok(to_result(&output))
    }

    async fn checkin(
        &self,
        repository: &ScmRepository,
        files: &ScmFileSet,
        message: &str,
    ) -> Result<CheckinResult> {
        let paths = path_args(files);
        let mut command: Vec<&str> = vec!["commit", "-m", message];
        command.extend(paths.iter().map(String::as_str));
        let output = self.svn(repository, &command, true).await?;
        let result = to_result(&output);
        let revision = if result.success {
            parse_committed_revision(&result.command_output)
        } else {
            None
        };
        Ok(CheckinResult { result, revision })
    }
}
