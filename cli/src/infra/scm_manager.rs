//! Provider registry: implements the `ScmManager` port.

use anyhow::Result;

use crate::application::ports::{CommandRunner, ScmManager};
use crate::domain::error::ScmError;
use crate::domain::scm::{SVN_PROVIDER, ScmRepository};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::svn::SvnExeProvider;

/// Registry of the providers this build knows about. Only `svn` today.
pub struct DefaultScmManager<R: CommandRunner> {
    svn: SvnExeProvider<R>,
}

impl<R: CommandRunner> DefaultScmManager<R> {
    #[must_use]
    pub fn new(svn: SvnExeProvider<R>) -> Self {
        Self { svn }
    }
}

impl DefaultScmManager<TokioCommandRunner> {
    /// Production registry: `svn` from the environment with the default timeout.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(SvnExeProvider::from_env(TokioCommandRunner::default()))
    }
}

impl<R: CommandRunner> ScmManager for DefaultScmManager<R> {
    type Provider = SvnExeProvider<R>;

    fn provider_for(&self, repository: &ScmRepository) -> Result<&Self::Provider> {
        match repository.provider() {
            SVN_PROVIDER => Ok(&self.svn),
            other => Err(ScmError::UnsupportedProvider(other.to_string()).into()),
        }
    }
}
