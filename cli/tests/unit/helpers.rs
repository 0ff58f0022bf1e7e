//! Shared test helpers: recording SCM provider, reporters and in-memory stores.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use anyhow::Result;
use commons_release::application::ports::{
    ConfigStore, ProgressReporter, ScmManager, ScmProvider, SettingsStore,
};
use commons_release::domain::config::ReleaseConfig;
use commons_release::domain::error::ScmError;
use commons_release::domain::scm::{
    CheckinResult, Credentials, SVN_PROVIDER, ScmFileSet, ScmRepository, ScmResult,
};
use commons_release::domain::settings::{ReleaseSettings, ServerCredentials};

// ── Reporters ────────────────────────────────────────────────────────────────

/// Discards every message.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
    fn info(&self, _: &str) {}
}

/// Keeps every message with its level.
#[derive(Default)]
pub struct RecordingReporter {
    pub messages: RefCell<Vec<(&'static str, String)>>,
}

impl RecordingReporter {
    pub fn of_level(&self, level: &str) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, m: &str) {
        self.messages.borrow_mut().push(("step", m.to_string()));
    }
    fn success(&self, m: &str) {
        self.messages.borrow_mut().push(("success", m.to_string()));
    }
    fn warn(&self, m: &str) {
        self.messages.borrow_mut().push(("warn", m.to_string()));
    }
    fn info(&self, m: &str) {
        self.messages.borrow_mut().push(("info", m.to_string()));
    }
}

// ── Settings ─────────────────────────────────────────────────────────────────

/// In-memory settings.
#[derive(Default)]
pub struct MemorySettings(pub ReleaseSettings);

impl MemorySettings {
    pub fn with_server(id: &str, username: &str, password: Option<&str>) -> Self {
        Self(ReleaseSettings {
            servers: vec![ServerCredentials {
                id: id.to_string(),
                username: username.to_string(),
                password: password.map(str::to_string),
            }],
        })
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self) -> Result<ReleaseSettings> {
        Ok(self.0.clone())
    }
}

/// Settings store whose file cannot be parsed.
pub struct BrokenSettings;

impl SettingsStore for BrokenSettings {
    fn load(&self) -> Result<ReleaseSettings> {
        anyhow::bail!("settings.yaml: invalid type")
    }
}

// ── Config ───────────────────────────────────────────────────────────────────

/// In-memory config store that counts saves.
#[derive(Default)]
pub struct MemoryConfig {
    pub config: RefCell<ReleaseConfig>,
    pub saves: RefCell<usize>,
}

impl ConfigStore for MemoryConfig {
    fn load(&self) -> Result<ReleaseConfig> {
        Ok(self.config.borrow().clone())
    }
    fn save(&self, config: &ReleaseConfig) -> Result<()> {
        *self.config.borrow_mut() = config.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("commons-release.yaml"))
    }
}

// ── SCM ──────────────────────────────────────────────────────────────────────

/// One provider invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScmCall {
    Checkout {
        url: String,
        directory: PathBuf,
        credentials: Option<Credentials>,
    },
    Remove {
        files: Vec<PathBuf>,
        message: String,
    },
    Checkin {
        files: Vec<PathBuf>,
        message: String,
    },
}

/// Scripted SCM provider. A successful checkout materialises `remote_entries`
/// (plus `.svn`) in the target directory.
pub struct FakeScm {
    pub remote_entries: Vec<&'static str>,
    pub checkout: ScmResult,
    pub remove: ScmResult,
    pub checkin: CheckinResult,
    pub calls: RefCell<Vec<ScmCall>>,
}

impl FakeScm {
    /// Every step succeeds; the commit reports revision 4242.
    pub fn with_entries(remote_entries: Vec<&'static str>) -> Self {
        Self {
            remote_entries,
            checkout: ScmResult::ok("Checked out revision 4241."),
            remove: ScmResult::ok(""),
            checkin: CheckinResult {
                result: ScmResult::ok("Committed revision 4242."),
                revision: Some(4242),
            },
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ScmCall> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, kind: &str) -> bool {
        self.calls.borrow().iter().any(|c| {
            matches!(
                (kind, c),
                ("checkout", ScmCall::Checkout { .. })
                    | ("remove", ScmCall::Remove { .. })
                    | ("checkin", ScmCall::Checkin { .. })
            )
        })
    }
}

impl ScmProvider for FakeScm {
    async fn checkout(&self, repository: &ScmRepository, directory: &Path) -> Result<ScmResult> {
        self.calls.borrow_mut().push(ScmCall::Checkout {
            url: repository.url().to_string(),
            directory: directory.to_path_buf(),
            credentials: repository.credentials().cloned(),
        });
        if self.checkout.success {
            std::fs::create_dir_all(directory.join(".svn"))?;
            for entry in &self.remote_entries {
                std::fs::write(directory.join(entry), b"staged")?;
            }
        }
        Ok(self.checkout.clone())
    }

    async fn remove(
        &self,
        _: &ScmRepository,
        files: &ScmFileSet,
        message: &str,
    ) -> Result<ScmResult> {
        self.calls.borrow_mut().push(ScmCall::Remove {
            files: files.files.clone(),
            message: message.to_string(),
        });
        Ok(self.remove.clone())
    }

    async fn checkin(
        &self,
        _: &ScmRepository,
        files: &ScmFileSet,
        message: &str,
    ) -> Result<CheckinResult> {
        self.calls.borrow_mut().push(ScmCall::Checkin {
            files: files.files.clone(),
            message: message.to_string(),
        });
        Ok(self.checkin.clone())
    }
}

impl ScmManager for FakeScm {
    type Provider = Self;

    fn provider_for(&self, repository: &ScmRepository) -> Result<&Self> {
        if repository.provider() == SVN_PROVIDER {
            Ok(self)
        } else {
            Err(ScmError::UnsupportedProvider(repository.provider().to_string()).into())
        }
    }
}
