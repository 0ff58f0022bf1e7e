//! User settings: named server credentials, stored outside the project.
//!
//! Pure types only; loading lives in `crate::infra::settings`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::scm::Credentials;

/// Top-level settings stored in `~/.commons-release/settings.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseSettings {
    /// Named servers usable as a credential source.
    pub servers: Vec<ServerCredentials>,
}

impl ReleaseSettings {
    /// Looks up a server entry by id.
    #[must_use]
    pub fn server(&self, id: &str) -> Option<&ServerCredentials> {
        self.servers.iter().find(|s| s.id == id)
    }
}

/// One `servers` entry.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerCredentials {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ServerCredentials {
    #[must_use]
    pub fn to_credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for ServerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerCredentials")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
