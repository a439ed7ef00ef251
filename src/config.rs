use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::FcrepoClient;
use crate::error::Result;

/// Everything needed to construct an [`FcrepoClient`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Repository REST endpoint relative paths are resolved against.
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub throw_exception_on_failure: bool,
    /// Injected from the environment, never read from the config file.
    #[serde(skip)]
    pub credentials: Option<Credentials>,
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ClientConfig {
    pub fn trace_loaded(&self) {
        info!(
            base_url = self.base_url.as_deref().unwrap_or("<none>"),
            timeout_secs = ?self.timeout_secs,
            throw_exception_on_failure = self.throw_exception_on_failure,
            authenticated = self.credentials.is_some(),
            "Loaded ClientConfig"
        );
        debug!(?self, "ClientConfig loaded (full debug)");
    }

    pub fn build_client(&self) -> Result<FcrepoClient> {
        let mut builder = FcrepoClient::builder();
        if let Some(creds) = &self.credentials {
            builder = builder.credentials(&creds.username, &creds.password);
        }
        if self.throw_exception_on_failure {
            builder = builder.throw_exception_on_failure();
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}
