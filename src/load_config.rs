use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{error, info};

use crate::config::{ClientConfig, Credentials};

pub const USERNAME_VAR: &str = "FCREPO_USERNAME";
pub const PASSWORD_VAR: &str = "FCREPO_PASSWORD";

/// Loads a static YAML config file (no secrets) and injects credentials from the environment.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    let mut config: ClientConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if let Some(base_url) = &config.base_url {
        if let Err(e) = url::Url::parse(base_url) {
            error!(error = ?e, base_url = %base_url, "base_url is not a valid URL");
            anyhow::bail!("base_url {base_url:?} is not a valid URL: {e}");
        }
    }

    config.credentials = credentials_from_env()?;
    config.trace_loaded();
    Ok(config)
}

/// Credentials are optional, but a username without a password (or the reverse) is a mistake.
pub fn credentials_from_env() -> Result<Option<Credentials>> {
    match (std::env::var(USERNAME_VAR), std::env::var(PASSWORD_VAR)) {
        (Ok(username), Ok(password)) => {
            info!(username = %username, "Repository credentials found in env");
            Ok(Some(Credentials { username, password }))
        }
        (Err(_), Err(_)) => {
            info!("No repository credentials in env, requests will be anonymous");
            Ok(None)
        }
        (Ok(_), Err(e)) => {
            error!(error = ?e, "{PASSWORD_VAR} missing while {USERNAME_VAR} is set");
            anyhow::bail!("{PASSWORD_VAR} environment variable not set: {e}")
        }
        (Err(e), Ok(_)) => {
            error!(error = ?e, "{USERNAME_VAR} missing while {PASSWORD_VAR} is set");
            anyhow::bail!("{USERNAME_VAR} environment variable not set: {e}")
        }
    }
}
