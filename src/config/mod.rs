//! Configuration and credential storage

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::auth::{TokenPair, TokenStore};

/// Application configuration. The token pair lives here, the CLI's
/// equivalent of the web client's two localStorage keys.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Short-lived bearer access token
    pub access_token: Option<String>,
    /// Longer-lived refresh token
    pub refresh_token: Option<String>,
    /// Backend base URL, overriding the default (YONNA_API_URL env var
    /// takes precedence over both)
    pub api_url: Option<String>,
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("co", "yonna", "yonna-cli")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir).context("Failed to create config directory")?;

        let path = Self::config_path()?;
        self.write_to(&path)
    }

    fn write_to(&self, path: &std::path::Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        // Set restrictive permissions on config file (contains tokens)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms).context("Failed to set config permissions")?;
        }

        Ok(())
    }
}

impl TokenStore for Config {
    fn access_token(&self) -> Option<String> {
        self.access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.refresh_token.clone()
    }

    fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    fn set_token_pair(&mut self, pair: TokenPair) {
        self.access_token = Some(pair.access);
        self.refresh_token = Some(pair.refresh);
    }

    fn clear_tokens(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
    }

    fn persist(&self) -> Result<()> {
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_preserves_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set_token_pair(TokenPair {
            access: "A1".into(),
            refresh: "R1".into(),
        });
        config.api_url = Some("http://backend.test".into());
        config.write_to(&path).unwrap();

        let loaded: Config = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.access_token.as_deref(), Some("A1"));
        assert_eq!(loaded.refresh_token.as_deref(), Some("R1"));
        assert_eq!(loaded.api_url.as_deref(), Some("http://backend.test"));
    }

    #[cfg(unix)]
    #[test]
    fn config_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().write_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
