//! Configuration loading.
//!
//! Both utilities take one [`ApnsConfig`], resolved once at startup and
//! passed explicitly to the token minter and the push sender. Resolution
//! order, later wins:
//!
//! 1. Built-in defaults (production host, port 443)
//! 2. JSON config file (explicit path, `APNS_CONFIG`, or the platform
//!    config dir: `<config_dir>/apns-live/config.json`)
//! 3. `APNS_*` environment variables
//! 4. Command-line flags (applied by the binaries)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;
use crate::error::ConfigError;

/// Provider configuration for APNs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ApnsConfig {
    /// APNs host name.
    pub host: String,
    /// APNs port.
    pub port: u16,
    /// App bundle identifier; the `apns-topic` is derived from it.
    pub bundle_id: String,
    /// Path to the `.p8` signing key.
    pub key_path: PathBuf,
    /// Key identifier placed in the token header (`kid`).
    pub key_id: String,
    /// Developer team identifier placed in the claims (`iss`).
    pub team_id: String,
    /// Request timeout in seconds. `0` disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ApnsConfig {
    fn default() -> Self {
        Self {
            host: constants::APNS_PRODUCTION_HOST.to_string(),
            port: constants::APNS_DEFAULT_PORT,
            bundle_id: String::new(),
            key_path: PathBuf::from("AuthKey.p8"),
            key_id: String::new(),
            team_id: String::new(),
            timeout_secs: constants::HTTP_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl ApnsConfig {
    /// Default config file location under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("apns-live").join("config.json"))
    }

    /// Loads configuration from file, with environment variable overrides.
    ///
    /// An explicitly named file (argument or `APNS_CONFIG`) must exist; the
    /// default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os("APNS_CONFIG").map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load_from_file(&path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads one JSON config file. Missing fields take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APNS_HOST") {
            self.host = host;
        }

        if let Ok(port) = std::env::var("APNS_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(_) => log::warn!("[Config] Ignoring APNS_PORT={port}: not a port number"),
            }
        }

        if let Ok(bundle_id) = std::env::var("APNS_BUNDLE_ID") {
            self.bundle_id = bundle_id;
        }

        if let Ok(key_path) = std::env::var("APNS_KEY_PATH") {
            self.key_path = PathBuf::from(key_path);
        }

        if let Ok(key_id) = std::env::var("APNS_KEY_ID") {
            self.key_id = key_id;
        }

        if let Ok(team_id) = std::env::var("APNS_TEAM_ID") {
            self.team_id = team_id;
        }

        if let Ok(timeout) = std::env::var("APNS_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => log::warn!("[Config] Ignoring APNS_TIMEOUT_SECS={timeout}: not a number"),
            }
        }
    }

    /// Points the config at the development (sandbox) host.
    pub fn sandbox(mut self) -> Self {
        self.host = constants::APNS_SANDBOX_HOST.to_string();
        self
    }

    /// Request timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// `apns-topic` header value for Live Activity pushes.
    pub fn live_activity_topic(&self) -> String {
        format!("{}{}", self.bundle_id, constants::LIVE_ACTIVITY_TOPIC_SUFFIX)
    }

    /// Checks the fields the token minter needs.
    pub fn validate_signing(&self) -> Result<(), ConfigError> {
        if self.key_id.trim().is_empty() {
            return Err(ConfigError::Invalid("key_id is empty".to_string()));
        }
        if self.team_id.trim().is_empty() {
            return Err(ConfigError::Invalid("team_id is empty".to_string()));
        }
        Ok(())
    }

    /// Checks the fields the push sender needs.
    pub fn validate_delivery(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host is empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".to_string()));
        }
        if self.bundle_id.trim().is_empty() {
            return Err(ConfigError::Invalid("bundle_id is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ApnsConfig {
        ApnsConfig {
            bundle_id: "com.example.app".to_string(),
            key_id: "ABC123DEFG".to_string(),
            team_id: "TEAM123456".to_string(),
            ..ApnsConfig::default()
        }
    }

    #[test]
    fn test_defaults_target_production() {
        let config = ApnsConfig::default();
        assert_eq!(config.host, "api.push.apple.com");
        assert_eq!(config.port, 443);
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_sandbox_switches_host_only() {
        let config = complete().sandbox();
        assert_eq!(config.host, "api.sandbox.push.apple.com");
        assert_eq!(config.port, 443);
        assert_eq!(config.bundle_id, "com.example.app");
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = ApnsConfig {
            timeout_secs: 0,
            ..complete()
        };
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_live_activity_topic() {
        assert_eq!(
            complete().live_activity_topic(),
            "com.example.app.push-type.liveactivity"
        );
    }

    #[test]
    fn test_validate_signing_requires_ids() {
        assert!(complete().validate_signing().is_ok());

        let missing_kid = ApnsConfig {
            key_id: String::new(),
            ..complete()
        };
        assert!(matches!(
            missing_kid.validate_signing(),
            Err(ConfigError::Invalid(_))
        ));

        let missing_team = ApnsConfig {
            team_id: "  ".to_string(),
            ..complete()
        };
        assert!(missing_team.validate_signing().is_err());
    }

    #[test]
    fn test_validate_delivery_requires_bundle_and_port() {
        assert!(complete().validate_delivery().is_ok());
        assert!(ApnsConfig::default().validate_delivery().is_err());

        let zero_port = ApnsConfig {
            port: 0,
            ..complete()
        };
        assert!(zero_port.validate_delivery().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ApnsConfig =
            serde_json::from_str(r#"{"bundle_id": "com.leo.hsannu", "port": 2197}"#).unwrap();
        assert_eq!(config.bundle_id, "com.leo.hsannu");
        assert_eq!(config.port, 2197);
        assert_eq!(config.host, "api.push.apple.com");
    }
}
