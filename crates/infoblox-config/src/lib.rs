//! Shared configuration for applications built on `infoblox-api`.
//!
//! TOML profiles and credential resolution (env + plaintext), translated
//! into [`infoblox_api::ClientConfig`]. Interactive prompting is a
//! consumer concern — this crate fails fast when credentials are missing.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use infoblox_api::{ClientConfig, Credentials, TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named appliance profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Skip certificate verification. Defaults to `true`: grid masters
    /// almost always carry a self-signed certificate.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: default_insecure(),
            timeout: default_timeout(),
        }
    }
}

fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// A named appliance profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Appliance hostname or address (no scheme, no path).
    pub host: String,

    /// WAPI version path segment, e.g. "v2.6.1".
    #[serde(default = "default_version")]
    pub version: String,

    /// Username for Basic auth.
    pub username: Option<String>,

    /// Password in plaintext — prefer `password_env`.
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Credential-probe attempts before connect gives up (minimum 1).
    pub max_login_attempts: Option<u32>,
}

fn default_version() -> String {
    infoblox_api::DEFAULT_VERSION.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "infoblox-rs", "infoblox-rs").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("infoblox-rs");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("INFOBLOX_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve Basic-auth credentials for a profile.
///
/// Username: profile field, then `INFOBLOX_USERNAME`. Password: the
/// profile's `password_env` variable, then `INFOBLOX_PASSWORD`, then the
/// plaintext field. Anything missing fails fast — prompting for the gap
/// is the calling application's job.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("INFOBLOX_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(Credentials::new(username, SecretString::from(val)));
        }
    }

    // 2. Well-known env var
    if let Ok(pw) = std::env::var("INFOBLOX_PASSWORD") {
        return Ok(Credentials::new(username, SecretString::from(pw)));
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(Credentials::new(username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build a [`ClientConfig`] from a profile.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ClientConfig, ConfigError> {
    if profile.host.is_empty() || profile.host.contains('/') {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("expected a bare hostname, got '{}'", profile.host),
        });
    }

    let credentials = resolve_credentials(profile, profile_name)?;

    let tls = match (profile.insecure, &profile.ca_cert) {
        (Some(true), _) => TlsMode::DangerAcceptInvalid,
        (_, Some(ca_path)) => TlsMode::CustomCa(ca_path.clone()),
        (Some(false), None) => TlsMode::System,
        // grid masters typically self-signed
        (None, None) => TlsMode::DangerAcceptInvalid,
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout));

    let max_login_attempts = profile
        .max_login_attempts
        .and_then(NonZeroU32::new)
        .unwrap_or(NonZeroU32::MIN);

    Ok(ClientConfig {
        host: profile.host.clone(),
        version: profile.version.clone(),
        credentials,
        transport: TransportConfig { tls, timeout },
        max_login_attempts,
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::ExposeSecret;

    use super::*;

    fn profile(host: &str) -> Profile {
        Profile {
            host: host.into(),
            version: default_version(),
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            max_login_attempts: None,
        }
    }

    #[test]
    fn plaintext_password_resolves() {
        let creds = resolve_credentials(&profile("gridmaster.example.com"), "default").unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password.expose_secret(), "hunter2");
    }

    #[test]
    fn missing_credentials_fail_fast() {
        let mut p = profile("gridmaster.example.com");
        p.username = None;
        p.password = None;
        let err = resolve_credentials(&p, "lab").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { ref profile } if profile == "lab"));
    }

    #[test]
    fn host_with_path_is_rejected() {
        let p = profile("gridmaster.example.com/wapi");
        let err = profile_to_client_config(&p, "default").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn tls_defaults_to_accept_invalid() {
        let cfg = profile_to_client_config(&profile("gridmaster.example.com"), "default").unwrap();
        assert!(matches!(cfg.transport.tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn explicit_secure_tls_uses_system_store() {
        let mut p = profile("gridmaster.example.com");
        p.insecure = Some(false);
        let cfg = profile_to_client_config(&p, "default").unwrap();
        assert!(matches!(cfg.transport.tls, TlsMode::System));
    }

    #[test]
    fn toml_profile_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[profiles.lab]
host = "gridmaster.example.com"
version = "v1.7.1"
username = "api"
max_login_attempts = 3
"#,
        )
        .unwrap();

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&path));
        let config: Config = figment.extract().unwrap();

        assert_eq!(config.default_profile.as_deref(), Some("lab"));
        let lab = &config.profiles["lab"];
        assert_eq!(lab.version, "v1.7.1");
        assert_eq!(lab.max_login_attempts, Some(3));
        assert!(config.defaults.insecure);
    }
}
