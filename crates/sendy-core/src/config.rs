//! Configuration types for sendy.
//!
//! [`Config::load`] reads `~/.config/sendy/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit file on top of the same defaults. [`Config::defaults`] returns the
//! defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[login]
require_agreement = true

[gateway]
latency_ms              = 300
sms_code                = "123456"
max_attempts            = 3
bank_selection_required = false
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/sendy/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// `[login]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    /// Refuse to submit the phone number until the terms are accepted.
    #[serde(default = "default_require_agreement")]
    pub require_agreement: bool,
}

fn default_require_agreement() -> bool { true }

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            require_agreement: default_require_agreement(),
        }
    }
}

/// `[gateway]` section of `config.toml`. Drives the simulated gateway used
/// by the shell.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// The code the simulated backend "sends" by SMS.
    #[serde(default = "default_sms_code")]
    pub sms_code: String,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Answer successful confirmations with a bank-selection request.
    #[serde(default = "default_bank_selection_required")]
    pub bank_selection_required: bool,
}

fn default_latency_ms() -> u64 { 300 }
fn default_sms_code() -> String { "123456".to_string() }
fn default_max_attempts() -> u32 { 3 }
fn default_bank_selection_required() -> bool { false }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            sms_code: default_sms_code(),
            max_attempts: default_max_attempts(),
            bank_selection_required: default_bank_selection_required(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/sendy/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit file layered on top of the built-in defaults. The
    /// file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    fn validate(&self) -> anyhow::Result<()> {
        if crate::sms::validate_code(&self.gateway.sms_code).is_err() {
            anyhow::bail!(
                "gateway.sms_code must be 6 digits, got {:?}",
                self.gateway.sms_code
            );
        }
        if self.gateway.max_attempts == 0 {
            anyhow::bail!("gateway.max_attempts must be at least 1");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("sendy")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
