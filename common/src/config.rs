// common/src/config.rs
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use config::{Config as ConfigFile, File, Environment};

use crate::models::token::Credentials;

/// Central configuration for the ticket server
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_addr: String,

    // Upstream WeCom API configuration
    pub wecom: WecomConfig,

    // Static file serving configuration
    pub static_files: StaticFilesConfig,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WecomConfig {
    pub api_base: String,
    pub corp_id: String,
    pub corp_secret: String,
    pub request_timeout_secs: u64,
    /// Abort startup when the access token cannot be obtained
    pub fail_fast_bootstrap: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub path: String,
    pub index: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:8080".to_string(),
            wecom: WecomConfig::default(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl Default for WecomConfig {
    fn default() -> Self {
        Self {
            api_base: "https://qyapi.weixin.qq.com/".to_string(),
            corp_id: String::new(),
            corp_secret: String::new(),
            request_timeout_secs: 10,
            fail_fast_bootstrap: false,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            path: "./build".to_string(),
            index: "index.html".to_string(),
        }
    }
}

impl std::fmt::Debug for WecomConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WecomConfig")
            .field("api_base", &self.api_base)
            .field("corp_id", &self.corp_id)
            .field("corp_secret", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("fail_fast_bootstrap", &self.fail_fast_bootstrap)
            .finish()
    }
}

impl WecomConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.corp_id.clone(), self.corp_secret.clone())
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        // Get the run mode, defaulting to "development"
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        // Locate the config directory
        let config_dir = env::var("CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Check if we're in the project root or a subcrate
                let mut path = PathBuf::from("./config");
                if !path.exists() {
                    path = PathBuf::from("../config");
                }
                path
            });

        tracing::info!("Loading configuration from {}", config_dir.display());
        tracing::info!("Using run mode: {}", run_mode);

        ConfigFile::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", run_mode))).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // e.g. APP__WECOM__CORP_SECRET
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Load configuration, falling back to plain environment variables
    pub fn from_env() -> Self {
        match Self::load() {
            Ok(config) => {
                tracing::info!("Configuration loaded from files and environment");
                config
            },
            Err(e) => {
                tracing::warn!("Failed to load configuration from files: {}", e);
                tracing::info!("Falling back to environment variables only");
                Self::from_plain_env()
            }
        }
    }

    fn from_plain_env() -> Self {
        let defaults = Self::default();

        let server_addr = env::var("SERVER_ADDR")
            .unwrap_or(defaults.server_addr);

        let api_base = env::var("WECOM_API_BASE")
            .unwrap_or(defaults.wecom.api_base);

        let corp_id = env::var("WECOM_CORP_ID").unwrap_or_default();
        let corp_secret = env::var("WECOM_CORP_SECRET").unwrap_or_default();

        let request_timeout_secs = env::var("WECOM_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.wecom.request_timeout_secs);

        let fail_fast_bootstrap = env::var("WECOM_FAIL_FAST_BOOTSTRAP")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(defaults.wecom.fail_fast_bootstrap);

        let static_files_path = env::var("STATIC_FILES_PATH")
            .unwrap_or(defaults.static_files.path);

        let static_files_index = env::var("STATIC_FILES_INDEX")
            .unwrap_or(defaults.static_files.index);

        Self {
            server_addr,
            wecom: WecomConfig {
                api_base,
                corp_id,
                corp_secret,
                request_timeout_secs,
                fail_fast_bootstrap,
            },
            static_files: StaticFilesConfig {
                path: static_files_path,
                index: static_files_index,
            },
        }
    }
}
