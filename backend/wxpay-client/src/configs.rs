use std::path::PathBuf;

use common_utils::{CustomResult, ValidationError};
use domain_types::types::{MerchantIdentity, DEFAULT_GATEWAY_BASE_URL};
use hyperswitch_masking::Secret;

use crate::{consts, logger::config::Log};

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub common: Common,
    #[serde(default)]
    pub log: Log,
    pub merchant: Merchant,
    #[serde(default)]
    pub gateway: Gateway,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Common {
    pub environment: String,
}

impl Common {
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        match self.environment.as_str() {
            "development" | "production" => Ok(()),
            _ => Err(config::ConfigError::Message(format!(
                "Invalid environment '{}'. Must be 'development' or 'production'",
                self.environment
            ))),
        }
    }
}

/// Merchant credentials. Both the gateway's own field names and the camel cased spellings are
/// accepted.
#[derive(Clone, serde::Deserialize, Debug)]
pub struct Merchant {
    #[serde(alias = "appId", alias = "appid")]
    pub app_id: String,
    #[serde(alias = "merchantId", alias = "merchantid", alias = "mch_id")]
    pub merchant_id: String,
    #[serde(
        default,
        alias = "merchantKey",
        alias = "merchantkey",
        alias = "mch_key",
        alias = "key"
    )]
    pub merchant_key: Secret<String>,
}

impl Merchant {
    pub fn identity(&self) -> CustomResult<MerchantIdentity, ValidationError> {
        MerchantIdentity::new(
            self.app_id.clone(),
            self.merchant_id.clone(),
            self.merchant_key.clone(),
        )
    }
}

#[derive(Clone, serde::Deserialize, Debug)]
#[serde(default)]
pub struct Gateway {
    pub base_url: String,
    pub timeout_secs: u64,
    /// PEM file holding the merchant client certificate and private key, needed for refunds.
    pub client_identity_pem: Option<PathBuf>,
}

impl Default for Gateway {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_BASE_URL.to_string(),
            timeout_secs: 30,
            client_identity_pem: None,
        }
    }
}

impl Config {
    /// Function to build the configuration by picking it from default locations
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    /// Function to build the configuration from an explicit file, falling back to the
    /// per-environment file under `config/`
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let env = consts::Env::current_env();
        let config_path = Self::config_path(&env, explicit_config_path);

        let config = Self::builder(&env)?
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(consts::ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        #[allow(clippy::print_stderr)]
        let config: Self = serde_path_to_error::deserialize(config).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })?;

        config.common.validate()?;

        Ok(config)
    }

    pub fn builder(
        environment: &consts::Env,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            // "env" is an override, not a default: no config field may alter it.
            .set_override("env", environment.to_string())
    }

    /// Config path.
    pub fn config_path(
        environment: &consts::Env,
        explicit_config_path: Option<PathBuf>,
    ) -> PathBuf {
        let mut config_path = PathBuf::new();
        if let Some(explicit_config_path_val) = explicit_config_path {
            config_path.push(explicit_config_path_val);
        } else {
            config_path.push(workspace_path());
            config_path.push(consts::CONFIG_DIRECTORY);
            config_path.push(environment.config_path());
        }
        config_path
    }
}

pub fn workspace_path() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let mut path = PathBuf::from(manifest_dir);
        path.pop();
        path.pop();
        path
    } else {
        PathBuf::from(".")
    }
}
