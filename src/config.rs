use std::time::Duration;

use crate::constant::API_BASE_URL;
use crate::error::{Error, Result};
use crate::Credentials;

pub const LISTEN_ENV: &str = "GOLF_BERT_LISTEN";
pub const BASE_URL_ENV: &str = "GOLF_BERT_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "GOLF_BERT_TIMEOUT_SECS";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen: String,
    pub base_url: String,
    /// Upstream request timeout. `None` waits for the transport to give up.
    pub timeout: Option<Duration>,
    pub log_level: String,
    pub credentials: Credentials,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8000".to_owned(),
            base_url: API_BASE_URL.to_owned(),
            timeout: None,
            log_level: "info".to_owned(),
            credentials: Credentials::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            credentials: Credentials::from_env(),
            ..Self::default()
        };

        if let Ok(v) = std::env::var(LISTEN_ENV) {
            config.listen = v;
        }
        if let Ok(v) = std::env::var(BASE_URL_ENV) {
            config.base_url = v.trim_end_matches('/').to_owned();
        }
        if let Ok(v) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = v
                .parse()
                .map_err(|_| Error::InvalidConfig(format!("{}={} is not a number", TIMEOUT_ENV, v)))?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Ok(v) = std::env::var(LOG_LEVEL_ENV) {
            config.log_level = v;
        }

        Ok(config)
    }
}
