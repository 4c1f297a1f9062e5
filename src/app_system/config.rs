use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::otp::MAX_TTL;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read from the environment (and an optional `.env` file).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Mailbox size of every repository actor.
    pub channel_buffer: usize,
    /// File backing the local key/value store.
    pub store_path: PathBuf,
    /// Flat shipping fee added to every order, in rupiah.
    pub shipping_fee: u64,
    /// Seller number buyers are sent to on WhatsApp.
    pub seller_whatsapp: String,
    pub otp_ttl: Duration,
    pub otp_max_attempts: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            store_path: PathBuf::from("luno_store.json"),
            shipping_fee: 15_000,
            seller_whatsapp: "081234567890".to_string(),
            otp_ttl: Duration::from_secs(120),
            otp_max_attempts: 3,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|var| std::env::var(var).ok())?;
        tracing::info!(store_path = %config.store_path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Builds the config from any variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let channel_buffer = parse_or(&lookup, "LUNO_CHANNEL_BUFFER", defaults.channel_buffer)?;
        if channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "LUNO_CHANNEL_BUFFER",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let otp_ttl_secs = parse_or(&lookup, "LUNO_OTP_TTL_SECS", defaults.otp_ttl.as_secs())?;
        if otp_ttl_secs == 0 || otp_ttl_secs > MAX_TTL.as_secs() {
            return Err(ConfigError::Invalid {
                var: "LUNO_OTP_TTL_SECS",
                value: otp_ttl_secs.to_string(),
                reason: format!("must be between 1 and {}", MAX_TTL.as_secs()),
            });
        }
        let otp_max_attempts = parse_or(&lookup, "LUNO_OTP_MAX_ATTEMPTS", defaults.otp_max_attempts)?;
        if otp_max_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: "LUNO_OTP_MAX_ATTEMPTS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            channel_buffer,
            store_path: lookup("LUNO_STORE_PATH").map(PathBuf::from).unwrap_or(defaults.store_path),
            shipping_fee: parse_or(&lookup, "LUNO_SHIPPING_FEE", defaults.shipping_fee)?,
            seller_whatsapp: lookup("LUNO_SELLER_WHATSAPP").unwrap_or(defaults.seller_whatsapp),
            otp_ttl: Duration::from_secs(otp_ttl_secs),
            otp_max_attempts,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        }
    }
}
