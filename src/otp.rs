//! Simulated one-time codes for the seller verification flow.
//!
//! Nothing is sent anywhere; the issued challenge carries the code so the
//! caller can display it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

const CODE_DIGITS: usize = 6;

/// Longest time a code may stay valid.
pub const MAX_TTL: Duration = Duration::from_secs(86_400);

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OtpError {
    #[error("Verification code expired")]
    Expired,
    #[error("Too many wrong attempts")]
    TooManyAttempts,
    #[error("Wrong verification code, {attempts_left} attempts left")]
    Mismatch { attempts_left: u8 },
    #[error("Verification code already used")]
    AlreadyUsed,
    #[error("Invalid OTP settings: {0}")]
    InvalidSettings(String),
}

#[derive(Debug, Clone)]
pub struct OtpIssuer {
    ttl: chrono::Duration,
    max_attempts: u8,
}

impl OtpIssuer {
    /// The TTL must lie in `1s..=MAX_TTL` and at least one attempt must be allowed.
    pub fn new(ttl: Duration, max_attempts: u8) -> Result<Self, OtpError> {
        if ttl.is_zero() || ttl > MAX_TTL {
            return Err(OtpError::InvalidSettings(format!(
                "ttl of {}s is outside 1..={}s",
                ttl.as_secs(),
                MAX_TTL.as_secs()
            )));
        }
        if max_attempts == 0 {
            return Err(OtpError::InvalidSettings("max_attempts must be at least 1".to_string()));
        }
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| OtpError::InvalidSettings(e.to_string()))?;
        Ok(Self { ttl, max_attempts })
    }

    pub fn issue<R: Rng + ?Sized>(&self, phone: impl Into<String>, now: DateTime<Utc>, rng: &mut R) -> OtpChallenge {
        let code = format!("{:0width$}", rng.gen_range(0..1_000_000u32), width = CODE_DIGITS);
        OtpChallenge {
            phone: phone.into(),
            code,
            expires_at: now + self.ttl,
            attempts_left: self.max_attempts,
            used: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OtpChallenge {
    pub phone: String,
    code: String,
    pub expires_at: DateTime<Utc>,
    pub attempts_left: u8,
    used: bool,
}

impl OtpChallenge {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn verify(&mut self, code: &str, now: DateTime<Utc>) -> Result<(), OtpError> {
        if self.used {
            return Err(OtpError::AlreadyUsed);
        }
        if now >= self.expires_at {
            return Err(OtpError::Expired);
        }
        if self.attempts_left == 0 {
            return Err(OtpError::TooManyAttempts);
        }
        if code.trim() != self.code {
            self.attempts_left -= 1;
            return Err(OtpError::Mismatch { attempts_left: self.attempts_left });
        }
        self.used = true;
        Ok(())
    }
}
