use serde::{Deserialize, Serialize};

use super::main_book::MainRecord;
use crate::account_actor::AccountError;

/// Shipping address saved by a buyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    /// Short name such as "Rumah" or "Kantor".
    pub label: String,
    pub recipient: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub is_main: bool,
}

impl Address {
    /// Single-line form used in order summaries and chat messages.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {} ({} - {})",
            self.street, self.city, self.province, self.postal_code, self.recipient, self.phone
        )
    }
}

impl MainRecord for Address {
    const ID_PREFIX: &'static str = "addr";

    fn record_id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn is_main(&self) -> bool {
        self.is_main
    }

    fn set_main(&mut self, main: bool) {
        self.is_main = main;
    }

    fn validate(&self) -> Result<(), AccountError> {
        require("label", &self.label)?;
        require("recipient", &self.recipient)?;
        require("phone", &self.phone)?;
        require("street", &self.street)?;
        require("city", &self.city)?;
        require("province", &self.province)?;
        require("postal_code", &self.postal_code)?;

        let phone_digits = phone_digits(&self.phone)
            .ok_or_else(|| AccountError::InvalidField { field: "phone", reason: "must contain only digits".into() })?;
        if !(8..=15).contains(&phone_digits.len()) {
            return Err(AccountError::InvalidField { field: "phone", reason: "must have 8 to 15 digits".into() });
        }

        let postal = self.postal_code.trim();
        if postal.len() != 5 || !postal.chars().all(|c| c.is_ascii_digit()) {
            return Err(AccountError::InvalidField { field: "postal_code", reason: "must be 5 digits".into() });
        }
        Ok(())
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), AccountError> {
    if value.trim().is_empty() {
        Err(AccountError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Digits of a phone number written with `+`, spaces or dashes; `None` if anything else appears.
fn phone_digits(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();
    cleaned.chars().all(|c| c.is_ascii_digit()).then_some(cleaned)
}
