use serde::{Deserialize, Serialize};

use super::address::require;
use super::main_book::MainRecord;
use crate::account_actor::AccountError;

/// Payout account registered by a seller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: String,
    pub bank_name: String,
    pub account_number: String,
    pub holder_name: String,
    pub is_main: bool,
}

impl BankAccount {
    /// Account number with all but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let visible = self.account_number.len().saturating_sub(4);
        self.account_number
            .chars()
            .enumerate()
            .map(|(i, c)| if i < visible { '*' } else { c })
            .collect()
    }
}

impl MainRecord for BankAccount {
    const ID_PREFIX: &'static str = "bank";

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
        require("bank_name", &self.bank_name)?;
        require("account_number", &self.account_number)?;
        require("holder_name", &self.holder_name)?;

        let number = self.account_number.trim();
        if !number.chars().all(|c| c.is_ascii_digit()) || !(6..=20).contains(&number.len()) {
            return Err(AccountError::InvalidField {
                field: "account_number",
                reason: "must be 6 to 20 digits".into(),
            });
        }
        Ok(())
    }
}
