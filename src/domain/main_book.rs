//! Per-owner record lists with a single "main" record.
//!
//! Addresses and bank accounts share the same rule: when an owner has any
//! records, exactly one of them is main.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::account_actor::AccountError;

/// A record that can be kept in a [`MainBook`].
pub trait MainRecord: Clone + Debug + Send + Sync + 'static {
    /// Prefix of the ids the book assigns, e.g. `addr`.
    const ID_PREFIX: &'static str;

    fn record_id(&self) -> &str;
    fn assign_id(&mut self, id: String);
    fn is_main(&self) -> bool;
    fn set_main(&mut self, main: bool);
    fn validate(&self) -> Result<(), AccountError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainBook<R> {
    pub owner: String,
    pub records: Vec<R>,
    next_seq: u64,
}

impl<R: MainRecord> MainBook<R> {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            records: Vec::new(),
            next_seq: 1,
        }
    }

    pub fn main(&self) -> Option<&R> {
        self.records.iter().find(|record| record.is_main())
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.record_id() == id)
    }

    /// Adds a record and returns its new id. The first record is always main.
    pub fn add(&mut self, mut record: R, make_main: bool) -> Result<String, AccountError> {
        record.validate()?;
        let id = format!("{}_{}", R::ID_PREFIX, self.next_seq);
        self.next_seq += 1;
        record.assign_id(id.clone());

        let make_main = make_main || self.records.is_empty();
        if make_main {
            self.clear_main();
        }
        record.set_main(make_main);
        self.records.push(record);
        Ok(id)
    }

    /// Replaces a record's fields, keeping its id and main flag.
    pub fn update(&mut self, id: &str, mut record: R) -> Result<(), AccountError> {
        record.validate()?;
        let index = self.position(id)?;
        let current = &mut self.records[index];
        record.assign_id(current.record_id().to_string());
        record.set_main(current.is_main());
        *current = record;
        Ok(())
    }

    pub fn set_main(&mut self, id: &str) -> Result<(), AccountError> {
        let index = self.position(id)?;
        self.clear_main();
        self.records[index].set_main(true);
        Ok(())
    }

    /// Removes a record. If it was main, the first remaining record takes over;
    /// its id is returned.
    pub fn remove(&mut self, id: &str) -> Result<Option<String>, AccountError> {
        let index = self.position(id)?;
        let removed = self.records.remove(index);
        if !removed.is_main() {
            return Ok(None);
        }
        Ok(self.records.first_mut().map(|first| {
            first.set_main(true);
            first.record_id().to_string()
        }))
    }

    fn clear_main(&mut self) {
        for record in &mut self.records {
            record.set_main(false);
        }
    }

    fn position(&self, id: &str) -> Result<usize, AccountError> {
        self.records
            .iter()
            .position(|record| record.record_id() == id)
            .ok_or_else(|| AccountError::RecordNotFound(id.to_string()))
    }
}
