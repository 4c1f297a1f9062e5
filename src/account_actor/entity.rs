use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{MainBook, MainRecord};
use super::actions::{BookAction, BookActionResult};
use super::error::AccountError;

impl<R: MainRecord> Entity for MainBook<R> {
    type Id = String;
    type CreatePayload = Infallible;
    type Patch = Infallible;
    type Action = BookAction<R>;
    type ActionResult = BookActionResult;
    type Error = AccountError;

    fn id(&self) -> &String { &self.owner }

    fn from_create(_id: String, payload: Infallible) -> Result<Self, AccountError> {
        match payload {}
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), AccountError> {
        match patch {}
    }

    fn handle_action(&mut self, action: BookAction<R>) -> Result<BookActionResult, AccountError> {
        match action {
            BookAction::Add { record, make_main } => self.add(record, make_main).map(BookActionResult::Added),
            BookAction::Update { id, record } => {
                self.update(&id, record)?;
                Ok(BookActionResult::Updated(id))
            }
            BookAction::SetMain(id) => {
                self.set_main(&id)?;
                Ok(BookActionResult::MainChanged(id))
            }
            BookAction::Remove(id) => {
                let new_main = self.remove(&id)?;
                Ok(BookActionResult::Removed { new_main })
            }
        }
    }
}
