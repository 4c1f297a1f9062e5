pub mod address;
pub mod bank_account;
pub mod cart;
pub mod main_book;
pub mod money;
pub mod notification;
pub mod order;
pub mod product;

pub use address::*;
pub use bank_account::*;
pub use cart::*;
pub use main_book::*;
pub use money::*;
pub use notification::*;
pub use order::*;
pub use product::*;
