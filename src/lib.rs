pub mod actor_framework;
pub mod domain;
pub mod clients;

pub mod app_system;

pub mod product_actor;
pub mod cart_actor;
pub mod order_actor;
pub mod account_actor;
pub mod notification_actor;

pub mod storage;
pub mod whatsapp;
pub mod otp;
pub mod promo;

#[cfg(test)]
mod mock_framework;
