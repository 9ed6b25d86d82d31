//! # tgapi-client
//!
//! Thin async client for the Telegram Bot API: [`Telegram`] posts one JSON request per method
//! and decodes the `{ ok, result }` envelope into the types from `tgapi-types`.
//! Also provides the minimal [`TelegramConfig`] and tracing initialization.

mod client;
mod config;
mod error;
mod logger;

pub use client::{mask_token, Telegram, DEFAULT_API_URL};
pub use config::TelegramConfig;
pub use error::{Result, TelegramError};
pub use logger::init_tracing;
pub use tgapi_types as types;
