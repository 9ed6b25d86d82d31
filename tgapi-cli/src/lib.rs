//! # tgapi-cli
//!
//! Command-line front end for [`tgapi_client::Telegram`]: argument parsing, config loading
//! and one subcommand per supported read/write call. Results are printed as pretty JSON.

pub mod cli;

pub use cli::{load_config, parse_chat_id, run, Cli, Commands, ParseModeArg};
pub use tgapi_client::TelegramConfig;
