//! # pigeon-core
//!
//! Bot API wire types, request methods, the `BotApi` trait, configuration,
//! and error handling shared by the Pigeon crates.

pub mod config;
pub mod error;
pub mod method;
pub mod traits;
pub mod types;
