//! Core domain + application logic for the wacheck WhatsApp utility bot.
//!
//! This crate is intentionally transport-agnostic. The WhatsApp gateway lives
//! behind ports (traits) implemented in the adapter crate.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod parse;
pub mod settings;
pub mod verify;

pub use errors::{Error, Result};
