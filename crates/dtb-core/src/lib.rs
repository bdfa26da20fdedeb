//! Startup core for the Discord + Twitch bot.
//!
//! File and JSON access report classified outcomes instead of errors; the
//! config loader turns those into a validated, immutable [`config::Config`] or
//! a fatal [`Error`]. Platform clients live behind the [`ports::ChatBot`] trait
//! and are implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod file;
pub mod json;
pub mod launch;
pub mod logging;
pub mod outcome;
pub mod ports;
pub mod state;
pub mod utils;

pub use errors::{Error, Result};
