//! Pocketlink - a local-first URL shortener
//!
//! Shortens absolute URLs into short alphanumeric codes with an expiry,
//! tracks clicks, and keeps everything in a single key-value slot on the
//! local machine.
//!
//! # Architecture
//! - `storage`: Key-value slot backends and the record store
//! - `services`: Shortening service, validation, and session workflows
//! - `state`: Presentation-side view of the record list
//! - `log_sink`: Event log with console and remote sinks
//! - `interfaces`: Command-line front end
//! - `config`: Configuration management
//! - `system`: Logging setup

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod log_sink;
pub mod services;
pub mod state;
pub mod storage;
pub mod system;
pub mod utils;
