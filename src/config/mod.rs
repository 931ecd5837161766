//! Configuration module
//!
//! Settings loaded from the TOML config file.

pub mod config;

pub use config::Config;
