pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod utils;

pub use error::{RecordError, Result};
