//! Utility functions and helpers

pub mod fs_stats;
pub mod logging;
