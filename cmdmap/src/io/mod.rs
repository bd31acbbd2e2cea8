//! I/O helpers for the console binary.

pub mod config;
pub mod console;
