//! Deterministic, pure logic shared by the dispatcher.
//!
//! Core modules must be free of I/O side effects and shared state. They
//! operate on plain values and return deterministic outputs suitable for tests.

pub mod descriptor;
pub mod parse;
pub mod policy;
pub mod types;
