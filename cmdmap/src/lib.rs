//! Command registry and dispatch engine.
//!
//! Commands are registered under a label plus any number of aliases, then
//! invoked by typing a line such as `/give item 3` at the console or from an
//! interactive [`actor::Actor`]. The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (line parsing, authorization
//!   policy, descriptors). No I/O, no shared state.
//! - **[`io`]**: Side-effecting pieces (console read loop, config files).
//!
//! [`registry`] owns the shared label index, [`dispatch`] turns a line into a
//! handler call, and [`discovery`] registers the static [`commands`] catalog at
//! startup.

pub mod actor;
pub mod commands;
pub mod core;
pub mod discovery;
pub mod dispatch;
pub mod exit_codes;
pub mod handbook;
pub mod handler;
pub mod io;
pub mod logging;
pub mod registry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
