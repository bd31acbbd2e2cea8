//! The executable side of a command.
//!
//! The dispatcher decides which calling convention applies and hands the
//! handler an [`Invocation`] that already carries it. Handlers that only make
//! sense for one kind of caller match on the variant they accept and reply
//! with an error message for the other.

use anyhow::Result;

use crate::actor::Actor;
use crate::core::types::CallerKind;
use crate::io::console::Console;

/// One call into a handler, tagged by caller.
#[derive(Clone, Copy)]
pub enum Invocation<'a> {
    Console {
        console: &'a dyn Console,
        args: &'a [String],
    },
    Actor {
        actor: &'a dyn Actor,
        args: &'a [String],
    },
}

impl<'a> Invocation<'a> {
    pub fn args(&self) -> &'a [String] {
        match *self {
            Invocation::Console { args, .. } | Invocation::Actor { args, .. } => args,
        }
    }

    pub fn caller_kind(&self) -> CallerKind {
        match self {
            Invocation::Console { .. } => CallerKind::Console,
            Invocation::Actor { .. } => CallerKind::Actor,
        }
    }

    pub fn actor(&self) -> Option<&'a dyn Actor> {
        match *self {
            Invocation::Actor { actor, .. } => Some(actor),
            Invocation::Console { .. } => None,
        }
    }

    /// Send `message` back to whoever invoked the command.
    pub fn reply(&self, message: &str) {
        match self {
            Invocation::Console { console, .. } => console.send_message(message),
            Invocation::Actor { actor, .. } => actor.send_message(message),
        }
    }
}

/// Executable logic behind a registered command.
///
/// Errors returned from `execute` are not handled by the dispatcher; they
/// propagate to whoever called [`Dispatcher::invoke`](crate::dispatch::Dispatcher::invoke).
pub trait CommandHandler: Send + Sync {
    fn execute(&self, invocation: Invocation<'_>) -> Result<()>;
}
