//! Shared deterministic types for dispatch decisions.
//!
//! These types carry no handles to live state and can be compared in tests.

use thiserror::Error;

use crate::core::descriptor::ExecutionScope;

/// Which side of the calling convention a caller sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerKind {
    Console,
    Actor,
}

/// A dispatcher-internal refusal.
///
/// The `Display` text is the message sent back to whoever typed the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("No command specified.")]
    EmptyInput,
    #[error("Unknown command: {label}")]
    UnknownCommand { label: String },
    #[error("You do not have permission to run this command.")]
    PermissionDenied { label: String, node: String },
    #[error("{}", scope_message(.scope))]
    WrongExecutionScope { label: String, scope: ExecutionScope },
}

fn scope_message(scope: &ExecutionScope) -> &'static str {
    match scope {
        ExecutionScope::ActorOnly => "Run this command in-game.",
        ExecutionScope::ConsoleOnly => "This command can only be run from the console.",
        ExecutionScope::Any => "This command cannot be run here.",
    }
}

/// Result of a single dispatch that did not fail inside a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran to completion.
    Executed { label: String },
    /// The line was refused before any handler ran.
    Rejected(Rejection),
}

impl DispatchOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, DispatchOutcome::Executed { .. })
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            DispatchOutcome::Rejected(rejection) => Some(rejection),
            DispatchOutcome::Executed { .. } => None,
        }
    }
}
