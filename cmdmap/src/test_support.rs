//! Test-only doubles for consoles, actors, and handlers.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Result, bail};

use crate::actor::{Account, Actor, PermissionSet};
use crate::core::types::CallerKind;
use crate::handler::{CommandHandler, Invocation};
use crate::io::console::Console;

/// Console that records every message instead of printing it.
#[derive(Default)]
pub struct RecordingConsole {
    messages: Mutex<Vec<String>>,
}

impl RecordingConsole {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Console for RecordingConsole {
    fn send_message(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Actor with a fixed permission set that records replies.
pub struct ScriptedActor {
    name: String,
    account: PermissionSet,
    messages: Mutex<Vec<String>>,
}

impl ScriptedActor {
    pub fn new<const N: usize>(name: &str, permissions: [&str; N]) -> Self {
        Self {
            name: name.to_string(),
            account: PermissionSet::new(permissions),
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Actor for ScriptedActor {
    fn name(&self) -> &str {
        &self.name
    }

    fn account(&self) -> &dyn Account {
        &self.account
    }

    fn send_message(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// One observed handler call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub caller: CallerKind,
    pub actor: Option<String>,
    pub args: Vec<String>,
}

/// Handler that records each invocation and succeeds.
#[derive(Default)]
pub struct RecordingHandler {
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingHandler {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CommandHandler for RecordingHandler {
    fn execute(&self, invocation: Invocation<'_>) -> Result<()> {
        let call = RecordedCall {
            caller: invocation.caller_kind(),
            actor: invocation.actor().map(|actor| actor.name().to_string()),
            args: invocation.args().to_vec(),
        };
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        Ok(())
    }
}

/// Handler that always fails with "exploded".
pub struct FailingHandler;

impl CommandHandler for FailingHandler {
    fn execute(&self, _invocation: Invocation<'_>) -> Result<()> {
        bail!("exploded")
    }
}
