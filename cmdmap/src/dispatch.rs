//! Command dispatch: raw line in, handler invocation out.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::actor::Actor;
use crate::core::parse::parse_line;
use crate::core::policy::authorize;
use crate::core::types::{CallerKind, DispatchOutcome, Rejection};
use crate::handler::Invocation;
use crate::io::console::Console;
use crate::registry::CommandRegistry;

/// Who typed the line.
#[derive(Clone, Copy)]
pub enum Caller<'a> {
    Console,
    Actor(&'a dyn Actor),
}

impl Caller<'_> {
    pub fn kind(&self) -> CallerKind {
        match self {
            Caller::Console => CallerKind::Console,
            Caller::Actor(_) => CallerKind::Actor,
        }
    }

    fn name(&self) -> &str {
        match self {
            Caller::Console => "console",
            Caller::Actor(actor) => actor.name(),
        }
    }
}

/// Resolves command lines against a [`CommandRegistry`] and runs them.
///
/// Shared by the console loop and every actor connection; `invoke` takes
/// `&self` and holds no lock while a handler runs.
#[derive(Clone)]
pub struct Dispatcher {
    registry: CommandRegistry,
    console: Arc<dyn Console>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, console: Arc<dyn Console>) -> Self {
        Self { registry, console }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn console(&self) -> &dyn Console {
        self.console.as_ref()
    }

    /// Parse, resolve, authorize, and run one command line.
    ///
    /// Refusals (blank line, unknown label, missing permission, wrong scope)
    /// are reported to the caller and returned as
    /// [`DispatchOutcome::Rejected`]. The only `Err` is a handler failure,
    /// which is left for the caller to log.
    #[instrument(skip_all, fields(caller = caller.name()))]
    pub fn invoke(&self, caller: Caller<'_>, raw_line: &str) -> Result<DispatchOutcome> {
        let Some(parsed) = parse_line(raw_line) else {
            return Ok(self.reject(caller, Rejection::EmptyInput));
        };

        let Some(entry) = self.registry.lookup(&parsed.label) else {
            return Ok(self.reject(
                caller,
                Rejection::UnknownCommand {
                    label: parsed.label,
                },
            ));
        };

        let descriptor = entry.descriptor();
        let granted = authorize(descriptor, caller.kind(), |node| match caller {
            Caller::Actor(actor) => actor.account().has_permission(node),
            Caller::Console => true,
        });
        if let Err(rejection) = granted {
            return Ok(self.reject(caller, rejection));
        }

        let invocation = match caller {
            Caller::Console => Invocation::Console {
                console: self.console.as_ref(),
                args: &parsed.args,
            },
            Caller::Actor(actor) => Invocation::Actor {
                actor,
                args: &parsed.args,
            },
        };
        debug!(label = %descriptor.label, typed = %parsed.label, args = parsed.args.len(), "invoking command");
        entry
            .handler()
            .execute(invocation)
            .with_context(|| format!("run command {}", descriptor.label))?;

        Ok(DispatchOutcome::Executed {
            label: descriptor.label.clone(),
        })
    }

    fn reject(&self, caller: Caller<'_>, rejection: Rejection) -> DispatchOutcome {
        debug!(%rejection, "command rejected");
        let message = rejection.to_string();
        match caller {
            Caller::Console => self.console.send_message(&message),
            Caller::Actor(actor) => actor.send_message(&message),
        }
        DispatchOutcome::Rejected(rejection)
    }
}
