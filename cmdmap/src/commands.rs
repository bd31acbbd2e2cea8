//! Built-in commands and the default catalog.

use std::sync::Arc;

use anyhow::{Result, bail};

use crate::core::descriptor::{ExecutionScope, OperationDescriptor};
use crate::discovery::CommandSpec;
use crate::handler::{CommandHandler, Invocation};

/// The catalog registered by `cmdmap console`.
pub fn builtin_catalog() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new(
            OperationDescriptor::new("echo")
                .alias("say")
                .description("Repeat the arguments back to the caller.")
                .usage("echo <text...>"),
            || Ok(Arc::new(Echo)),
        ),
        CommandSpec::new(
            OperationDescriptor::new("whoami")
                .scope(ExecutionScope::ActorOnly)
                .description("Show the name of the invoking actor.")
                .usage("whoami"),
            || Ok(Arc::new(WhoAmI)),
        ),
        CommandSpec::new(
            OperationDescriptor::new("perm")
                .alias("permcheck")
                .permission("cmdmap.perm")
                .description("Report whether the caller holds a permission node.")
                .usage("perm <node>"),
            || Ok(Arc::new(PermCheck)),
        ),
        CommandSpec::new(
            OperationDescriptor::new("version")
                .scope(ExecutionScope::ConsoleOnly)
                .description("Print the cmdmap version.")
                .usage("version"),
            || Ok(Arc::new(Version)),
        ),
    ]
}

struct Echo;

impl CommandHandler for Echo {
    fn execute(&self, invocation: Invocation<'_>) -> Result<()> {
        invocation.reply(&invocation.args().join(" "));
        Ok(())
    }
}

struct WhoAmI;

impl CommandHandler for WhoAmI {
    fn execute(&self, invocation: Invocation<'_>) -> Result<()> {
        match invocation.actor() {
            Some(actor) => {
                invocation.reply(actor.name());
                Ok(())
            }
            None => bail!("whoami needs an actor"),
        }
    }
}

struct PermCheck;

impl CommandHandler for PermCheck {
    fn execute(&self, invocation: Invocation<'_>) -> Result<()> {
        let [node] = invocation.args() else {
            invocation.reply("Usage: perm <node>");
            return Ok(());
        };
        let granted = match invocation {
            Invocation::Console { .. } => true,
            Invocation::Actor { actor, .. } => actor.account().has_permission(node),
        };
        let verdict = if granted { "granted" } else { "denied" };
        invocation.reply(&format!("{node}: {verdict}"));
        Ok(())
    }
}

struct Version;

impl CommandHandler for Version {
    fn execute(&self, invocation: Invocation<'_>) -> Result<()> {
        invocation.reply(concat!("cmdmap ", env!("CARGO_PKG_VERSION")));
        Ok(())
    }
}
