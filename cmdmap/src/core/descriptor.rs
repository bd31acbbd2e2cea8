//! Static metadata describing one registered command.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Who may invoke a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionScope {
    /// Console and actors alike.
    #[default]
    Any,
    /// Only an interactive actor; the console is refused.
    ActorOnly,
    /// Only the console; actors are refused.
    ConsoleOnly,
}

impl fmt::Display for ExecutionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionScope::Any => "any",
            ExecutionScope::ActorOnly => "actor",
            ExecutionScope::ConsoleOnly => "console",
        };
        f.write_str(name)
    }
}

/// Label, aliases, permission node, and scope for one command.
///
/// Descriptors are immutable once handed to the registry. Re-registering a
/// label replaces the whole entry, descriptor included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub label: String,
    #[serde(default)]
    pub aliases: BTreeSet<String>,
    /// Absent or empty means no permission is required.
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub scope: ExecutionScope,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub usage: String,
}

impl OperationDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            aliases: BTreeSet::new(),
            permission: None,
            scope: ExecutionScope::Any,
            description: String::new(),
            usage: String::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn permission(mut self, node: impl Into<String>) -> Self {
        self.permission = Some(node.into());
        self
    }

    pub fn scope(mut self, scope: ExecutionScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// The permission node to check, or `None` when none is required.
    pub fn required_permission(&self) -> Option<&str> {
        self.permission.as_deref().filter(|node| !node.is_empty())
    }

    /// Every index key for this descriptor: the label followed by its aliases.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.label.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}
