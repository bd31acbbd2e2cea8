//! Interactive callers and the accounts that authorize them.
//!
//! An [`Actor`] is anything other than the console that can type a command
//! line: a connected player, a remote operator, a bot. The dispatcher only
//! needs three things from it: a name, a way to reply, and an [`Account`] to
//! check permission nodes against.

use std::collections::BTreeSet;

/// Permission lookup for an authenticated account.
pub trait Account: Send + Sync {
    fn has_permission(&self, node: &str) -> bool;
}

/// An interactive, authenticated invoker.
pub trait Actor: Send + Sync {
    fn name(&self) -> &str;
    fn account(&self) -> &dyn Account;
    fn send_message(&self, message: &str);
}

/// Account backed by a fixed set of permission nodes.
///
/// Supports exact nodes, the global wildcard `*`, and subtree wildcards such
/// as `server.*`, which grants `server.stop` and `server.ban.temp` but not
/// `server` itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    nodes: BTreeSet<String>,
}

impl PermissionSet {
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: nodes.into_iter().map(Into::into).collect(),
        }
    }

    /// Grant everything.
    pub fn all() -> Self {
        Self::new(["*"])
    }

    pub fn grant(&mut self, node: impl Into<String>) {
        self.nodes.insert(node.into());
    }

    pub fn revoke(&mut self, node: &str) -> bool {
        self.nodes.remove(node)
    }
}

impl Account for PermissionSet {
    fn has_permission(&self, node: &str) -> bool {
        if self.nodes.contains("*") || self.nodes.contains(node) {
            return true;
        }
        self.nodes.iter().any(|granted| {
            granted
                .strip_suffix(".*")
                .and_then(|prefix| node.strip_prefix(prefix))
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_node_is_granted() {
        let account = PermissionSet::new(["server.kick"]);
        assert!(account.has_permission("server.kick"));
        assert!(!account.has_permission("server.ban"));
    }

    #[test]
    fn global_wildcard_grants_everything() {
        assert!(PermissionSet::all().has_permission("anything.at.all"));
    }

    #[test]
    fn subtree_wildcard_requires_a_child_node() {
        let account = PermissionSet::new(["server.*"]);
        assert!(account.has_permission("server.stop"));
        assert!(account.has_permission("server.ban.temp"));
        assert!(!account.has_permission("server"));
        assert!(!account.has_permission("serverx.stop"));
    }

    #[test]
    fn revoke_removes_grant() {
        let mut account = PermissionSet::default();
        account.grant("cmdmap.perm");
        assert!(account.has_permission("cmdmap.perm"));
        assert!(account.revoke("cmdmap.perm"));
        assert!(!account.has_permission("cmdmap.perm"));
    }
}
