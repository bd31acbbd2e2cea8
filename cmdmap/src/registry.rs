//! Thread-safe command registry.
//!
//! [`CommandRegistry`] owns the label index: every label and alias maps to a
//! shared `Arc<RegistryEntry>`. All keys of one entry are inserted and
//! removed under a single write guard, so concurrent readers see either the
//! whole entry or none of it.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::core::descriptor::OperationDescriptor;
use crate::handler::CommandHandler;

/// One registered command: its handler and the descriptor it was registered with.
pub struct RegistryEntry {
    descriptor: OperationDescriptor,
    handler: Arc<dyn CommandHandler>,
}

impl RegistryEntry {
    pub fn descriptor(&self) -> &OperationDescriptor {
        &self.descriptor
    }

    pub fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

type Index = HashMap<String, Arc<RegistryEntry>>;

/// Label and alias index for every registered command.
///
/// Cloning is cheap and yields a handle to the same index.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    index: Arc<RwLock<Index>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under the descriptor's label and every alias.
    ///
    /// An entry already registered under the same label is replaced wholesale:
    /// all of its keys are dropped first, including aliases the new descriptor
    /// no longer declares. A key held by a *different* entry is overwritten
    /// (last write wins); that entry keeps its remaining keys, even when the
    /// overwritten key is the new label.
    ///
    /// An empty label is refused and `false` returned; empty aliases are
    /// skipped.
    pub fn register(
        &self,
        descriptor: OperationDescriptor,
        handler: Arc<dyn CommandHandler>,
    ) -> bool {
        if descriptor.label.is_empty() {
            warn!(aliases = ?descriptor.aliases, "refusing to register command with empty label");
            return false;
        }
        let label = descriptor.label.clone();
        let entry = Arc::new(RegistryEntry {
            descriptor,
            handler,
        });

        let mut index = self.write();
        if let Some(previous) = index
            .get(&label)
            .filter(|previous| previous.descriptor.label == label)
            .cloned()
        {
            remove_entry(&mut index, &previous);
        }
        for key in entry.descriptor.keys() {
            if key.is_empty() {
                warn!(label = %label, "skipping empty alias");
                continue;
            }
            let displaced = index.insert(key.to_string(), Arc::clone(&entry));
            if let Some(displaced) = displaced.filter(|old| !Arc::ptr_eq(old, &entry)) {
                warn!(
                    key,
                    label = %label,
                    displaced = %displaced.descriptor.label,
                    "command key overwritten"
                );
            }
        }
        drop(index);

        debug!(label = %label, aliases = entry.descriptor.aliases.len(), "registered command");
        true
    }

    /// Remove the entry `label` resolves to, along with every key mapping to it.
    ///
    /// `label` may be the primary label or any alias. Returns `false` when
    /// nothing was registered under it.
    pub fn unregister(&self, label: &str) -> bool {
        let mut index = self.write();
        let Some(entry) = index.get(label).cloned() else {
            return false;
        };
        let removed = remove_entry(&mut index, &entry);
        drop(index);

        debug!(
            requested = label,
            label = %entry.descriptor.label,
            keys = removed,
            "unregistered command"
        );
        true
    }

    /// Resolve a label or alias.
    pub fn lookup(&self, label: &str) -> Option<Arc<RegistryEntry>> {
        self.read().get(label).cloned()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.read().contains_key(label)
    }

    /// Number of keys (labels plus aliases) in the index.
    pub fn key_count(&self) -> usize {
        self.read().len()
    }

    /// Handlers for every key in the index, one per key.
    ///
    /// An entry with aliases appears once per key, like the index itself.
    pub fn snapshot(&self) -> Vec<Arc<dyn CommandHandler>> {
        self.read()
            .values()
            .map(|entry| Arc::clone(&entry.handler))
            .collect()
    }

    /// Copy of the key -> handler mapping, sorted by key.
    pub fn snapshot_map(&self) -> BTreeMap<String, Arc<dyn CommandHandler>> {
        self.read()
            .iter()
            .map(|(key, entry)| (key.clone(), Arc::clone(&entry.handler)))
            .collect()
    }

    /// Distinct registered entries, sorted by primary label.
    pub fn entries(&self) -> Vec<Arc<RegistryEntry>> {
        let index = self.read();
        let mut entries: Vec<Arc<RegistryEntry>> = Vec::new();
        for entry in index.values() {
            if !entries.iter().any(|seen| Arc::ptr_eq(seen, entry)) {
                entries.push(Arc::clone(entry));
            }
        }
        drop(index);
        entries.sort_by(|a, b| a.descriptor.label.cmp(&b.descriptor.label));
        entries
    }

    // The index is only mutated between acquiring and dropping a write guard,
    // and every mutation runs to completion, so a poisoned lock still guards a
    // consistent map.
    fn read(&self) -> RwLockReadGuard<'_, Index> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Index> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drop every key that still points at `entry`. Returns the number removed.
fn remove_entry(index: &mut Index, entry: &Arc<RegistryEntry>) -> usize {
    let mut removed = 0;
    for key in entry.descriptor.keys() {
        if index
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, entry))
        {
            index.remove(key);
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Invocation;
    use anyhow::Result;

    struct Noop;

    impl CommandHandler for Noop {
        fn execute(&self, _invocation: Invocation<'_>) -> Result<()> {
            Ok(())
        }
    }

    fn noop() -> Arc<dyn CommandHandler> {
        Arc::new(Noop)
    }

    #[test]
    fn label_and_aliases_share_one_handler() {
        let registry = CommandRegistry::new();
        let handler = noop();
        registry.register(
            OperationDescriptor::new("teleport").aliases(["tp", "goto"]),
            Arc::clone(&handler),
        );

        for key in ["teleport", "tp", "goto"] {
            let entry = registry.lookup(key).expect("registered key");
            assert!(Arc::ptr_eq(entry.handler(), &handler), "key {key}");
            assert_eq!(entry.descriptor().label, "teleport");
        }
        assert_eq!(registry.key_count(), 3);
    }

    #[test]
    fn unregister_by_alias_removes_every_key() {
        let registry = CommandRegistry::new();
        registry.register(
            OperationDescriptor::new("teleport").aliases(["tp", "goto"]),
            noop(),
        );

        assert!(registry.unregister("tp"));
        for key in ["teleport", "tp", "goto"] {
            assert!(registry.lookup(key).is_none(), "key {key} still resolves");
        }
        assert_eq!(registry.key_count(), 0);
    }

    #[test]
    fn unregister_unknown_is_noop() {
        let registry = CommandRegistry::new();
        registry.register(OperationDescriptor::new("echo"), noop());
        assert!(!registry.unregister("missing"));
        assert!(registry.contains("echo"));
    }

    #[test]
    fn reregister_drops_stale_aliases() {
        let registry = CommandRegistry::new();
        registry.register(
            OperationDescriptor::new("give").aliases(["g", "item"]),
            noop(),
        );
        let replacement = noop();
        registry.register(
            OperationDescriptor::new("give").alias("g"),
            Arc::clone(&replacement),
        );

        assert!(registry.lookup("item").is_none());
        let entry = registry.lookup("g").expect("alias kept");
        assert!(Arc::ptr_eq(entry.handler(), &replacement));
        assert_eq!(registry.key_count(), 2);
    }

    #[test]
    fn colliding_alias_is_overwritten_last_write_wins() {
        let registry = CommandRegistry::new();
        let kick = noop();
        let kill = noop();
        registry.register(OperationDescriptor::new("kick").alias("k"), Arc::clone(&kick));
        registry.register(OperationDescriptor::new("kill").alias("k"), Arc::clone(&kill));

        let entry = registry.lookup("k").expect("k");
        assert!(Arc::ptr_eq(entry.handler(), &kill));
        assert!(Arc::ptr_eq(registry.lookup("kick").expect("kick").handler(), &kick));

        // Unregistering kick must not take the key it no longer owns.
        assert!(registry.unregister("kick"));
        assert!(registry.lookup("k").is_some());
    }

    #[test]
    fn label_taking_another_entrys_alias_keeps_that_entry() {
        let registry = CommandRegistry::new();
        let kick = noop();
        let k = noop();
        registry.register(OperationDescriptor::new("kick").alias("k"), Arc::clone(&kick));
        assert!(registry.register(OperationDescriptor::new("k"), Arc::clone(&k)));

        let entry = registry.lookup("kick").expect("kick survives");
        assert!(Arc::ptr_eq(entry.handler(), &kick));
        let entry = registry.lookup("k").expect("k");
        assert!(Arc::ptr_eq(entry.handler(), &k));
        assert_eq!(entry.descriptor().label, "k");
        assert_eq!(registry.key_count(), 2);

        // Re-registering `k` replaces only the entry labelled `k`.
        registry.register(OperationDescriptor::new("k"), noop());
        assert!(registry.contains("kick"));
    }

    #[test]
    fn empty_label_is_refused() {
        let registry = CommandRegistry::new();
        assert!(!registry.register(OperationDescriptor::new("").alias("x"), noop()));
        assert_eq!(registry.key_count(), 0);

        assert!(registry.register(OperationDescriptor::new("echo").alias(""), noop()));
        assert!(!registry.contains(""));
        assert_eq!(registry.key_count(), 1);
    }

    #[test]
    fn snapshots_are_detached_copies() {
        let registry = CommandRegistry::new();
        registry.register(OperationDescriptor::new("echo").alias("say"), noop());

        let mut map = registry.snapshot_map();
        assert_eq!(
            map.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["echo", "say"]
        );
        map.clear();
        let mut list = registry.snapshot();
        assert_eq!(list.len(), 2);
        list.clear();

        assert!(registry.contains("echo"));
        assert!(registry.contains("say"));
    }

    #[test]
    fn entries_are_distinct_and_sorted() {
        let registry = CommandRegistry::new();
        registry.register(OperationDescriptor::new("whoami"), noop());
        registry.register(OperationDescriptor::new("echo").alias("say"), noop());

        let labels: Vec<String> = registry
            .entries()
            .iter()
            .map(|entry| entry.descriptor().label.clone())
            .collect();
        assert_eq!(labels, vec!["echo", "whoami"]);
    }

    #[test]
    fn clones_share_the_index() {
        let registry = CommandRegistry::new();
        let handle = registry.clone();
        handle.register(OperationDescriptor::new("echo"), noop());
        assert!(registry.contains("echo"));
    }
}
