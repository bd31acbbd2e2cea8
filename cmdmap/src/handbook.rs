//! Command handbook: a listing of every registered command.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Serialize;

use crate::core::descriptor::ExecutionScope;
use crate::registry::RegistryEntry;

/// One handbook row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandbookEntry {
    pub label: String,
    pub aliases: Vec<String>,
    pub permission: Option<String>,
    pub scope: ExecutionScope,
    pub description: String,
    pub usage: String,
}

/// Build handbook rows from registry entries, preserving their order.
pub fn collect(entries: &[Arc<RegistryEntry>]) -> Vec<HandbookEntry> {
    entries
        .iter()
        .map(|entry| {
            let descriptor = entry.descriptor();
            HandbookEntry {
                label: descriptor.label.clone(),
                aliases: descriptor.aliases.iter().cloned().collect(),
                permission: descriptor.required_permission().map(str::to_string),
                scope: descriptor.scope,
                description: descriptor.description.clone(),
                usage: descriptor.usage.clone(),
            }
        })
        .collect()
}

/// Render rows as plain text, one command per line.
pub fn render(rows: &[HandbookEntry]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = write!(out, "{}", row.label);
        if !row.aliases.is_empty() {
            let _ = write!(out, " ({})", row.aliases.join(", "));
        }
        let _ = write!(out, " [scope: {}", row.scope);
        if let Some(node) = &row.permission {
            let _ = write!(out, ", permission: {node}");
        }
        out.push(']');
        if !row.description.is_empty() {
            let _ = write!(out, " - {}", row.description);
        }
        out.push('\n');
    }
    out
}
