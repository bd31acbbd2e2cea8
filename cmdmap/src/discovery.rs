//! Startup registration from a static command catalog.
//!
//! Every command ships a [`CommandSpec`]: its descriptor plus a
//! no-argument constructor. [`discover`] builds each one and registers the
//! successes; a constructor that fails is logged and skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::core::descriptor::OperationDescriptor;
use crate::handler::CommandHandler;
use crate::registry::CommandRegistry;

/// Constructor for a command handler.
pub type Constructor = fn() -> Result<Arc<dyn CommandHandler>>;

/// One catalog item: what the command is and how to build it.
#[derive(Clone)]
pub struct CommandSpec {
    pub descriptor: OperationDescriptor,
    pub construct: Constructor,
}

impl CommandSpec {
    pub fn new(descriptor: OperationDescriptor, construct: Constructor) -> Self {
        Self {
            descriptor,
            construct,
        }
    }
}

/// Adjustments applied to catalog descriptors before registration.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Labels to leave unregistered.
    pub disabled: BTreeSet<String>,
    /// Extra aliases per label, merged into the catalog descriptor.
    pub extra_aliases: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to construct command handler for {label}")]
    Construct {
        label: String,
        #[source]
        source: anyhow::Error,
    },
}

/// What happened to each catalog item.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub registered: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<DiscoveryError>,
}

/// Construct and register every command in `catalog`.
#[instrument(skip_all, fields(catalog = catalog.len()))]
pub fn discover(
    registry: &CommandRegistry,
    catalog: &[CommandSpec],
    options: &DiscoveryOptions,
) -> DiscoveryReport {
    let mut report = DiscoveryReport::default();
    for spec in catalog {
        let label = spec.descriptor.label.clone();
        if options.disabled.contains(&label) {
            debug!(label = %label, "command disabled by config");
            report.skipped.push(label);
            continue;
        }

        let handler = match (spec.construct)() {
            Ok(handler) => handler,
            Err(source) => {
                error!(label = %label, "failed to construct command handler: {source:#}");
                report
                    .failed
                    .push(DiscoveryError::Construct { label, source });
                continue;
            }
        };

        let mut descriptor = spec.descriptor.clone();
        if let Some(extra) = options.extra_aliases.get(&label) {
            descriptor.aliases.extend(extra.iter().cloned());
        }
        if registry.register(descriptor, handler) {
            report.registered.push(label);
        } else {
            report.skipped.push(label);
        }
    }

    info!(
        registered = report.registered.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "command discovery finished"
    );
    report
}
