//! Authorization policy applied before a handler runs.

use crate::core::descriptor::{ExecutionScope, OperationDescriptor};
use crate::core::types::{CallerKind, Rejection};

/// Decide whether `caller` may run the command described by `descriptor`.
///
/// The permission check runs first and only for actors; `has_permission` is
/// never consulted for the console or for commands without a node. The scope
/// check runs second, so an actor lacking permission on a console-only
/// command is told about the permission, not the scope.
pub fn authorize(
    descriptor: &OperationDescriptor,
    caller: CallerKind,
    has_permission: impl FnOnce(&str) -> bool,
) -> Result<(), Rejection> {
    if caller == CallerKind::Actor {
        if let Some(node) = descriptor.required_permission() {
            if !has_permission(node) {
                return Err(Rejection::PermissionDenied {
                    label: descriptor.label.clone(),
                    node: node.to_string(),
                });
            }
        }
    }

    let refused = match (caller, descriptor.scope) {
        (CallerKind::Console, ExecutionScope::ActorOnly) => true,
        (CallerKind::Actor, ExecutionScope::ConsoleOnly) => true,
        _ => false,
    };
    if refused {
        return Err(Rejection::WrongExecutionScope {
            label: descriptor.label.clone(),
            scope: descriptor.scope,
        });
    }
    Ok(())
}
