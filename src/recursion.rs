//! Tracking of in-progress nodes on the active validation stack.
//!
//! The engine descends into a node only after registering it here; the
//! registration lives exactly as long as the descent. A node reachable
//! through two independent paths is therefore validated once per path,
//! while a node reached again *while still being validated* (a cycle) is
//! skipped, which guarantees termination on any finite graph.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::identity::NodeIdentity;

/// Set of node identities currently being validated.
///
/// [`enter`](RecursionGuard::enter) hands out an RAII scope instead of a
/// boolean so the matching removal cannot be skipped on any exit path,
/// early returns and error propagation included.
///
/// # Example
///
/// ```rust
/// use scrutiny::{NodeIdentity, RecursionGuard};
///
/// let guard = RecursionGuard::new();
/// let value = 42u32;
/// let id = NodeIdentity::of_value(&value);
///
/// let scope = guard.enter(id).unwrap();
/// assert!(guard.enter(id).is_none());
///
/// drop(scope);
/// assert!(guard.enter(id).is_some());
/// ```
#[derive(Debug, Default)]
pub struct RecursionGuard {
    active: Mutex<HashSet<NodeIdentity>>,
}

impl RecursionGuard {
    /// Creates a guard with no active nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `identity` as in progress.
    ///
    /// Returns `None` without changing any state when the identity is
    /// already on the stack; otherwise returns a scope whose drop
    /// removes the entry.
    pub fn enter(&self, identity: NodeIdentity) -> Option<RecursionScope<'_>> {
        let mut active = self.active.lock();
        if active.insert(identity) {
            Some(RecursionScope {
                guard: self,
                identity,
            })
        } else {
            None
        }
    }

    /// Returns true if `identity` is currently on the stack.
    pub fn is_active(&self, identity: &NodeIdentity) -> bool {
        self.active.lock().contains(identity)
    }

    /// Returns the number of nodes currently in progress.
    pub fn depth(&self) -> usize {
        self.active.lock().len()
    }
}

/// Proof that a node is registered as in progress.
///
/// Dropping the scope removes the node from the guard.
#[derive(Debug)]
pub struct RecursionScope<'a> {
    guard: &'a RecursionGuard,
    identity: NodeIdentity,
}

impl RecursionScope<'_> {
    /// Returns the identity held by this scope.
    pub fn identity(&self) -> NodeIdentity {
        self.identity
    }
}

impl Drop for RecursionScope<'_> {
    fn drop(&mut self) {
        self.guard.active.lock().remove(&self.identity);
    }
}
