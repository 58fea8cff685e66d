//! Identity keys for nodes of the object graph under validation.
//!
//! Cycle detection needs to recognize "the same object" independent of
//! value equality: two equal strings at different addresses are different
//! nodes, while two `Rc` clones of one allocation are the same node.
//! [`NodeIdentity`] captures that notion as a plain hashable key.

use std::any::{Any, TypeId};

/// Identity of one node in the object graph.
///
/// The key combines the node's data address with its concrete type. The
/// address alone is not enough: a struct and its first member start at
/// the same address, and only the type component tells them apart.
///
/// Identities are meaningful only while the referenced value is alive;
/// the engine never stores them beyond the recursion stack of a single
/// validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdentity {
    addr: usize,
    type_id: TypeId,
}

impl NodeIdentity {
    /// Creates the identity of a type-erased value.
    pub fn of(value: &dyn Any) -> Self {
        Self {
            addr: value as *const dyn Any as *const () as usize,
            type_id: value.type_id(),
        }
    }

    /// Creates the identity of a concrete value.
    pub fn of_value<T: 'static>(value: &T) -> Self {
        Self {
            addr: value as *const T as usize,
            type_id: TypeId::of::<T>(),
        }
    }

    /// Returns the data address component of this identity.
    pub fn addr(&self) -> usize {
        self.addr
    }

    /// Returns the concrete type component of this identity.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}
