//! Registry of type profiles.
//!
//! This module provides the [`ProfileRegistry`] type that stores the
//! member table of every validatable type and hands them to the engine
//! during traversal.

use std::any::TypeId;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::error::ValidatorError;
use crate::profile::TypeProfile;
use crate::traverse::Traversable;

/// Type alias for the profile storage map.
type ProfileMap = Arc<RwLock<IndexMap<TypeId, Arc<TypeProfile>>>>;

/// A thread-safe registry mapping types to their member tables.
///
/// The engine looks up every node it reaches here; a type without a
/// profile is treated as terminal. Registration normally happens once at
/// startup, after which the registry is read-only in practice.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can look up profiles concurrently (read access)
/// - Registration operations are serialized (write access)
///
/// Cloning a registry shares the underlying storage.
///
/// # Example
///
/// ```rust
/// use scrutiny::{
///     traversable_nodes, MemberRules, NonEmptyText, ProfileRegistry, TypeProfile,
/// };
///
/// struct Account {
///     owner: Option<String>,
/// }
/// traversable_nodes!(Account);
///
/// let registry = ProfileRegistry::new();
/// registry.register(
///     TypeProfile::builder::<Account>()
///         .member("owner", |a: &Account| &a.owner, MemberRules::new()
///             .constraint::<NonEmptyText<Option<String>>>())
///         .build()?,
/// )?;
///
/// assert!(registry.contains::<Account>());
/// # Ok::<(), scrutiny::ValidatorError>(())
/// ```
pub struct ProfileRegistry {
    profiles: ProfileMap,
}

impl ProfileRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Registers a profile under its type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::DuplicateProfile`] if the type already
    /// has a profile; replacing rules silently would make validation
    /// results depend on registration racing.
    pub fn register(&self, profile: TypeProfile) -> Result<(), ValidatorError> {
        let mut profiles = self.profiles.write();

        if profiles.contains_key(&profile.type_id()) {
            return Err(ValidatorError::DuplicateProfile(
                profile.type_name().to_string(),
            ));
        }

        tracing::debug!(
            r#type = profile.type_name(),
            members = profile.member_count(),
            "profile registered"
        );
        profiles.insert(profile.type_id(), Arc::new(profile));
        Ok(())
    }

    /// Retrieves the profile registered for a type id.
    pub fn get(&self, type_id: TypeId) -> Option<Arc<TypeProfile>> {
        self.profiles.read().get(&type_id).cloned()
    }

    /// Retrieves the profile registered for `T`.
    pub fn get_of<T: Traversable>(&self) -> Option<Arc<TypeProfile>> {
        self.get(TypeId::of::<T>())
    }

    /// Returns true if `T` has a registered profile.
    pub fn contains<T: Traversable>(&self) -> bool {
        self.profiles.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of registered profiles.
    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    /// Returns true if no profile is registered.
    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }

    /// Names of the registered types, in registration order.
    pub fn type_names(&self) -> Vec<String> {
        self.profiles
            .read()
            .values()
            .map(|profile| profile.type_name().to_string())
            .collect()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ProfileRegistry {
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
        }
    }
}
