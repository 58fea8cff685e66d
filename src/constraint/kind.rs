//! Constraint-kind tokens: the identity under which constraint instances
//! are cached and attached to member rules.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::constraint::pair::KeyValueConstraint;
use crate::constraint::{short_type_name, Constraint, TypedConstraint};
use crate::error::ValidatorError;
use crate::traverse::Traversable;

/// Cache identity of a constraint kind.
///
/// Two kinds with the same `KindId` resolve to the same singleton
/// instance within a run context. The discriminator keeps two
/// differently configured kinds of the same Rust type apart, which
/// matters for composite kinds built at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KindId {
    type_id: TypeId,
    discriminator: Option<String>,
}

/// A value describing one kind of constraint.
///
/// The kind knows how to construct its constraint (fallibly, so a
/// misconfigured constraint surfaces as a
/// [`ValidatorError`](crate::ValidatorError) instead of a panic), what
/// value type the constraint declares, and under what identity the
/// instance is cached. Kinds are cheap to clone and are shared freely
/// between member rules.
#[derive(Clone)]
pub struct ConstraintKind {
    id: KindId,
    name: String,
    value_type: Option<TypeId>,
    value_type_name: Option<String>,
    factory: Arc<dyn Fn() -> Result<Arc<dyn Constraint>, ValidatorError> + Send + Sync>,
}

impl ConstraintKind {
    /// Creates the kind of a typed constraint with a default construction.
    ///
    /// This is the common case: stateless built-ins and user constraints
    /// that need no configuration.
    pub fn of<C>() -> Self
    where
        C: TypedConstraint + Default + 'static,
    {
        Self::of_with::<C, _>(|| Ok(C::default()))
    }

    /// Creates the kind of a typed constraint with a fallible factory.
    ///
    /// Use this for constraints whose construction can fail, such as
    /// pattern constraints that compile an expression up front.
    pub fn of_with<C, F>(factory: F) -> Self
    where
        C: TypedConstraint + 'static,
        F: Fn() -> Result<C, ValidatorError> + Send + Sync + 'static,
    {
        Self {
            id: KindId {
                type_id: TypeId::of::<C>(),
                discriminator: None,
            },
            name: short_type_name::<C>(),
            value_type: Some(TypeId::of::<C::Value>()),
            value_type_name: Some(short_type_name::<C::Value>()),
            factory: Arc::new(move || factory().map(|c| Arc::new(c) as Arc<dyn Constraint>)),
        }
    }

    /// Creates the kind of a constraint implementing [`Constraint`]
    /// directly, without a declared value type.
    ///
    /// Such a kind passes every legality check, since nothing about the
    /// values it accepts is known statically; the constraint itself must
    /// handle whatever it is given.
    pub fn untyped<C>() -> Self
    where
        C: Constraint + Default + 'static,
    {
        Self {
            id: KindId {
                type_id: TypeId::of::<C>(),
                discriminator: None,
            },
            name: short_type_name::<C>(),
            value_type: None,
            value_type_name: None,
            factory: Arc::new(|| Ok(Arc::new(C::default()))),
        }
    }

    /// Creates the kind of a key/value pair constraint over `(K, V)`.
    ///
    /// Both sub-kinds are checked against the projected key and value
    /// types here, before any value is validated: attaching a kind whose
    /// declared value type cannot accept the projection is a
    /// configuration error, and a run configured with it never starts.
    pub fn pair<K, V>(
        key_kind: ConstraintKind,
        value_kind: ConstraintKind,
    ) -> Result<Self, ValidatorError>
    where
        K: Traversable,
        V: Traversable,
    {
        key_kind.ensure_accepts::<K>("key")?;
        value_kind.ensure_accepts::<V>("value")?;

        let discriminator = format!(
            "{} / {}",
            key_kind.discriminator_string(),
            value_kind.discriminator_string()
        );
        let name = short_type_name::<KeyValueConstraint<K, V>>();
        let factory_key = key_kind;
        let factory_value = value_kind;

        Ok(Self {
            id: KindId {
                type_id: TypeId::of::<KeyValueConstraint<K, V>>(),
                discriminator: Some(discriminator),
            },
            name,
            value_type: Some(TypeId::of::<(K, V)>()),
            value_type_name: Some(short_type_name::<(K, V)>()),
            factory: Arc::new(move || {
                Ok(Arc::new(KeyValueConstraint::<K, V>::new(
                    factory_key.clone(),
                    factory_value.clone(),
                )))
            }),
        })
    }

    /// Returns the cache identity of this kind.
    pub fn id(&self) -> &KindId {
        &self.id
    }

    /// Returns the display name of this kind.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared value type, or `None` for untyped kinds.
    pub fn value_type(&self) -> Option<TypeId> {
        self.value_type
    }

    /// Returns the display name of the declared value type.
    pub fn value_type_name(&self) -> Option<&str> {
        self.value_type_name.as_deref()
    }

    /// Constructs a fresh instance of this kind's constraint.
    pub fn create(&self) -> Result<Arc<dyn Constraint>, ValidatorError> {
        (self.factory)()
    }

    /// Fails unless this kind can accept values of type `T`.
    fn ensure_accepts<T: 'static>(&self, slot: &'static str) -> Result<(), ValidatorError> {
        match self.value_type {
            Some(declared) if declared != TypeId::of::<T>() => {
                Err(ValidatorError::IllegalPairKind {
                    kind: self.name.clone(),
                    slot,
                    declared: self
                        .value_type_name
                        .clone()
                        .unwrap_or_else(|| "unknown".to_string()),
                    required: short_type_name::<T>(),
                })
            }
            _ => Ok(()),
        }
    }

    fn discriminator_string(&self) -> String {
        match &self.id.discriminator {
            Some(detail) => format!("{}:{}", self.name, detail),
            None => self.name.clone(),
        }
    }
}

impl fmt::Debug for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintKind")
            .field("name", &self.name)
            .field("value_type", &self.value_type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::text::{NonBlankText, NonEmptyText, Required};
    use crate::context::ObjectValidatorContext;
    use crate::path::MemberPath;

    #[derive(Default)]
    struct AcceptAnything;

    impl Constraint for AcceptAnything {
        fn validate(
            &self,
            _ctx: &ObjectValidatorContext,
            _path: &MemberPath,
            _value: &dyn Traversable,
        ) -> Result<(), ValidatorError> {
            Ok(())
        }
    }

    #[test]
    fn test_same_type_same_id() {
        let a = ConstraintKind::of::<Required<String>>();
        let b = ConstraintKind::of::<Required<String>>();
        assert_eq!(a.id(), b.id());
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn test_distinct_types_distinct_ids() {
        let a = ConstraintKind::of::<Required<String>>();
        let b = ConstraintKind::of::<Required<u32>>();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_declared_value_type() {
        let kind = ConstraintKind::of::<NonEmptyText<String>>();
        assert_eq!(kind.value_type(), Some(TypeId::of::<String>()));
    }

    #[test]
    fn test_factory_builds_constraint() {
        let kind = ConstraintKind::of::<Required<String>>();
        assert!(kind.create().is_ok());
    }

    #[test]
    fn test_pair_accepts_matching_kinds() {
        let pair = ConstraintKind::pair::<String, u32>(
            ConstraintKind::of::<NonEmptyText<String>>(),
            ConstraintKind::of::<Required<u32>>(),
        );
        // The value kind declares Option<u32>, not u32.
        assert!(pair.is_err());

        let pair = ConstraintKind::pair::<String, Option<u32>>(
            ConstraintKind::of::<NonEmptyText<String>>(),
            ConstraintKind::of::<Required<u32>>(),
        );
        assert!(pair.is_ok());
    }

    #[test]
    fn test_pair_rejects_wrong_key_kind() {
        let result = ConstraintKind::pair::<u64, String>(
            ConstraintKind::of::<NonEmptyText<String>>(),
            ConstraintKind::of::<NonEmptyText<String>>(),
        );

        match result {
            Err(ValidatorError::IllegalPairKind { slot, .. }) => assert_eq!(slot, "key"),
            other => panic!("expected an illegal pair kind error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_untyped_kind_declares_no_value_type() {
        let kind = ConstraintKind::untyped::<AcceptAnything>();
        assert!(kind.value_type().is_none());
        assert!(kind.value_type_name().is_none());
        assert!(kind.create().is_ok());
        assert_eq!(kind.id(), ConstraintKind::untyped::<AcceptAnything>().id());
    }

    #[test]
    fn test_untyped_kind_passes_any_pair_slot() {
        // The same key type a typed kind is rejected for above.
        let pair = ConstraintKind::pair::<u64, String>(
            ConstraintKind::untyped::<AcceptAnything>(),
            ConstraintKind::of::<NonEmptyText<String>>(),
        );
        assert!(pair.is_ok());
    }

    #[test]
    fn test_differently_configured_pairs_have_distinct_ids() {
        let a = ConstraintKind::pair::<String, String>(
            ConstraintKind::of::<NonEmptyText<String>>(),
            ConstraintKind::of::<NonEmptyText<String>>(),
        )
        .unwrap();
        let b = ConstraintKind::pair::<String, String>(
            ConstraintKind::of::<NonEmptyText<String>>(),
            ConstraintKind::of::<NonBlankText<String>>(),
        )
        .unwrap();

        assert_ne!(a.id(), b.id());
    }
}
