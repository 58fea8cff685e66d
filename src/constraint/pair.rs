//! Composite constraint for key/value pair members.

use std::marker::PhantomData;

use crate::constraint::{ConstraintKind, TypedConstraint};
use crate::context::ObjectValidatorContext;
use crate::error::ValidatorError;
use crate::path::MemberPath;
use crate::traverse::Traversable;

/// Applies one constraint kind to the key and another to the value of a
/// `(K, V)` pair.
///
/// The constraint re-dispatches through the run context: each sub-kind is
/// resolved to its cached singleton and applied to the projected half
/// with the path extended by a `Key` or `Value` segment, so sub-errors
/// read like `entries[0].Key`. Apart from the path extension, validating
/// a pair is exactly equivalent to validating the two halves directly.
///
/// Instances are only created through
/// [`ConstraintKind::pair`](crate::ConstraintKind::pair), which checks
/// both sub-kinds against `K` and `V` before the kind can be attached
/// anywhere.
pub struct KeyValueConstraint<K: Traversable, V: Traversable> {
    key_kind: ConstraintKind,
    value_kind: ConstraintKind,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K: Traversable, V: Traversable> KeyValueConstraint<K, V> {
    pub(crate) fn new(key_kind: ConstraintKind, value_kind: ConstraintKind) -> Self {
        Self {
            key_kind,
            value_kind,
            _marker: PhantomData,
        }
    }
}

impl<K: Traversable, V: Traversable> TypedConstraint for KeyValueConstraint<K, V> {
    type Value = (K, V);

    fn validate_typed(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        pair: &(K, V),
    ) -> Result<(), ValidatorError> {
        let key_constraint = ctx.resolve(&self.key_kind)?;
        key_constraint.validate(ctx, &path.push_key_projection(), &pair.0)?;

        let value_constraint = ctx.resolve(&self.value_kind)?;
        value_constraint.validate(ctx, &path.push_value_projection(), &pair.1)?;

        Ok(())
    }
}
