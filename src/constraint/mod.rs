//! Constraint contract and built-in constraints.
//!
//! This module provides the [`Constraint`] trait that every unit of
//! validation logic implements, the strongly-typed [`TypedConstraint`]
//! adapter most implementations use instead, and the built-in constraints
//! for common absence/emptiness/pattern checks.

mod collection;
mod kind;
pub mod messages;
mod pair;
mod text;

pub use collection::{Countable, NonEmptyCollection};
pub use kind::{ConstraintKind, KindId};
pub use pair::KeyValueConstraint;
pub use text::{MatchesPattern, NonBlankText, NonEmptyText, PatternSpec, Required, TextValue};

use crate::context::ObjectValidatorContext;
use crate::error::ValidatorError;
use crate::path::MemberPath;
use crate::traverse::Traversable;

/// A unit of validation logic applied to one member value.
///
/// A constraint inspects a type-erased value and reports findings by
/// appending [`ValidationError`](crate::ValidationError)s to the run
/// context; it never interrupts the run for an invalid value. The `Err`
/// branch is reserved for configuration failures (a value of a type the
/// constraint cannot handle, an illegal sub-constraint), which abort the
/// whole call.
///
/// Constraints are stateless or configuration-only: the context caches a
/// single instance per kind and reuses it for every member it applies to.
/// The `Send + Sync` bounds let a deliberately shared context hand the
/// same instance to several threads.
///
/// Most implementations should use [`TypedConstraint`] instead and get
/// this trait through the blanket impl; implement `Constraint` directly
/// only when the constraint genuinely handles more than one value type.
pub trait Constraint: Send + Sync {
    /// Validates `value` at `path`, recording findings in `ctx`.
    fn validate(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &dyn Traversable,
    ) -> Result<(), ValidatorError>;
}

/// A constraint over one concrete value type.
///
/// `TypedConstraint` spares implementations the downcast boilerplate: the
/// blanket [`Constraint`] impl recovers `&Self::Value` from the erased
/// value and fails fast with
/// [`ValidatorError::ValueTypeMismatch`](crate::ValidatorError) when the
/// engine was misconfigured with a value of another type.
///
/// # Example
///
/// ```rust
/// use scrutiny::{
///     MemberPath, ObjectValidatorContext, TypedConstraint, ValidationError, ValidatorError,
/// };
///
/// #[derive(Default)]
/// struct EvenNumber;
///
/// impl TypedConstraint for EvenNumber {
///     type Value = u32;
///
///     fn validate_typed(
///         &self,
///         ctx: &ObjectValidatorContext,
///         path: &MemberPath,
///         value: &u32,
///     ) -> Result<(), ValidatorError> {
///         if value % 2 != 0 {
///             ctx.add_error(
///                 ValidationError::new(path.clone(), "value must be even")
///                     .with_code("not_even")
///                     .with_got(value.to_string()),
///             );
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait TypedConstraint: Send + Sync {
    /// The value type this constraint validates.
    type Value: 'static;

    /// Validates a correctly-typed value at `path`, recording findings in `ctx`.
    fn validate_typed(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &Self::Value,
    ) -> Result<(), ValidatorError>;
}

/// Blanket implementation adapting typed constraints to the erased contract.
impl<C: TypedConstraint> Constraint for C {
    fn validate(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &dyn Traversable,
    ) -> Result<(), ValidatorError> {
        match value.as_any().downcast_ref::<C::Value>() {
            Some(typed) => self.validate_typed(ctx, path, typed),
            None => Err(ValidatorError::ValueTypeMismatch {
                constraint: short_type_name::<C>(),
                expected: short_type_name::<C::Value>(),
                actual: shorten_type_name(value.type_name()),
            }),
        }
    }
}

/// Returns the type's name without module paths, generics included.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    shorten_type_name(std::any::type_name::<T>())
}

/// Strips module paths from a `type_name` rendering.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`; the
/// generic structure is kept because it is what distinguishes the
/// built-in constraints from each other.
pub(crate) fn shorten_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut ident = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            ident.push(ch);
        } else {
            push_last_segment(&mut out, &ident);
            ident.clear();
            out.push(ch);
        }
    }
    push_last_segment(&mut out, &ident);
    out
}

fn push_last_segment(out: &mut String, ident: &str) {
    match ident.rsplit("::").next() {
        Some(last) => out.push_str(last),
        None => out.push_str(ident),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_plain_path() {
        assert_eq!(shorten_type_name("alloc::string::String"), "String");
    }

    #[test]
    fn test_shorten_generic_path() {
        assert_eq!(
            shorten_type_name("alloc::vec::Vec<alloc::string::String>"),
            "Vec<String>"
        );
    }

    #[test]
    fn test_shorten_nested_generics() {
        assert_eq!(
            shorten_type_name("core::option::Option<alloc::vec::Vec<u64>>"),
            "Option<Vec<u64>>"
        );
    }

    #[test]
    fn test_shorten_primitive_untouched() {
        assert_eq!(shorten_type_name("u32"), "u32");
        assert_eq!(shorten_type_name("&str"), "&str");
    }

    #[test]
    fn test_short_type_name_of_concrete_type() {
        assert_eq!(short_type_name::<Vec<String>>(), "Vec<String>");
    }
}
