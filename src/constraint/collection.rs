//! Built-in constraint for collection-valued members.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::constraint::messages::{codes, MSG_CANNOT_BE_NULL, MSG_COLLECTION_CANNOT_BE_EMPTY};
use crate::constraint::TypedConstraint;
use crate::context::ObjectValidatorContext;
use crate::error::{ValidationError, ValidatorError};
use crate::path::MemberPath;

/// A value with a countable number of items.
///
/// `count` returns `None` when the collection itself is absent, which the
/// collection constraint treats differently from a present-but-empty
/// collection. The blanket `Option` impl gives every countable type an
/// absent-tolerant counterpart.
pub trait Countable: 'static {
    /// Number of items, or `None` when the collection is absent.
    fn count(&self) -> Option<usize>;
}

impl<T: 'static> Countable for Vec<T> {
    fn count(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: 'static, const N: usize> Countable for [T; N] {
    fn count(&self) -> Option<usize> {
        Some(N)
    }
}

impl<K: 'static, V: 'static> Countable for BTreeMap<K, V> {
    fn count(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<C: Countable> Countable for Option<C> {
    fn count(&self) -> Option<usize> {
        self.as_ref().and_then(Countable::count)
    }
}

/// Requires a collection member to be present and hold at least one item.
///
/// The check is about shape only: an absent collection reports
/// [`codes::CANNOT_BE_NULL`], a present one with zero items reports
/// [`codes::COLLECTION_CANNOT_BE_EMPTY`], and a non-empty one passes
/// without any look at its elements. Element-level rules belong to the
/// member rule's element constraints, one level below this one.
pub struct NonEmptyCollection<C: Countable> {
    _marker: PhantomData<fn() -> C>,
}

impl<C: Countable> Default for NonEmptyCollection<C> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C: Countable> TypedConstraint for NonEmptyCollection<C> {
    type Value = C;

    fn validate_typed(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &C,
    ) -> Result<(), ValidatorError> {
        match value.count() {
            None => ctx.add_error(
                ValidationError::new(path.clone(), MSG_CANNOT_BE_NULL)
                    .with_code(codes::CANNOT_BE_NULL),
            ),
            Some(0) => ctx.add_error(
                ValidationError::new(path.clone(), MSG_COLLECTION_CANNOT_BE_EMPTY)
                    .with_code(codes::COLLECTION_CANNOT_BE_EMPTY)
                    .with_got("0 items")
                    .with_expected("at least 1 item"),
            ),
            Some(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<C: Countable>(value: &C) -> crate::ValidationErrors {
        let ctx = ObjectValidatorContext::new();
        NonEmptyCollection::<C>::default()
            .validate_typed(&ctx, &MemberPath::from_field("tags"), value)
            .unwrap();
        ctx.take_errors()
    }

    #[test]
    fn test_absent_collection_reports_cannot_be_null() {
        let errors = run(&None::<Vec<String>>);
        assert_eq!(errors.len(), 1);
        let error = errors.first().unwrap();
        assert_eq!(error.code, codes::CANNOT_BE_NULL);
        assert_eq!(error.path.to_string(), "tags");
    }

    #[test]
    fn test_present_empty_reports_cannot_be_empty() {
        let errors = run(&Some(Vec::<String>::new()));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().unwrap().code,
            codes::COLLECTION_CANNOT_BE_EMPTY
        );
    }

    #[test]
    fn test_present_non_empty_passes() {
        let errors = run(&Some(vec![String::from("a")]));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_plain_vec_is_never_absent() {
        let errors = run(&Vec::<u32>::new());
        assert_eq!(
            errors.first().unwrap().code,
            codes::COLLECTION_CANNOT_BE_EMPTY
        );

        let errors = run(&vec![1u32]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_map_counts_entries() {
        let mut map = BTreeMap::new();
        assert_eq!(
            run(&map).first().unwrap().code,
            codes::COLLECTION_CANNOT_BE_EMPTY
        );

        map.insert(1u32, String::from("x"));
        assert!(run(&map).is_empty());
    }

    #[test]
    fn test_array_count_is_static() {
        let errors = run(&[1u32, 2, 3]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_shape_check_ignores_element_content() {
        // Elements that other constraints would reject still count.
        let errors = run(&Some(vec![String::new(), String::from("  ")]));
        assert!(errors.is_empty());
    }
}
