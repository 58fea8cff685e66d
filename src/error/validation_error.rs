//! Data-level validation error types.
//!
//! This module provides [`ValidationError`] for single constraint failures
//! and [`ValidationErrors`] for the ordered collection a validation run
//! accumulates.

use std::fmt::{self, Display};

use stillwater::prelude::*;
use stillwater::Validation;

use crate::path::MemberPath;

/// A single validation error with full context.
///
/// `ValidationError` captures all relevant information about a constraint
/// failure:
/// - **path**: Where in the object graph the error occurred
/// - **message**: Human-readable description of the failure
/// - **got**: Rendering of the offending value (optional)
/// - **expected**: What was expected instead (optional)
/// - **code**: Machine-readable error code for programmatic handling
///
/// Errors are plain data; constraints create them and hand them to the
/// run context, nothing in the engine ever mutates one afterwards.
///
/// # Example
///
/// ```rust
/// use scrutiny::{MemberPath, ValidationError};
///
/// let error = ValidationError::new(
///     MemberPath::root().push_field("email"),
///     "value does not match the expected pattern"
/// )
/// .with_code("pattern_mismatch")
/// .with_got("not-an-email")
/// .with_expected("^\\S+@\\S+$");
///
/// assert_eq!(error.code, "pattern_mismatch");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The path to the member that failed validation.
    pub path: MemberPath,
    /// Human-readable error message.
    pub message: String,
    /// Rendering of the offending value (formatted as string).
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// Machine-readable error code (e.g., `cannot_be_null`).
    pub code: String,
}

impl ValidationError {
    /// Creates a new validation error with the given path and message.
    ///
    /// The error code defaults to "validation_error". Use `with_code` to
    /// set a more specific code.
    pub fn new(path: MemberPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "validation_error".to_string(),
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" (offending value) field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Returns a copy of this error with `prefix` prepended to its path.
    pub fn prefixed(&self, prefix: &MemberPath) -> Self {
        Self {
            path: prefix.join(&self.path),
            message: self.message.clone(),
            got: self.got.clone(),
            expected: self.expected.clone(),
            code: self.code.clone(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ValidationError is Send + Sync since all fields are owned types
// (String, MemberPath with Vec<PathSegment>, Option<String>)
// This is automatically derived, but we add these assertions to ensure
// it remains true if the types change.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// The ordered collection of errors produced by a validation run.
///
/// Unlike a parser, a validation run over a *valid* object legitimately
/// produces zero errors, so `ValidationErrors` wraps a plain `Vec` and
/// may be empty. Insertion order is discovery order and the engine
/// guarantees discovery order follows member declaration order, so the
/// collection is deterministic for a fixed object graph.
///
/// # Combining Errors
///
/// `ValidationErrors` implements `Semigroup`, allowing results from
/// independent runs (for example one per thread) to be merged:
///
/// ```rust
/// use scrutiny::{MemberPath, ValidationError, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let errors1 = ValidationErrors::single(
///     ValidationError::new(MemberPath::root().push_field("name"), "required")
/// );
/// let errors2 = ValidationErrors::single(
///     ValidationError::new(MemberPath::root().push_field("email"), "invalid format")
/// );
///
/// let combined = errors1.combine(errors2);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `ValidationErrors` containing a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(vec![error])
    }

    /// Creates a `ValidationErrors` from a `Vec` of errors.
    pub fn from_vec(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Appends an error to the collection.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Appends all errors of `other`, preserving both orders.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the run produced no errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns all errors at the specified path.
    pub fn at_path(&self, path: &MemberPath) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors with the specified error code.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error, or None if the run was clean.
    pub fn first(&self) -> Option<&ValidationError> {
        self.0.first()
    }

    /// Converts this collection into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// Bridges the collection into an applicative `Validation`.
    ///
    /// An empty collection becomes `Success(())`; a non-empty one
    /// becomes `Failure` carrying the errors, so callers can compose
    /// run results with other `Validation`-based checks.
    pub fn into_validation(self) -> Validation<(), ValidationErrors> {
        if self.0.is_empty() {
            Validation::Success(())
        } else {
            Validation::Failure(self)
        }
    }
}

impl Semigroup for ValidationErrors {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ValidationErrors is Send + Sync since it only contains ValidationError
// which is Send + Sync
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_creation() {
        let error = ValidationError::new(MemberPath::root().push_field("name"), "value is absent");

        assert_eq!(error.path, MemberPath::root().push_field("name"));
        assert_eq!(error.message, "value is absent");
        assert_eq!(error.code, "validation_error");
        assert!(error.got.is_none());
        assert!(error.expected.is_none());
    }

    #[test]
    fn test_validation_error_builder() {
        let error = ValidationError::new(MemberPath::root().push_field("tags"), "must not be empty")
            .with_code("collection_cannot_be_empty")
            .with_got("0 items")
            .with_expected("at least one item");

        assert_eq!(error.code, "collection_cannot_be_empty");
        assert_eq!(error.got, Some("0 items".to_string()));
        assert_eq!(error.expected, Some("at least one item".to_string()));
    }

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::new(MemberPath::root().push_field("email"), "invalid format")
            .with_expected("email address")
            .with_got("not-an-email");

        let display = error.to_string();
        assert!(display.contains("email: invalid format"));
        assert!(display.contains("expected: email address"));
        assert!(display.contains("got: not-an-email"));
    }

    #[test]
    fn test_validation_error_display_root() {
        let error = ValidationError::new(MemberPath::root(), "value is null");
        let display = error.to_string();
        assert!(display.contains("(root): value is null"));
    }

    #[test]
    fn test_prefixed_rebases_path() {
        let error = ValidationError::new(
            MemberPath::root().push_field("tags").push_index(2),
            "bad tag",
        );

        let prefixed = error.prefixed(&MemberPath::root().push_index(7));
        assert_eq!(prefixed.path.to_string(), "[7].tags[2]");
        assert_eq!(prefixed.message, "bad tag");
    }

    #[test]
    fn test_empty_collection() {
        let errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
        assert!(errors.first().is_none());
    }

    #[test]
    fn test_validation_errors_single() {
        let error = ValidationError::new(MemberPath::root(), "test");
        let errors = ValidationErrors::single(error.clone());

        assert_eq!(errors.len(), 1);
        assert!(!errors.is_empty());
        assert_eq!(errors.first(), Some(&error));
    }

    #[test]
    fn test_validation_errors_combine() {
        let error1 = ValidationError::new(MemberPath::root().push_field("a"), "error 1");
        let error2 = ValidationError::new(MemberPath::root().push_field("b"), "error 2");

        let errors1 = ValidationErrors::single(error1);
        let errors2 = ValidationErrors::single(error2);
        let combined = errors1.combine(errors2);

        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_combine_preserves_order() {
        let error1 = ValidationError::new(MemberPath::root().push_field("a"), "first");
        let error2 = ValidationError::new(MemberPath::root().push_field("b"), "second");

        let combined =
            ValidationErrors::single(error1).combine(ValidationErrors::single(error2));

        let messages: Vec<_> = combined.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_validation_errors_at_path() {
        let path_a = MemberPath::root().push_field("a");
        let path_b = MemberPath::root().push_field("b");

        let error1 = ValidationError::new(path_a.clone(), "error 1").with_code("code1");
        let error2 = ValidationError::new(path_a.clone(), "error 2").with_code("code2");
        let error3 = ValidationError::new(path_b.clone(), "error 3").with_code("code1");

        let errors = ValidationErrors::from_vec(vec![error1, error2, error3]);

        let at_a = errors.at_path(&path_a);
        assert_eq!(at_a.len(), 2);

        let at_b = errors.at_path(&path_b);
        assert_eq!(at_b.len(), 1);
    }

    #[test]
    fn test_validation_errors_with_code() {
        let error1 = ValidationError::new(MemberPath::root().push_field("a"), "error 1")
            .with_code("cannot_be_null");
        let error2 = ValidationError::new(MemberPath::root().push_field("b"), "error 2")
            .with_code("pattern_mismatch");
        let error3 = ValidationError::new(MemberPath::root().push_field("c"), "error 3")
            .with_code("cannot_be_null");

        let errors = ValidationErrors::from_vec(vec![error1, error2, error3]);

        let null_errors = errors.with_code("cannot_be_null");
        assert_eq!(null_errors.len(), 2);

        let pattern_errors = errors.with_code("pattern_mismatch");
        assert_eq!(pattern_errors.len(), 1);
    }

    #[test]
    fn test_validation_errors_into_iter() {
        let error1 = ValidationError::new(MemberPath::root().push_field("a"), "error 1");
        let error2 = ValidationError::new(MemberPath::root().push_field("b"), "error 2");

        let errors = ValidationErrors::from_vec(vec![error1, error2]);

        let collected: Vec<ValidationError> = errors.into_iter().collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn test_validation_errors_display() {
        let error1 = ValidationError::new(MemberPath::root().push_field("name"), "required");
        let error2 = ValidationError::new(MemberPath::root().push_field("email"), "invalid");

        let errors = ValidationErrors::from_vec(vec![error1, error2]);
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("name: required"));
        assert!(display.contains("email: invalid"));
    }

    #[test]
    fn test_into_validation_bridge() {
        let clean = ValidationErrors::new();
        assert!(matches!(clean.into_validation(), Validation::Success(())));

        let dirty = ValidationErrors::single(ValidationError::new(MemberPath::root(), "bad"));
        match dirty.into_validation() {
            Validation::Failure(errors) => assert_eq!(errors.len(), 1),
            Validation::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_semigroup_associativity() {
        let e1 = ValidationErrors::single(ValidationError::new(MemberPath::root(), "1"));
        let e2 = ValidationErrors::single(ValidationError::new(MemberPath::root(), "2"));
        let e3 = ValidationErrors::single(ValidationError::new(MemberPath::root(), "3"));

        // (e1 <> e2) <> e3
        let left = e1.clone().combine(e2.clone()).combine(e3.clone());
        // e1 <> (e2 <> e3)
        let right = e1.combine(e2.combine(e3));

        assert_eq!(left.len(), right.len());
        let left_msgs: Vec<_> = left.iter().map(|e| &e.message).collect();
        let right_msgs: Vec<_> = right.iter().map(|e| &e.message).collect();
        assert_eq!(left_msgs, right_msgs);
    }
}
