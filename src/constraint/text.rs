//! Built-in constraints for absent and text-valued members.

use std::marker::PhantomData;

use regex::Regex;

use crate::constraint::messages::{
    codes, MSG_CANNOT_BE_NULL, MSG_PATTERN_MISMATCH, MSG_STRING_CANNOT_BE_BLANK,
    MSG_STRING_CANNOT_BE_EMPTY,
};
use crate::constraint::{ConstraintKind, TypedConstraint};
use crate::context::ObjectValidatorContext;
use crate::error::{ValidationError, ValidatorError};
use crate::path::MemberPath;

/// A value that may carry text.
///
/// The text constraints are declared over this capability instead of
/// `String` directly so one constraint type covers both a plain string
/// member and an optional one: `Option<String>` reports its text as
/// absent when it is `None`.
pub trait TextValue: 'static {
    /// Returns the text, or `None` when the value is absent.
    fn text(&self) -> Option<&str>;
}

impl TextValue for String {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextValue for &'static str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<S: TextValue> TextValue for Option<S> {
    fn text(&self) -> Option<&str> {
        self.as_ref().and_then(TextValue::text)
    }
}

/// Requires an optional member to be present.
///
/// Reports [`codes::CANNOT_BE_NULL`] when the member is `None`; a present
/// value passes regardless of its content.
pub struct Required<T: 'static> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Default for Required<T> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> TypedConstraint for Required<T> {
    type Value = Option<T>;

    fn validate_typed(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &Option<T>,
    ) -> Result<(), ValidatorError> {
        if value.is_none() {
            ctx.add_error(
                ValidationError::new(path.clone(), MSG_CANNOT_BE_NULL)
                    .with_code(codes::CANNOT_BE_NULL),
            );
        }
        Ok(())
    }
}

/// Requires text to be present and non-empty.
///
/// An absent value reports [`codes::CANNOT_BE_NULL`]; a present empty
/// string reports [`codes::STRING_CANNOT_BE_EMPTY`].
pub struct NonEmptyText<S: TextValue> {
    _marker: PhantomData<fn() -> S>,
}

impl<S: TextValue> Default for NonEmptyText<S> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S: TextValue> TypedConstraint for NonEmptyText<S> {
    type Value = S;

    fn validate_typed(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &S,
    ) -> Result<(), ValidatorError> {
        match value.text() {
            None => ctx.add_error(
                ValidationError::new(path.clone(), MSG_CANNOT_BE_NULL)
                    .with_code(codes::CANNOT_BE_NULL),
            ),
            Some(text) if text.is_empty() => ctx.add_error(
                ValidationError::new(path.clone(), MSG_STRING_CANNOT_BE_EMPTY)
                    .with_code(codes::STRING_CANNOT_BE_EMPTY),
            ),
            Some(_) => {}
        }
        Ok(())
    }
}

/// Requires text to be present and contain a non-whitespace character.
///
/// An absent value reports [`codes::CANNOT_BE_NULL`]; a present string
/// that is empty or whitespace-only reports
/// [`codes::STRING_CANNOT_BE_BLANK`].
pub struct NonBlankText<S: TextValue> {
    _marker: PhantomData<fn() -> S>,
}

impl<S: TextValue> Default for NonBlankText<S> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<S: TextValue> TypedConstraint for NonBlankText<S> {
    type Value = S;

    fn validate_typed(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &S,
    ) -> Result<(), ValidatorError> {
        match value.text() {
            None => ctx.add_error(
                ValidationError::new(path.clone(), MSG_CANNOT_BE_NULL)
                    .with_code(codes::CANNOT_BE_NULL),
            ),
            Some(text) if text.trim().is_empty() => ctx.add_error(
                ValidationError::new(path.clone(), MSG_STRING_CANNOT_BE_BLANK)
                    .with_code(codes::STRING_CANNOT_BE_BLANK)
                    .with_got(format!("{:?}", text)),
            ),
            Some(_) => {}
        }
        Ok(())
    }
}

/// Supplies the expression for a [`MatchesPattern`] constraint.
///
/// Each pattern is its own marker type, so differently-patterned
/// constraints are distinct kinds with distinct cached instances.
///
/// # Example
///
/// ```rust
/// use scrutiny::PatternSpec;
///
/// struct IsoDate;
///
/// impl PatternSpec for IsoDate {
///     const PATTERN: &'static str = r"^\d{4}-\d{2}-\d{2}$";
/// }
/// ```
pub trait PatternSpec: 'static {
    /// The expression to compile.
    const PATTERN: &'static str;
}

/// Requires present text to match a compiled pattern.
///
/// The expression is compiled once when the constraint is constructed;
/// an unparsable expression is a configuration error raised at
/// [`MatchesPattern::new`], so use [`MatchesPattern::kind`] to attach it
/// and the failure will surface the first time the kind is resolved.
/// An absent value reports [`codes::CANNOT_BE_NULL`]; present text that
/// does not match reports [`codes::PATTERN_MISMATCH`].
pub struct MatchesPattern<P: PatternSpec, S: TextValue = String> {
    regex: Regex,
    _marker: PhantomData<fn() -> (P, S)>,
}

impl<P: PatternSpec, S: TextValue> MatchesPattern<P, S> {
    /// Compiles the pattern and creates the constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::InvalidPattern`] when the expression
    /// does not compile.
    pub fn new() -> Result<Self, ValidatorError> {
        let regex = Regex::new(P::PATTERN).map_err(|source| ValidatorError::InvalidPattern {
            pattern: P::PATTERN.to_string(),
            source: Box::new(source),
        })?;
        Ok(Self {
            regex,
            _marker: PhantomData,
        })
    }

    /// Returns the constraint kind for this pattern.
    pub fn kind() -> ConstraintKind {
        ConstraintKind::of_with::<Self, _>(Self::new)
    }
}

impl<P: PatternSpec, S: TextValue> TypedConstraint for MatchesPattern<P, S> {
    type Value = S;

    fn validate_typed(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &S,
    ) -> Result<(), ValidatorError> {
        match value.text() {
            None => ctx.add_error(
                ValidationError::new(path.clone(), MSG_CANNOT_BE_NULL)
                    .with_code(codes::CANNOT_BE_NULL),
            ),
            Some(text) if !self.regex.is_match(text) => ctx.add_error(
                ValidationError::new(path.clone(), MSG_PATTERN_MISMATCH)
                    .with_code(codes::PATTERN_MISMATCH)
                    .with_got(text)
                    .with_expected(P::PATTERN),
            ),
            Some(_) => {}
        }
        Ok(())
    }
}
