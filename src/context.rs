//! Per-run state shared by the engine and every constraint it applies.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::constraint::{Constraint, ConstraintKind, KindId};
use crate::error::{ValidationError, ValidationErrors, ValidatorError};
use crate::recursion::RecursionGuard;

/// State owned by one validation run.
///
/// The context carries three things: the cache of constraint instances
/// (one singleton per [`ConstraintKind`]), the recursion guard that keeps
/// cyclic graphs from looping, and the error collection that constraints
/// append to. The engine creates a fresh context per
/// [`validate`](crate::ObjectValidator::validate) call; callers that want
/// constraint reuse or error accumulation across several calls create one
/// themselves and pass it to
/// [`validate_with_context`](crate::ObjectValidator::validate_with_context).
///
/// All interior state is lock-guarded, so a context may be shared across
/// threads; the cheaper pattern for parallel work is still one context
/// per task, merging the error collections afterwards.
///
/// # Example
///
/// ```rust
/// use scrutiny::{ConstraintKind, ObjectValidatorContext, Required};
/// use std::sync::Arc;
///
/// let ctx = ObjectValidatorContext::new();
/// let kind = ConstraintKind::of::<Required<String>>();
///
/// let first = ctx.resolve(&kind)?;
/// let second = ctx.resolve(&kind)?;
/// assert!(Arc::ptr_eq(&first, &second));
/// # Ok::<(), scrutiny::ValidatorError>(())
/// ```
#[derive(Default)]
pub struct ObjectValidatorContext {
    cache: Mutex<HashMap<KindId, Arc<dyn Constraint>>>,
    recursion: RecursionGuard,
    errors: Mutex<ValidationErrors>,
}

impl ObjectValidatorContext {
    /// Creates a context with an empty cache and no errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `kind` to its singleton constraint instance.
    ///
    /// The first resolution of a kind constructs the instance; later ones
    /// return the same `Arc`. Lookup and construction happen inside one
    /// critical section, so two threads racing on a fresh kind still
    /// observe a single instance.
    ///
    /// # Errors
    ///
    /// Propagates the factory's [`ValidatorError`] when the kind is
    /// misconfigured; nothing is cached in that case.
    pub fn resolve(&self, kind: &ConstraintKind) -> Result<Arc<dyn Constraint>, ValidatorError> {
        let mut cache = self.cache.lock();
        if let Some(instance) = cache.get(kind.id()) {
            return Ok(Arc::clone(instance));
        }

        let instance = kind.create().map_err(|err| {
            tracing::warn!(kind = kind.name(), error = %err, "constraint construction failed");
            err
        })?;
        tracing::debug!(kind = kind.name(), "constraint instance created");
        cache.insert(kind.id().clone(), Arc::clone(&instance));
        Ok(instance)
    }

    /// Records a validation error.
    ///
    /// Constraints call this for every finding; the engine never filters
    /// or reorders what was recorded.
    pub fn add_error(&self, error: ValidationError) {
        self.errors.lock().push(error);
    }

    /// Returns the number of errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.errors.lock().len()
    }

    /// Returns a snapshot of the errors recorded so far.
    pub fn errors(&self) -> ValidationErrors {
        self.errors.lock().clone()
    }

    /// Removes and returns all recorded errors, leaving the context clean.
    pub fn take_errors(&self) -> ValidationErrors {
        std::mem::take(&mut *self.errors.lock())
    }

    /// Returns the number of constraint instances currently cached.
    pub fn cached_constraints(&self) -> usize {
        self.cache.lock().len()
    }

    /// The recursion guard for this run.
    pub(crate) fn recursion(&self) -> &RecursionGuard {
        &self.recursion
    }
}

// A context is deliberately shareable: every field is lock-guarded and
// constraint instances are Send + Sync by contract.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ObjectValidatorContext>();
    assert_sync::<ObjectValidatorContext>();
};
