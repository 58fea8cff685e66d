//! The traversal engine that drives a validation run.

use rayon::prelude::*;

use crate::constraint::ConstraintKind;
use crate::context::ObjectValidatorContext;
use crate::error::{ValidationErrors, ValidatorError};
use crate::identity::NodeIdentity;
use crate::path::MemberPath;
use crate::profile::TypeProfile;
use crate::registry::ProfileRegistry;
use crate::traverse::{Descent, Traversable};

/// Validates object graphs against the profiles of a registry.
///
/// The engine walks depth-first from the root: at every node whose type
/// has a registered profile it visits the members in declaration order,
/// applies each member's constraint kinds, applies element kinds one
/// level below collection members, and recurses where the rule says so.
/// Values whose types carry no profile are unwrapped structurally
/// (options, collections, smart pointers) and are otherwise terminal.
///
/// Two guarantees follow from that shape: traversal terminates on any
/// finite graph, cycles included, because a node already on the
/// recursion stack is skipped; and a fixed graph always produces the
/// same errors in the same order, because visit order is declaration
/// order and nothing about traversal depends on hashing.
///
/// # Example
///
/// ```rust
/// use scrutiny::{
///     traversable_nodes, MemberRules, NonEmptyCollection, NonEmptyText, ObjectValidator,
///     ProfileRegistry, TypeProfile,
/// };
///
/// struct Person {
///     name: Option<String>,
///     tags: Option<Vec<String>>,
/// }
/// traversable_nodes!(Person);
///
/// let registry = ProfileRegistry::new();
/// registry.register(
///     TypeProfile::builder::<Person>()
///         .member("name", |p: &Person| &p.name, MemberRules::new()
///             .constraint::<NonEmptyText<Option<String>>>())
///         .member("tags", |p: &Person| &p.tags, MemberRules::new()
///             .constraint::<NonEmptyCollection<Option<Vec<String>>>>())
///         .build()?,
/// )?;
///
/// let validator = ObjectValidator::new(registry);
/// let person = Person {
///     name: Some("Ada".into()),
///     tags: Some(vec![]),
/// };
///
/// let errors = validator.validate(&person)?;
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.first().unwrap().path.to_string(), "tags");
/// assert_eq!(errors.first().unwrap().code, "collection_cannot_be_empty");
/// # Ok::<(), scrutiny::ValidatorError>(())
/// ```
pub struct ObjectValidator {
    registry: ProfileRegistry,
}

impl ObjectValidator {
    /// Creates a validator over the given registry.
    pub fn new(registry: ProfileRegistry) -> Self {
        Self { registry }
    }

    /// The registry this validator consults.
    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Validates `root` with a fresh context and returns the findings.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::UnregisteredRoot`] when `root`'s type
    /// has no profile, and propagates any configuration error hit while
    /// resolving or applying constraints. Validation findings are never
    /// an `Err`; an empty collection means the graph is valid.
    pub fn validate<T: Traversable>(&self, root: &T) -> Result<ValidationErrors, ValidatorError> {
        let ctx = ObjectValidatorContext::new();
        self.validate_with_context(root, &ctx)?;
        Ok(ctx.take_errors())
    }

    /// Validates `root` into a caller-supplied context.
    ///
    /// Findings accumulate in `ctx` after whatever it already holds, and
    /// constraint instances cached from earlier runs are reused.
    pub fn validate_with_context<T: Traversable>(
        &self,
        root: &T,
        ctx: &ObjectValidatorContext,
    ) -> Result<(), ValidatorError> {
        if self.registry.get(root.as_any().type_id()).is_none() {
            return Err(ValidatorError::UnregisteredRoot(
                crate::constraint::shorten_type_name(root.type_name()),
            ));
        }
        self.walk(ctx, &MemberPath::root(), root)
    }

    /// Validates a slice of roots in parallel, one fresh context each.
    ///
    /// Every item's findings are prefixed with its `[index]` and the
    /// collections are merged in input order, so the result is the same
    /// as sequential validation of each item.
    pub fn validate_batch<T: Traversable + Sync>(
        &self,
        items: &[T],
    ) -> Result<ValidationErrors, ValidatorError> {
        tracing::debug!(items = items.len(), "batch validation started");

        let per_item: Result<Vec<ValidationErrors>, ValidatorError> = items
            .par_iter()
            .enumerate()
            .map(|(index, item)| {
                let errors = self.validate(item)?;
                let prefix = MemberPath::from_index(index);
                Ok(errors.iter().map(|e| e.prefixed(&prefix)).collect())
            })
            .collect();

        let mut merged = ValidationErrors::new();
        for errors in per_item? {
            merged.extend(errors);
        }
        Ok(merged)
    }

    /// Routes a value to profile-driven or structural traversal.
    fn walk(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &dyn Traversable,
    ) -> Result<(), ValidatorError> {
        match self.registry.get(value.as_any().type_id()) {
            Some(profile) => self.walk_node(ctx, path, value, &profile),
            None => self.walk_structure(ctx, path, value),
        }
    }

    /// Validates one profiled node: guard, then members in order.
    fn walk_node(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        node: &dyn Traversable,
        profile: &TypeProfile,
    ) -> Result<(), ValidatorError> {
        let identity = NodeIdentity::of(node.as_any());
        let _scope = match ctx.recursion().enter(identity) {
            Some(scope) => scope,
            None => {
                // Already on the active stack: a cycle closed here.
                tracing::debug!(
                    path = %path,
                    r#type = profile.type_name(),
                    "cycle detected, skipping node"
                );
                return Ok(());
            }
        };

        for (name, rule) in profile.rules() {
            let member_path = path.push_field(name);
            let member_value = match rule.access(node.as_any()) {
                Some(value) => value,
                None => continue,
            };

            for kind in rule.kinds() {
                let constraint = ctx.resolve(kind)?;
                constraint.validate(ctx, &member_path, member_value)?;
            }

            if !rule.element_kinds().is_empty() {
                self.validate_elements(ctx, &member_path, member_value, rule.element_kinds())?;
            }

            if rule.recurses() {
                self.walk(ctx, &member_path, member_value)?;
            }
        }

        Ok(())
    }

    /// Applies element kinds to the items one level below `value`.
    fn validate_elements(
        &self,
        ctx: &ObjectValidatorContext,
        member_path: &MemberPath,
        value: &dyn Traversable,
        kinds: &[ConstraintKind],
    ) -> Result<(), ValidatorError> {
        match value.descend() {
            // Unwrap Option and pointer layers; an absent collection has
            // no elements to check.
            Descent::Node(inner) => self.validate_elements(ctx, member_path, inner, kinds),
            Descent::Items(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = member_path.push_index(index);
                    for kind in kinds {
                        let constraint = ctx.resolve(kind)?;
                        constraint.validate(ctx, &item_path, *item)?;
                    }
                }
                Ok(())
            }
            Descent::Terminal | Descent::Pair { .. } | Descent::Pairs(_) => Ok(()),
        }
    }

    /// Walks into an unprofiled value by structure alone.
    fn walk_structure(
        &self,
        ctx: &ObjectValidatorContext,
        path: &MemberPath,
        value: &dyn Traversable,
    ) -> Result<(), ValidatorError> {
        match value.descend() {
            Descent::Terminal => Ok(()),
            Descent::Node(inner) => self.walk(ctx, path, inner),
            Descent::Items(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.walk(ctx, &path.push_index(index), *item)?;
                }
                Ok(())
            }
            Descent::Pair { key, value } => {
                self.walk(ctx, &path.push_key_projection(), key)?;
                self.walk(ctx, &path.push_value_projection(), value)
            }
            Descent::Pairs(entries) => {
                for (index, (key, value)) in entries.iter().enumerate() {
                    let entry_path = path.push_index(index);
                    self.walk(ctx, &entry_path.push_key_projection(), *key)?;
                    self.walk(ctx, &entry_path.push_value_projection(), *value)?;
                }
                Ok(())
            }
        }
    }
}
