//! Member tables: the statically-registered description of what to
//! validate on each type.
//!
//! A [`TypeProfile`] lists the members of one type in declaration order,
//! each with an accessor, its constraint kinds, optional element
//! constraint kinds and a recursion flag. Profiles are built with
//! [`TypeProfileBuilder`] and registered once in a
//! [`ProfileRegistry`](crate::ProfileRegistry); the engine consults them
//! instead of inspecting types at run time.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::constraint::{short_type_name, ConstraintKind, TypedConstraint};
use crate::error::ValidatorError;
use crate::traverse::Traversable;

type Accessor = Box<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Traversable> + Send + Sync>;

/// A collection type whose elements can carry their own constraints.
///
/// `Item` is the element type one level below the member value; the
/// `Option` impl lets an absent-tolerant member declare element rules
/// that apply when the collection is present.
pub trait ElementContainer: 'static {
    /// The element type.
    type Item: Traversable;
}

impl<T: Traversable> ElementContainer for Vec<T> {
    type Item = T;
}

impl<T: Traversable, const N: usize> ElementContainer for [T; N] {
    type Item = T;
}

impl<C: ElementContainer> ElementContainer for Option<C> {
    type Item = C::Item;
}

/// The validation rules of one member.
///
/// Built fluently and handed to
/// [`TypeProfileBuilder::member`]; the type parameter ties every attached
/// constraint to the member's value type at compile time.
pub struct MemberRules<M: Traversable> {
    kinds: Vec<ConstraintKind>,
    element_kinds: Vec<ConstraintKind>,
    recurse: bool,
    defect: Option<ValidatorError>,
    _marker: PhantomData<fn() -> M>,
}

impl<M: Traversable> MemberRules<M> {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self {
            kinds: Vec::new(),
            element_kinds: Vec::new(),
            recurse: false,
            defect: None,
            _marker: PhantomData,
        }
    }

    /// Attaches a constraint checked against the member type at compile
    /// time.
    pub fn constraint<C>(mut self) -> Self
    where
        C: TypedConstraint<Value = M> + Default + 'static,
    {
        self.kinds.push(ConstraintKind::of::<C>());
        self
    }

    /// Attaches a pre-built constraint kind.
    ///
    /// The kind's declared value type is checked against the member type
    /// here; a mismatch poisons the rule set and surfaces as a
    /// [`ValidatorError::MemberKindMismatch`] when the profile is built.
    pub fn constraint_kind(mut self, kind: ConstraintKind) -> Self {
        if let Some(defect) = Self::check_kind(&kind, TypeId::of::<M>(), short_type_name::<M>()) {
            self.defect.get_or_insert(defect);
        }
        self.kinds.push(kind);
        self
    }

    /// Attaches a constraint to each element of a collection member,
    /// checked against the element type at compile time.
    ///
    /// Element constraints apply exactly one level below the member
    /// value: to the items of the collection, not to anything nested
    /// deeper.
    pub fn each<C>(mut self) -> Self
    where
        M: ElementContainer,
        C: TypedConstraint<Value = M::Item> + Default + 'static,
    {
        self.element_kinds.push(ConstraintKind::of::<C>());
        self
    }

    /// Attaches a pre-built constraint kind to each element of a
    /// collection member.
    pub fn each_kind(mut self, kind: ConstraintKind) -> Self
    where
        M: ElementContainer,
    {
        if let Some(defect) = Self::check_kind(
            &kind,
            TypeId::of::<M::Item>(),
            short_type_name::<M::Item>(),
        ) {
            self.defect.get_or_insert(defect);
        }
        self.element_kinds.push(kind);
        self
    }

    /// Marks the member for recursive validation.
    ///
    /// The engine will descend into the member value and validate any
    /// profiled nodes it reaches, guarded against cycles.
    pub fn recurse(mut self) -> Self {
        self.recurse = true;
        self
    }

    fn check_kind(
        kind: &ConstraintKind,
        expected: TypeId,
        expected_name: String,
    ) -> Option<ValidatorError> {
        match kind.value_type() {
            Some(declared) if declared != expected => Some(ValidatorError::MemberKindMismatch {
                member: String::new(),
                member_type: expected_name,
                constraint: kind.name().to_string(),
                constraint_type: kind
                    .value_type_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "unknown".to_string()),
            }),
            _ => None,
        }
    }
}

impl<M: Traversable> Default for MemberRules<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// One member's entry in a [`TypeProfile`].
pub struct MemberRule {
    accessor: Accessor,
    kinds: Vec<ConstraintKind>,
    element_kinds: Vec<ConstraintKind>,
    recurse: bool,
    value_type_name: String,
}

impl MemberRule {
    /// Number of constraint kinds attached to the member itself.
    pub fn constraint_count(&self) -> usize {
        self.kinds.len()
    }

    /// Number of constraint kinds attached to the member's elements.
    pub fn element_constraint_count(&self) -> usize {
        self.element_kinds.len()
    }

    /// Whether the engine recurses into this member.
    pub fn recurses(&self) -> bool {
        self.recurse
    }

    /// Display name of the member's value type.
    pub fn value_type_name(&self) -> &str {
        &self.value_type_name
    }

    pub(crate) fn access<'a>(&self, node: &'a dyn Any) -> Option<&'a dyn Traversable> {
        (self.accessor)(node)
    }

    pub(crate) fn kinds(&self) -> &[ConstraintKind] {
        &self.kinds
    }

    pub(crate) fn element_kinds(&self) -> &[ConstraintKind] {
        &self.element_kinds
    }
}

/// The registered member table of one validated type.
///
/// # Example
///
/// ```rust
/// use scrutiny::{
///     traversable_nodes, MemberRules, NonEmptyCollection, NonEmptyText, TypeProfile,
/// };
///
/// struct Recipe {
///     name: Option<String>,
///     steps: Option<Vec<String>>,
/// }
/// traversable_nodes!(Recipe);
///
/// let profile = TypeProfile::builder::<Recipe>()
///     .member("name", |r: &Recipe| &r.name, MemberRules::new()
///         .constraint::<NonEmptyText<Option<String>>>())
///     .member("steps", |r: &Recipe| &r.steps, MemberRules::new()
///         .constraint::<NonEmptyCollection<Option<Vec<String>>>>()
///         .each::<NonEmptyText<String>>())
///     .build()?;
///
/// assert_eq!(profile.member_names(), vec!["name", "steps"]);
/// # Ok::<(), scrutiny::ValidatorError>(())
/// ```
pub struct TypeProfile {
    type_id: TypeId,
    type_name: String,
    members: IndexMap<String, MemberRule>,
}

impl TypeProfile {
    /// Starts building a profile for `T`.
    pub fn builder<T: Traversable>() -> TypeProfileBuilder<T> {
        TypeProfileBuilder {
            members: IndexMap::new(),
            defect: None,
            _marker: PhantomData,
        }
    }

    /// The profiled type's id.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Display name of the profiled type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Number of members in the table.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Member names in declaration order.
    pub fn member_names(&self) -> Vec<&str> {
        self.members.keys().map(String::as_str).collect()
    }

    /// Looks up one member's rule.
    pub fn member(&self, name: &str) -> Option<&MemberRule> {
        self.members.get(name)
    }

    pub(crate) fn rules(&self) -> impl Iterator<Item = (&str, &MemberRule)> {
        self.members.iter().map(|(name, rule)| (name.as_str(), rule))
    }
}

impl fmt::Debug for TypeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeProfile")
            .field("type", &self.type_name)
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Fluent builder for a [`TypeProfile`].
///
/// Members are recorded in call order, which becomes the engine's visit
/// order. Re-declaring a member name replaces the earlier rule but keeps
/// its original position, matching the underlying ordered map.
pub struct TypeProfileBuilder<T: Traversable> {
    members: IndexMap<String, MemberRule>,
    defect: Option<ValidatorError>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Traversable> TypeProfileBuilder<T> {
    /// Declares a member with its accessor and rules.
    ///
    /// The accessor ties the member's value type `M` to the rules at
    /// compile time; attaching a statically-typed constraint for a
    /// different type does not compile.
    pub fn member<M, F>(mut self, name: impl Into<String>, accessor: F, rules: MemberRules<M>) -> Self
    where
        M: Traversable,
        F: for<'a> Fn(&'a T) -> &'a M + Send + Sync + 'static,
    {
        let name = name.into();

        if let Some(defect) = rules.defect {
            self.defect.get_or_insert(Self::name_defect(defect, &name));
        }

        let erased: Accessor = Box::new(move |any: &dyn Any| {
            any.downcast_ref::<T>()
                .map(|typed| accessor(typed) as &dyn Traversable)
        });

        self.members.insert(
            name,
            MemberRule {
                accessor: erased,
                kinds: rules.kinds,
                element_kinds: rules.element_kinds,
                recurse: rules.recurse,
                value_type_name: short_type_name::<M>(),
            },
        );
        self
    }

    /// Finishes the profile.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidatorError`] recorded while attaching
    /// dynamically-checked constraint kinds.
    pub fn build(self) -> Result<TypeProfile, ValidatorError> {
        if let Some(defect) = self.defect {
            return Err(defect);
        }

        Ok(TypeProfile {
            type_id: TypeId::of::<T>(),
            type_name: short_type_name::<T>(),
            members: self.members,
        })
    }

    fn name_defect(defect: ValidatorError, member_name: &str) -> ValidatorError {
        match defect {
            ValidatorError::MemberKindMismatch {
                member_type,
                constraint,
                constraint_type,
                ..
            } => ValidatorError::MemberKindMismatch {
                member: member_name.to_string(),
                member_type,
                constraint,
                constraint_type,
            },
            other => other,
        }
    }
}
