//! # Scrutiny
//!
//! An object-graph validation engine that accumulates ALL validation
//! errors while walking a graph of native values, with guaranteed
//! termination on cyclic and shared references.
//!
//! ## Overview
//!
//! Scrutiny validates plain Rust object graphs against per-type member
//! tables ([`TypeProfile`]s). A run walks the graph depth-first from the
//! root, applies every member's constraints, and collects structured
//! [`ValidationError`]s with full member paths instead of stopping at
//! the first failure. A recursion guard keyed on object identity makes
//! cyclic graphs safe: a node already being validated on the active
//! stack is skipped, while a node shared between independent paths is
//! validated once per path.
//!
//! ## Core Types
//!
//! - [`MemberPath`]: The route from a root to a member (e.g., `users[0].email`)
//! - [`Constraint`] / [`TypedConstraint`]: The unit of validation logic
//! - [`TypeProfile`] / [`ProfileRegistry`]: Member tables and their registry
//! - [`ObjectValidator`]: The traversal engine
//! - [`ValidationErrors`]: The ordered findings of a run
//!
//! ## Example
//!
//! ```rust
//! use scrutiny::{
//!     traversable_nodes, MemberRules, NonEmptyCollection, NonEmptyText, ObjectValidator,
//!     ProfileRegistry, TypeProfile,
//! };
//!
//! struct Person {
//!     name: Option<String>,
//!     tags: Option<Vec<String>>,
//! }
//! traversable_nodes!(Person);
//!
//! let registry = ProfileRegistry::new();
//! registry.register(
//!     TypeProfile::builder::<Person>()
//!         .member("name", |p: &Person| &p.name, MemberRules::new()
//!             .constraint::<NonEmptyText<Option<String>>>())
//!         .member("tags", |p: &Person| &p.tags, MemberRules::new()
//!             .constraint::<NonEmptyCollection<Option<Vec<String>>>>())
//!         .build()?,
//! )?;
//!
//! let validator = ObjectValidator::new(registry);
//!
//! let person = Person { name: None, tags: Some(vec![]) };
//! let errors = validator.validate(&person)?;
//!
//! // Both findings are reported, in member declaration order.
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors.first().unwrap().path.to_string(), "name");
//! assert_eq!(errors.iter().nth(1).unwrap().path.to_string(), "tags");
//! # Ok::<(), scrutiny::ValidatorError>(())
//! ```

pub mod constraint;
pub mod context;
pub mod error;
pub mod identity;
pub mod path;
pub mod profile;
pub mod recursion;
pub mod registry;
pub mod traverse;
pub mod validator;

pub use constraint::messages::codes;
pub use constraint::{
    Constraint, ConstraintKind, Countable, KeyValueConstraint, KindId, MatchesPattern,
    NonBlankText, NonEmptyCollection, NonEmptyText, PatternSpec, Required, TextValue,
    TypedConstraint,
};
pub use context::ObjectValidatorContext;
pub use error::{ValidationError, ValidationErrors, ValidatorError};
pub use identity::NodeIdentity;
pub use path::{MemberPath, PathSegment};
pub use profile::{ElementContainer, MemberRule, MemberRules, TypeProfile, TypeProfileBuilder};
pub use recursion::{RecursionGuard, RecursionScope};
pub use registry::ProfileRegistry;
pub use traverse::{Descent, Traversable};
pub use validator::ObjectValidator;

/// Type alias bridging a run's findings into applicative composition.
pub type ValidationOutcome = stillwater::Validation<(), ValidationErrors>;
