//! The value currency of the engine: type-erased, walkable references.
//!
//! Every value the engine touches is a `&dyn Traversable`: it can be
//! recovered as `&dyn Any` for typed constraints, and it can describe its
//! own structure as a [`Descent`] so the engine knows how to keep walking.
//! Containers unwrap to their contents; scalars and user structs are
//! terminal (struct members are discovered through registered profiles,
//! not through descent, so a cycle can only close at a profiled node
//! where the recursion guard is watching).

use std::any::Any;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

/// How the engine may walk into a value.
pub enum Descent<'a> {
    /// No internal structure; the walk stops here.
    Terminal,
    /// A single wrapped value (`Some`, a smart pointer, a reference).
    Node(&'a dyn Traversable),
    /// An ordered sequence of items, reported with `[i]` path segments.
    Items(Vec<&'a dyn Traversable>),
    /// One key/value pair, reported with `Key` / `Value` path segments.
    Pair {
        /// The key half of the pair.
        key: &'a dyn Traversable,
        /// The value half of the pair.
        value: &'a dyn Traversable,
    },
    /// An ordered sequence of key/value pairs (`[i].Key`, `[i].Value`).
    Pairs(Vec<(&'a dyn Traversable, &'a dyn Traversable)>),
}

/// A value that can flow through the validation engine.
///
/// Implementations exist for the primitive scalars, `String`, `Option`,
/// `Vec`, arrays, tuples, `BTreeMap`, the owning smart pointers and
/// `&'static` references. User types opt in with the
/// [`traversable_nodes!`](crate::traversable_nodes) and
/// [`traversable_leaves!`](crate::traversable_leaves) macros.
///
/// `HashMap` is deliberately unsupported: its iteration order varies
/// between runs, which would break the guarantee that a fixed object
/// graph always yields the same errors in the same order.
pub trait Traversable: Any {
    /// Recovers the value for typed constraint dispatch.
    ///
    /// Identity and registry lookups must go through this method too:
    /// a smart pointer answers for its pointee, so `as_any().type_id()`
    /// is the pointee's type where plain `type_id()` would name the
    /// pointer.
    fn as_any(&self) -> &dyn Any;

    /// Name of the type `as_any` exposes, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Describes how to walk into this value.
    fn descend(&self) -> Descent<'_>;
}

/// Implements [`Traversable`] for terminal value types.
///
/// Use this for scalar-like user types the engine should treat as
/// leaves: identifiers, amounts, enums without validatable members.
///
/// ```rust
/// use scrutiny::traversable_leaves;
///
/// struct CustomerId(u64);
/// traversable_leaves!(CustomerId);
/// ```
#[macro_export]
macro_rules! traversable_leaves {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Traversable for $ty {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn type_name(&self) -> &'static str {
                    ::std::any::type_name::<$ty>()
                }

                fn descend(&self) -> $crate::Descent<'_> {
                    $crate::Descent::Terminal
                }
            }
        )+
    };
}

/// Implements [`Traversable`] for user struct types that carry profiles.
///
/// A struct's members are walked through its registered
/// [`TypeProfile`](crate::TypeProfile), never through structural descent,
/// so the expansion is the terminal impl; the distinct name records the
/// intent at the use site.
///
/// ```rust
/// use scrutiny::traversable_nodes;
///
/// struct Customer {
///     name: Option<String>,
/// }
/// traversable_nodes!(Customer);
/// ```
#[macro_export]
macro_rules! traversable_nodes {
    ($($ty:ty),+ $(,)?) => {
        $crate::traversable_leaves!($($ty),+);
    };
}

traversable_leaves!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String
);

impl<T: Traversable> Traversable for Option<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn descend(&self) -> Descent<'_> {
        match self {
            Some(inner) => Descent::Node(inner),
            None => Descent::Terminal,
        }
    }
}

impl<T: Traversable> Traversable for Vec<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn descend(&self) -> Descent<'_> {
        Descent::Items(self.iter().map(|item| item as &dyn Traversable).collect())
    }
}

impl<T: Traversable, const N: usize> Traversable for [T; N] {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn descend(&self) -> Descent<'_> {
        Descent::Items(self.iter().map(|item| item as &dyn Traversable).collect())
    }
}

impl<K: Traversable, V: Traversable> Traversable for (K, V) {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn descend(&self) -> Descent<'_> {
        Descent::Pair {
            key: &self.0,
            value: &self.1,
        }
    }
}

impl<K: Traversable, V: Traversable> Traversable for BTreeMap<K, V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn descend(&self) -> Descent<'_> {
        Descent::Pairs(
            self.iter()
                .map(|(k, v)| (k as &dyn Traversable, v as &dyn Traversable))
                .collect(),
        )
    }
}

// The owning pointers and `&'static` references answer for their
// pointee: identity, type and structure all come from the target, so
// two clones of one `Rc` are recognized as the same node.

impl<T: Traversable> Traversable for Box<T> {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn descend(&self) -> Descent<'_> {
        (**self).descend()
    }
}

impl<T: Traversable> Traversable for Rc<T> {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn descend(&self) -> Descent<'_> {
        (**self).descend()
    }
}

impl<T: Traversable> Traversable for Arc<T> {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn descend(&self) -> Descent<'_> {
        (**self).descend()
    }
}

impl<T: Traversable> Traversable for &'static T {
    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn descend(&self) -> Descent<'_> {
        (**self).descend()
    }
}

// `str` is unsized, so the blanket reference impl above cannot cover
// string slices; they are leaves in their own right.
impl Traversable for &'static str {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn descend(&self) -> Descent<'_> {
        Descent::Terminal
    }
}
