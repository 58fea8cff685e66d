//! Paths that locate a member within a validated object graph.
//!
//! Every finding the engine reports is attributed to a [`MemberPath`]:
//! the chain of member names, collection positions and pair projections
//! between the validation root and the offending value. Paths are built
//! by the traversal as it descends and ride along on
//! [`ValidationError`](crate::ValidationError)s; they are reporting data
//! only and say nothing about object identity.

use std::fmt::{self, Display};

/// One step of a [`MemberPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Access of a named member, as declared in a type profile.
    Field(String),
    /// Position of an element within a collection member.
    Index(usize),
    /// The key half of a key/value pair.
    Key,
    /// The value half of a key/value pair.
    Value,
}

impl PathSegment {
    /// Whether this segment projects onto a half of a key/value pair.
    ///
    /// A projection renders like a member named `Key` or `Value` but
    /// compares as its own segment, so a genuine member that happens to
    /// be called `Key` stays distinguishable.
    pub fn is_pair_projection(&self) -> bool {
        matches!(self, PathSegment::Key | PathSegment::Value)
    }

    /// Index segments attach with brackets; everything else joins with a
    /// dot unless it opens the path.
    fn joins_with_dot(&self) -> bool {
        !matches!(self, PathSegment::Index(_))
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
            PathSegment::Key => f.write_str("Key"),
            PathSegment::Value => f.write_str("Value"),
        }
    }
}

/// The route from a validation root down to one member value.
///
/// Rendered the way errors report it: member names joined with dots,
/// collection positions in brackets, pair halves as `Key`/`Value`
/// projections. `orders[2].lines[0].Key` reads as "the key of the first
/// line of the third order".
///
/// Paths are immutable; every `push_*` returns an extended copy and
/// leaves the receiver untouched, so a traversal can fan out from a
/// shared prefix.
///
/// # Example
///
/// ```rust
/// use scrutiny::MemberPath;
///
/// let line = MemberPath::root()
///     .push_field("orders")
///     .push_index(2)
///     .push_field("lines")
///     .push_index(0);
///
/// assert_eq!(line.push_key_projection().to_string(), "orders[2].lines[0].Key");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MemberPath {
    segments: Vec<PathSegment>,
}

impl MemberPath {
    /// The empty path of the validation root.
    pub fn root() -> Self {
        Self::default()
    }

    /// A one-segment path naming a root-level member.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self::root().push_field(name)
    }

    /// A one-segment path of a position, as used for batch items.
    pub fn from_index(idx: usize) -> Self {
        Self::root().push_index(idx)
    }

    /// Extends the path by a named member.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.extended(PathSegment::Field(name.into()))
    }

    /// Extends the path by a collection position.
    pub fn push_index(&self, index: usize) -> Self {
        self.extended(PathSegment::Index(index))
    }

    /// Extends the path onto the key half of a pair.
    pub fn push_key_projection(&self) -> Self {
        self.extended(PathSegment::Key)
    }

    /// Extends the path onto the value half of a pair.
    pub fn push_value_projection(&self) -> Self {
        self.extended(PathSegment::Value)
    }

    /// Concatenates `suffix` onto this path.
    ///
    /// Used when findings recorded against a relative path are re-rooted,
    /// as batch validation does with its `[index]` prefixes.
    pub fn join(&self, suffix: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(suffix.segments.iter().cloned());
        Self { segments }
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments in root-to-member order.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The path one segment up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.segments.split_last().map(|(_, rest)| Self {
            segments: rest.to_vec(),
        })
    }

    /// The segment closest to the value, or `None` at the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    fn extended(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }
}

impl Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && segment.joins_with_dot() {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mixes_fields_indices_and_projections() {
        let path = MemberPath::root()
            .push_field("orders")
            .push_index(2)
            .push_field("lines")
            .push_index(0)
            .push_key_projection();
        assert_eq!(path.to_string(), "orders[2].lines[0].Key");
    }

    #[test]
    fn test_projections_render_like_members() {
        let entry = MemberPath::from_field("headers").push_index(3);
        assert_eq!(entry.push_key_projection().to_string(), "headers[3].Key");
        assert_eq!(entry.push_value_projection().to_string(), "headers[3].Value");
    }

    #[test]
    fn test_projection_differs_from_a_field_spelled_key() {
        let projected = MemberPath::from_field("header").push_key_projection();
        let named = MemberPath::from_field("header").push_field("Key");

        assert_eq!(projected.to_string(), named.to_string());
        assert_ne!(projected, named);
    }

    #[test]
    fn test_root_is_empty_and_displays_nothing() {
        let root = MemberPath::root();
        assert!(root.is_root());
        assert!(root.is_empty());
        assert_eq!(root.len(), 0);
        assert_eq!(root.to_string(), "");
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_pushes_leave_the_receiver_untouched() {
        let rooms = MemberPath::from_field("rooms");
        let first = rooms.push_index(0);
        let second = rooms.push_index(1);

        assert_eq!(rooms.to_string(), "rooms");
        assert_eq!(first.to_string(), "rooms[0]");
        assert_eq!(second.to_string(), "rooms[1]");
    }

    #[test]
    fn test_parent_drops_the_nearest_segment() {
        let value = MemberPath::from_field("params")
            .push_index(1)
            .push_value_projection();

        let entry = value.parent().unwrap();
        assert_eq!(entry.to_string(), "params[1]");
        assert_eq!(entry.parent().unwrap().to_string(), "params");
    }

    #[test]
    fn test_last_reports_the_projection() {
        let path = MemberPath::from_field("header").push_key_projection();
        assert_eq!(path.last(), Some(&PathSegment::Key));
        assert!(path.last().unwrap().is_pair_projection());
        assert!(!PathSegment::Field(String::from("Key")).is_pair_projection());
    }

    #[test]
    fn test_join_concatenates_segment_lists() {
        let prefix = MemberPath::from_index(4);
        let relative = MemberPath::from_field("tags").push_index(2);

        assert_eq!(prefix.join(&relative).to_string(), "[4].tags[2]");
        assert_eq!(MemberPath::root().join(&relative), relative);
    }

    #[test]
    fn test_indices_chain_without_dots() {
        let cell = MemberPath::from_field("grid").push_index(0).push_index(3);
        assert_eq!(cell.to_string(), "grid[0][3]");
    }
}
