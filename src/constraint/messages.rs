//! Error codes and message text shared by the built-in constraints.

/// Machine-readable codes carried by errors of the built-in constraints.
///
/// Match on these instead of message text when handling results
/// programmatically; messages may be reworded, codes are stable.
pub mod codes {
    /// An expected value is absent.
    pub const CANNOT_BE_NULL: &str = "cannot_be_null";
    /// A collection is present but has no items.
    pub const COLLECTION_CANNOT_BE_EMPTY: &str = "collection_cannot_be_empty";
    /// A string is present but has no characters.
    pub const STRING_CANNOT_BE_EMPTY: &str = "string_cannot_be_empty";
    /// A string consists entirely of whitespace.
    pub const STRING_CANNOT_BE_BLANK: &str = "string_cannot_be_blank";
    /// A string does not match the required pattern.
    pub const PATTERN_MISMATCH: &str = "pattern_mismatch";
}

pub(crate) const MSG_CANNOT_BE_NULL: &str = "value cannot be absent";
pub(crate) const MSG_COLLECTION_CANNOT_BE_EMPTY: &str = "collection cannot be empty";
pub(crate) const MSG_STRING_CANNOT_BE_EMPTY: &str = "string cannot be empty";
pub(crate) const MSG_STRING_CANNOT_BE_BLANK: &str = "string cannot be blank";
pub(crate) const MSG_PATTERN_MISMATCH: &str = "value does not match the expected pattern";
