//! Configuration and precondition failures of the validator itself.

/// Errors that indicate a misconfigured validator, not an invalid value.
///
/// These are raised through `Result` and abort the current call; they are
/// never recorded as [`ValidationError`](crate::ValidationError)s. A
/// caller that hits one has a bug in its constraint or profile setup, so
/// retrying without a code change cannot succeed.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// A constraint was handed a value of a type it does not validate.
    #[error("constraint '{constraint}' validates {expected}, got {actual}")]
    ValueTypeMismatch {
        /// Display name of the constraint.
        constraint: String,
        /// Type the constraint declares.
        expected: String,
        /// Type of the value actually supplied.
        actual: String,
    },

    /// A pair constraint was configured with a sub-constraint that does
    /// not fit the projected key or value type.
    #[error(
        "pair constraint cannot use '{kind}' for its {slot}: it validates {declared}, not {required}"
    )]
    IllegalPairKind {
        /// Display name of the offending sub-constraint kind.
        kind: String,
        /// Which projection the kind was attached to (`key` or `value`).
        slot: &'static str,
        /// Value type the sub-constraint declares.
        declared: String,
        /// Value type the projection requires.
        required: String,
    },

    /// A member rule was attached a constraint kind declared for a
    /// different value type.
    #[error(
        "member '{member}' has type {member_type} but constraint '{constraint}' validates {constraint_type}"
    )]
    MemberKindMismatch {
        /// Name of the member the kind was attached to.
        member: String,
        /// The member's value type.
        member_type: String,
        /// Display name of the constraint kind.
        constraint: String,
        /// Value type the constraint kind declares.
        constraint_type: String,
    },

    /// A pattern constraint was configured with an unparsable expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The expression that failed to compile.
        pattern: String,
        /// The underlying compile error.
        #[source]
        source: Box<regex::Error>,
    },

    /// Attempted to register a profile for a type that already has one.
    #[error("profile for type '{0}' already registered")]
    DuplicateProfile(String),

    /// The root value passed to `validate` has no registered profile.
    #[error("no profile registered for root type '{0}'")]
    UnregisteredRoot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value_type_mismatch() {
        let err = ValidatorError::ValueTypeMismatch {
            constraint: "NonEmptyText".to_string(),
            expected: "alloc::string::String".to_string(),
            actual: "u64".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("NonEmptyText"));
        assert!(text.contains("String"));
        assert!(text.contains("u64"));
    }

    #[test]
    fn test_display_illegal_pair_kind() {
        let err = ValidatorError::IllegalPairKind {
            kind: "Required".to_string(),
            slot: "key",
            declared: "core::option::Option<u32>".to_string(),
            required: "alloc::string::String".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("key"));
        assert!(text.contains("Required"));
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ValidatorError::InvalidPattern {
            pattern: "(".to_string(),
            source: Box::new(source),
        };
        assert!(err.to_string().contains("invalid pattern"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
