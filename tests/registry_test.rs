//! Tests for profile registry operations.

use scrutiny::{
    traversable_nodes, MemberRules, NonEmptyText, ObjectValidator, ProfileRegistry, Required,
    TypeProfile, ValidatorError,
};

struct User {
    name: Option<String>,
    email: Option<String>,
}
traversable_nodes!(User);

struct Order {
    reference: Option<String>,
}
traversable_nodes!(Order);

fn user_profile() -> TypeProfile {
    TypeProfile::builder::<User>()
        .member(
            "name",
            |u: &User| &u.name,
            MemberRules::new().constraint::<NonEmptyText<Option<String>>>(),
        )
        .member(
            "email",
            |u: &User| &u.email,
            MemberRules::new().constraint::<Required<String>>(),
        )
        .build()
        .unwrap()
}

fn order_profile() -> TypeProfile {
    TypeProfile::builder::<Order>()
        .member(
            "reference",
            |o: &Order| &o.reference,
            MemberRules::new().constraint::<NonEmptyText<Option<String>>>(),
        )
        .build()
        .unwrap()
}

#[test]
fn test_register_and_get() {
    let registry = ProfileRegistry::new();

    registry.register(user_profile()).unwrap();

    assert!(registry.get_of::<User>().is_some());
    assert!(registry.contains::<User>());

    assert!(registry.get_of::<Order>().is_none());
    assert!(!registry.contains::<Order>());
}

#[test]
fn test_duplicate_registration_fails() {
    let registry = ProfileRegistry::new();

    registry.register(user_profile()).unwrap();

    match registry.register(user_profile()) {
        Err(ValidatorError::DuplicateProfile(name)) => assert_eq!(name, "User"),
        _ => panic!("expected a duplicate profile error"),
    }

    // The original registration is untouched.
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_validate_with_registry() {
    let registry = ProfileRegistry::new();
    registry.register(user_profile()).unwrap();

    let validator = ObjectValidator::new(registry);
    let user = User {
        name: Some(String::from("Alice")),
        email: Some(String::from("alice@example.com")),
    };

    let errors = validator.validate(&user).unwrap();
    assert!(errors.is_empty());
}

#[test]
fn test_validate_unregistered_type() {
    let registry = ProfileRegistry::new();
    registry.register(user_profile()).unwrap();

    let validator = ObjectValidator::new(registry);
    let order = Order {
        reference: Some(String::from("ord-1")),
    };

    match validator.validate(&order) {
        Err(ValidatorError::UnregisteredRoot(name)) => assert_eq!(name, "Order"),
        _ => panic!("expected an unregistered root error"),
    }
}

#[test]
fn test_registration_order_preserved() {
    let registry = ProfileRegistry::new();

    registry.register(user_profile()).unwrap();
    registry.register(order_profile()).unwrap();

    assert_eq!(registry.type_names(), vec!["User", "Order"]);
    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());
}

#[test]
fn test_profile_introspection_through_registry() {
    let registry = ProfileRegistry::new();
    registry.register(user_profile()).unwrap();

    let profile = registry.get_of::<User>().unwrap();
    assert_eq!(profile.type_name(), "User");
    assert_eq!(profile.member_names(), vec!["name", "email"]);
    assert_eq!(profile.member("email").unwrap().constraint_count(), 1);
}

#[test]
fn test_registry_clone_shares_profiles() {
    let registry = ProfileRegistry::new();

    registry.register(user_profile()).unwrap();

    let cloned = registry.clone();

    // Both handles see the same profile table
    assert!(registry.contains::<User>());
    assert!(cloned.contains::<User>());

    cloned.register(order_profile()).unwrap();
    assert!(registry.contains::<Order>());
}

#[test]
fn test_default_registry() {
    let registry = ProfileRegistry::default();

    registry.register(user_profile()).unwrap();

    assert!(registry.get_of::<User>().is_some());
}
