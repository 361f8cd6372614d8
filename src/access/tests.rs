use super::*;
use crate::test_support::{admin, student, teacher};

#[test]
fn admin_only_rejects_other_roles() {
    assert!(AccessPolicy::AdminOnly.allows(Role::Admin));
    assert!(!AccessPolicy::AdminOnly.allows(Role::Teacher));
    assert!(!AccessPolicy::AdminOnly.allows(Role::Student));
}

#[test]
fn admin_or_teacher_rejects_students() {
    assert!(AccessPolicy::AdminOrTeacher.allows(Role::Admin));
    assert!(AccessPolicy::AdminOrTeacher.allows(Role::Teacher));
    assert!(!AccessPolicy::AdminOrTeacher.allows(Role::Student));
}

#[test]
fn authenticated_allows_every_role() {
    for role in [Role::Admin, Role::Teacher, Role::Student] {
        assert!(AccessPolicy::Authenticated.allows(role));
    }
}

#[test]
fn require_yields_forbidden() {
    let caller = Identity::of(&student());
    let err = require(&caller, AccessPolicy::AdminOnly).unwrap_err();
    assert!(matches!(err, crate::CoreError::Forbidden(_)));
}

#[tokio::test]
async fn resolver_distinguishes_unknown_credentials() {
    let resolver = StaticTokenResolver::new();
    let user = admin();
    resolver.grant("admin-token", &user).await;

    let identity = resolver.resolve("admin-token").await.unwrap();
    assert_eq!(identity.id, user.id);
    assert_eq!(identity.role, Role::Admin);

    let err = resolver.resolve("bogus").await.unwrap_err();
    assert!(matches!(err, crate::CoreError::Unauthenticated));
}

#[tokio::test]
async fn latest_grant_wins_for_a_token() {
    let resolver = StaticTokenResolver::new();
    resolver.grant("token", &teacher()).await;
    let replacement = teacher();
    resolver.grant("token", &replacement).await;

    let identity = resolver.resolve("token").await.unwrap();
    assert_eq!(identity.id, replacement.id);
}
