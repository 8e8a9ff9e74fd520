use super::*;
use crate::{
    error::ErrorKind,
    test_fixtures::{POSTING, active, owner},
};

const ENTITY: &str = "test::Posting";

fn employer(seq: u128) -> ScopeContext {
    ScopeContext::authenticated(Principal::new(owner(seq), Role::Employer))
}

#[test]
fn owner_scope_binds_the_principal_id() {
    let constraint = ScopeGuard::owner("ownerId", Role::Employer)
        .constraint(&employer(7), ENTITY)
        .unwrap();

    assert_eq!(constraint.kind(), ScopeKind::Owner);
    assert_eq!(
        constraint.predicate(),
        &Predicate::eq("ownerId", Value::Ulid(owner(7)))
    );
}

#[test]
fn owner_scope_requires_identity() {
    let err = ScopeGuard::owner("ownerId", Role::Employer)
        .constraint(&ScopeContext::anonymous(), ENTITY)
        .unwrap_err();

    assert_eq!(err, AuthorizationError::MissingIdentity { entity: ENTITY });
    assert_eq!(err.kind(), ErrorKind::MissingIdentity);
}

#[test]
fn owner_scope_requires_the_declared_role() {
    let candidate = ScopeContext::authenticated(Principal::new(owner(1), Role::Candidate));
    let admin = ScopeContext::authenticated(Principal::new(owner(1), Role::Admin));
    let guard = ScopeGuard::owner("ownerId", Role::Employer);

    let err = guard.constraint(&candidate, ENTITY).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert!(err.to_string().contains("CANDIDATE"));

    assert_eq!(
        guard.constraint(&admin, ENTITY).unwrap_err().kind(),
        ErrorKind::Forbidden
    );
}

#[test]
fn owner_scope_without_role_accepts_any_principal() {
    let guard = ScopeGuard::Owner {
        field: "ownerId",
        role: None,
    };
    let ctx = ScopeContext::authenticated(Principal::new(owner(3), Role::Candidate));

    assert!(guard.constraint(&ctx, ENTITY).is_ok());
}

#[test]
fn visibility_scope_is_open_to_anonymous_callers() {
    let guard = ScopeGuard::visibility("status", vec![Value::Enum("ACTIVE".into())]);
    let constraint = guard.constraint(&ScopeContext::anonymous(), ENTITY).unwrap();

    assert_eq!(constraint.kind(), ScopeKind::Visibility);
    assert_eq!(guard.field(), "status");
    assert_eq!(
        constraint.predicate(),
        &Predicate::in_("status", vec![Value::Enum("ACTIVE".into())])
    );
}

#[test]
fn guards_are_checked_against_the_model() {
    assert!(ScopeGuard::owner("ownerId", Role::Employer).check(&POSTING).is_ok());
    assert!(ScopeGuard::visibility("status", vec![active()]).check(&POSTING).is_ok());

    let missing = ScopeGuard::owner("employerId", Role::Employer)
        .check(&POSTING)
        .unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::InvalidScope);
    assert!(missing.to_string().contains("employerId"));

    let not_an_id = ScopeGuard::owner("title", Role::Employer).check(&POSTING);
    assert_eq!(not_an_id.unwrap_err().kind(), ErrorKind::InvalidScope);

    let wrong_literal = ScopeGuard::visibility("status", vec![Value::Uint(1)]).check(&POSTING);
    assert_eq!(wrong_literal.unwrap_err().kind(), ErrorKind::InvalidScope);
}

#[test]
fn roles_use_screaming_case_on_the_wire() {
    assert_eq!(serde_json::to_string(&Role::Employer).unwrap(), "\"EMPLOYER\"");
    assert_eq!(
        serde_json::from_str::<Role>("\"CANDIDATE\"").unwrap(),
        Role::Candidate
    );
}
