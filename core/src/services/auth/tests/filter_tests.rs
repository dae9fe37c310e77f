//! Unit tests for the filter chain

use crate::errors::{DomainError, DomainResult};
use crate::repositories::user::TestUser;
use crate::services::auth::FilterChain;

fn rename(user: TestUser) -> DomainResult<Option<TestUser>> {
    Ok(Some(TestUser {
        name: user.name.to_uppercase(),
        ..user
    }))
}

fn reject(_: TestUser) -> DomainResult<Option<TestUser>> {
    Ok(None)
}

fn ban(_: TestUser) -> DomainResult<Option<TestUser>> {
    Err(DomainError::filter_rejected("banned"))
}

#[test]
fn test_empty_chain_passes_user_through() {
    let chain: FilterChain<TestUser> = FilterChain::default();
    let user = TestUser::new("1", "ada");

    assert!(chain.is_empty());
    assert_eq!(chain.apply(user.clone()).unwrap(), Some(user));
}

#[test]
fn test_filters_run_in_registration_order() {
    let mut chain: FilterChain<TestUser> = FilterChain::new();
    chain.push(rename);
    chain.push(|user: TestUser| -> DomainResult<Option<TestUser>> {
        Ok(Some(TestUser {
            name: format!("{}!", user.name),
            ..user
        }))
    });

    let result = chain.apply(TestUser::new("1", "ada")).unwrap().unwrap();

    assert_eq!(chain.len(), 2);
    assert_eq!(result.name, "ADA!");
}

#[test]
fn test_rejection_stops_the_chain() {
    let mut chain: FilterChain<TestUser> = FilterChain::new();
    chain.push(reject);
    chain.push(ban);

    assert_eq!(chain.apply(TestUser::new("1", "ada")).unwrap(), None);
}

#[test]
fn test_error_aborts_the_chain() {
    let mut chain: FilterChain<TestUser> = FilterChain::new();
    chain.push(ban);
    chain.push(rename);

    let err = chain.apply(TestUser::new("1", "ada")).unwrap_err();
    assert!(matches!(err, DomainError::FilterRejected { message } if message == "banned"));
}
