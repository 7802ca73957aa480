//! Auth service tests against the in-memory credential store.
//!
//! Registration and login orchestration: duplicate handling, validation,
//! and the deliberately indistinguishable login failures.

mod common;

use common::{create_test_config, MemoryCredentialStore};
use skillforge::{
    auth::jwt::JwtService,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, Role},
    services::AuthService,
};
use std::sync::Arc;

fn service_with_store() -> (AuthService, Arc<MemoryCredentialStore>) {
    let config = create_test_config();
    let store = Arc::new(MemoryCredentialStore::new());
    let jwt_service = Arc::new(JwtService::from_config(&config).unwrap());
    let service = AuthService::new(store.clone(), jwt_service);
    (service, store)
}

fn register_request(name: &str, email: &str, password: &str, role: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        phone: None,
        college: None,
        role: role.to_string(),
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let (service, store) = service_with_store();

    service
        .register(register_request("Ann", "a@x.com", "pw123", "INSTRUCTOR"))
        .await
        .unwrap();
    assert_eq!(store.user_count(), 1);

    let response = service
        .login(LoginRequest {
            email: "a@x.com".to_string(),
            password: "pw123".to_string(),
        })
        .await
        .unwrap();

    assert!(response.id > 0);
    assert!(!response.token.is_empty());
    assert_eq!(response.role, Role::Instructor);
    assert_eq!(response.email, "a@x.com");
    assert_eq!(response.name, "Ann");
}

#[tokio::test]
async fn test_register_stores_hash_not_plaintext() {
    let (service, store) = service_with_store();

    service
        .register(register_request("Ann", "a@x.com", "pw123", "STUDENT"))
        .await
        .unwrap();

    let stored = store.find_stored("a@x.com").unwrap();
    assert_ne!(stored.password_hash, "pw123");
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_duplicate_email_rejected_without_write() {
    let (service, store) = service_with_store();

    service
        .register(register_request("Ann", "a@x.com", "pw123", "INSTRUCTOR"))
        .await
        .unwrap();
    assert_eq!(store.user_count(), 1);

    let err = service
        .register(register_request("Other Ann", "a@x.com", "different", "STUDENT"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateEmail));
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_missing_fields_rejected_without_write() {
    let (service, store) = service_with_store();

    let err = service
        .register(register_request("", "a@x.com", "pw123", "STUDENT"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .register(register_request("Ann", "a@x.com", "pw123", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .register(register_request("Ann", "not-an-email", "pw123", "STUDENT"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(store.user_count(), 0);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (service, _store) = service_with_store();

    service
        .register(register_request("Ann", "a@x.com", "pw123", "INSTRUCTOR"))
        .await
        .unwrap();

    let wrong_password = service
        .login(LoginRequest {
            email: "a@x.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    let unknown_email = service
        .login(LoginRequest {
            email: "nobody@x.com".to_string(),
            password: "pw123".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_email, AppError::InvalidCredentials));
    assert_eq!(wrong_password.user_message(), unknown_email.user_message());
    assert_eq!(wrong_password.status_code(), unknown_email.status_code());
}

#[tokio::test]
async fn test_login_role_fallbacks() {
    let (service, store) = service_with_store();

    // Register with a lowercase role tag; response normalizes it
    service
        .register(register_request("Bob", "b@x.com", "pw", "instructor"))
        .await
        .unwrap();

    let response = service
        .login(LoginRequest {
            email: "b@x.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.role, Role::Instructor);

    // A legacy row with no role or name falls back to STUDENT / "User"
    let mut legacy = store.find_stored("b@x.com").unwrap();
    legacy.id = 999;
    legacy.email = "legacy@x.com".to_string();
    legacy.role = None;
    legacy.name = None;
    // Re-insert through the adapter contract is not possible for a legacy
    // shape, so exercise the response mapping directly.
    let mapped = skillforge::models::user::LoginResponse::new(legacy, "token".to_string());
    assert_eq!(mapped.role, Role::Student);
    assert_eq!(mapped.name, "User");
}
