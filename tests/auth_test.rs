// ABOUTME: Integration tests for JWT authentication and the auth middleware
// ABOUTME: Covers token roundtrips, expiry, tampering, and user resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! Authentication tests for `formulation_server`

mod common;

use formulation_server::auth::{generate_jwt_secret, AuthManager, JwtValidationError};
use formulation_server::middleware::AuthMiddleware;
use formulation_server::models::{User, UserType};

fn test_user() -> User {
    User::new(
        "cook@example.com".to_owned(),
        "hash".to_owned(),
        UserType::Caterer,
    )
}

#[test]
fn test_token_roundtrip() {
    let auth_manager = AuthManager::new(generate_jwt_secret().to_vec(), 24);
    let user = test_user();

    let token = auth_manager.generate_token(&user).unwrap();
    let claims = auth_manager.validate_token(&token).unwrap();

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.email, "cook@example.com");
    assert_eq!(claims.user_type, "CATERER");
}

#[test]
fn test_tokens_are_unique() {
    let auth_manager = AuthManager::new(generate_jwt_secret().to_vec(), 24);
    let user = test_user();

    // The iat counter makes back-to-back tokens distinct
    let first = auth_manager.generate_token(&user).unwrap();
    let second = auth_manager.generate_token(&user).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_token_rejected_with_wrong_secret() {
    let issuing = AuthManager::new(generate_jwt_secret().to_vec(), 24);
    let verifying = AuthManager::new(generate_jwt_secret().to_vec(), 24);
    let user = test_user();

    let token = issuing.generate_token(&user).unwrap();
    assert!(verifying.validate_token(&token).is_err());

    match verifying.validate_token_detailed(&token) {
        Err(JwtValidationError::TokenInvalid { .. }) => {}
        other => panic!("Expected TokenInvalid, got {other:?}"),
    }
}

#[test]
fn test_expired_token_detailed_error() {
    // Negative expiry issues tokens that are already expired
    let auth_manager = AuthManager::new(generate_jwt_secret().to_vec(), -1);
    let user = test_user();

    let token = auth_manager.generate_token(&user).unwrap();
    match auth_manager.validate_token_detailed(&token) {
        Err(JwtValidationError::TokenExpired { .. }) => {}
        other => panic!("Expected TokenExpired, got {other:?}"),
    }
}

#[test]
fn test_extract_user_id_ignores_expiry() {
    let auth_manager = AuthManager::new(generate_jwt_secret().to_vec(), -1);
    let user = test_user();

    let token = auth_manager.generate_token(&user).unwrap();
    let user_id = auth_manager.extract_user_id(&token).unwrap();
    assert_eq!(user_id, user.id);
}

#[test]
fn test_malformed_token_detailed_error() {
    let auth_manager = AuthManager::new(generate_jwt_secret().to_vec(), 24);

    match auth_manager.validate_token_detailed("not-a-jwt") {
        Err(JwtValidationError::TokenMalformed { .. } | JwtValidationError::TokenInvalid { .. }) => {
        }
        other => panic!("Expected malformed/invalid, got {other:?}"),
    }
}

// ============================================================================
// AuthMiddleware
// ============================================================================

#[tokio::test]
async fn test_middleware_accepts_valid_token() {
    let database = common::create_test_database().await.unwrap();
    let auth_manager = common::create_test_auth_manager();
    let middleware = AuthMiddleware::new((*auth_manager).clone(), database.clone());

    let (user_id, user) = common::create_test_user(&database).await.unwrap();
    let token = auth_manager.generate_token(&user).unwrap();

    let result = middleware
        .authenticate_request(Some(&format!("Bearer {token}")))
        .await
        .unwrap();

    assert_eq!(result.user_id, user_id);
    assert_eq!(result.email, "test@example.com");
    assert_eq!(result.user_type, UserType::Individual);
}

#[tokio::test]
async fn test_middleware_rejects_missing_header() {
    let database = common::create_test_database().await.unwrap();
    let auth_manager = common::create_test_auth_manager();
    let middleware = AuthMiddleware::new((*auth_manager).clone(), database);

    let err = middleware.authenticate_request(None).await.unwrap_err();
    assert_eq!(err.http_status(), 401);
}

#[tokio::test]
async fn test_middleware_rejects_non_bearer_header() {
    let database = common::create_test_database().await.unwrap();
    let auth_manager = common::create_test_auth_manager();
    let middleware = AuthMiddleware::new((*auth_manager).clone(), database);

    let err = middleware
        .authenticate_request(Some("Basic dXNlcjpwYXNz"))
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 401);
}

#[tokio::test]
async fn test_middleware_rejects_token_for_deleted_user() {
    let database = common::create_test_database().await.unwrap();
    let auth_manager = common::create_test_auth_manager();
    let middleware = AuthMiddleware::new((*auth_manager).clone(), database);

    // A valid token whose subject was never stored
    let ghost = User::new(
        "ghost@example.com".to_owned(),
        "hash".to_owned(),
        UserType::Individual,
    );
    let token = auth_manager.generate_token(&ghost).unwrap();

    let err = middleware
        .authenticate_request(Some(&format!("Bearer {token}")))
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 404);
}

#[tokio::test]
async fn test_middleware_rejects_deactivated_user() {
    let database = common::create_test_database().await.unwrap();
    let auth_manager = common::create_test_auth_manager();
    let middleware = AuthMiddleware::new((*auth_manager).clone(), database.clone());

    let mut user = User::new(
        "inactive@example.com".to_owned(),
        "hash".to_owned(),
        UserType::Individual,
    );
    user.is_active = false;
    database.create_user(&user).await.unwrap();

    let token = auth_manager.generate_token(&user).unwrap();
    let err = middleware
        .authenticate_request(Some(&format!("Bearer {token}")))
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 401);
}
