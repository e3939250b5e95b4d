// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Provides REST endpoints for account creation and JWT session issuance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! Authentication routes for user management
//!
//! This module handles user registration and login. Handlers are thin
//! wrappers that delegate business logic to [`AuthService`].

use crate::{
    constants::{error_messages, limits},
    errors::{AppError, AppResult},
    models::{User, UserType},
    resources::ServerResources,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// User registration request
///
/// Fields are optional so absence is reported as a validation failure
/// rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email address to register
    pub email: Option<String>,
    /// Plain-text password (hashed before storage)
    pub password: Option<String>,
    /// Requested account type (INDIVIDUAL or CATERER)
    pub user_type: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Identifier of the created user
    pub user_id: String,
    /// Human-readable confirmation
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// User info for login response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    /// User identifier
    pub user_id: String,
    /// Email address
    pub email: String,
    /// Account type
    pub user_type: String,
}

/// User login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub jwt_token: String,
    /// When the token expires (RFC 3339)
    pub expires_at: String,
    /// The authenticated user
    pub user: UserInfo,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    /// Create the service over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the email is already taken,
    /// or the database operation fails
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let email = request.email.unwrap_or_default();
        tracing::info!("User registration attempt for email: {}", email);

        // Input whitelisting and validation
        if !Self::is_valid_email(&email) {
            return Err(AppError::invalid_input(error_messages::INVALID_EMAIL_FORMAT));
        }
        if !Self::is_valid_password(request.password.as_deref().unwrap_or_default()) {
            return Err(AppError::invalid_input(error_messages::PASSWORD_TOO_WEAK));
        }
        let user_type = UserType::from_str(request.user_type.as_deref().unwrap_or_default())?;

        // Check if user already exists
        if let Ok(Some(_)) = self.resources.database.get_user_by_email(&email).await {
            return Err(AppError::already_exists(error_messages::USER_ALREADY_EXISTS));
        }

        // Hash password off the async executor
        let password = request.password.unwrap_or_default();
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(&password, limits::BCRYPT_COST))
                .await
                .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))?;

        // Create user
        let user = User::new(email.clone(), password_hash, user_type);

        // Save user to database
        let user_id = self
            .resources
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!("User registered successfully: {} ({})", email, user_id);

        Ok(RegisterResponse {
            user_id: user_id.to_string(),
            message: "User created successfully".into(),
        })
    }

    /// Handle user login
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails or token generation fails
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        tracing::info!("User login attempt for email: {}", request.email);

        // Get user from database; unknown email and bad password are
        // indistinguishable to the caller
        let user = self
            .resources
            .database
            .get_user_by_email_required(&request.email)
            .await
            .map_err(|_| AppError::auth_invalid(error_messages::INVALID_CREDENTIALS))?;

        // Verify password using spawn_blocking to avoid blocking the async executor
        let password = request.password.clone();
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!("Invalid password for user: {}", request.email);
            return Err(AppError::auth_invalid(error_messages::INVALID_CREDENTIALS));
        }

        if !user.is_active {
            tracing::warn!("Login blocked for deactivated user: {}", request.email);
            return Err(AppError::auth_invalid(error_messages::ACCOUNT_DISABLED));
        }

        // Update last active timestamp
        self.resources
            .database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        // Generate JWT token
        let jwt_token = self
            .resources
            .auth_manager
            .generate_token(&user)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
        let expires_at = self.resources.auth_manager.expires_at();

        tracing::info!("User logged in successfully: {} ({})", user.email, user.id);

        Ok(LoginResponse {
            jwt_token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                user_type: user.user_type.to_string(),
            },
        })
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        // Simple email validation
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false; // @ at start or end
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }

    /// Validate password strength (trimmed length)
    #[must_use]
    pub fn is_valid_password(password: &str) -> bool {
        password.trim().len() >= limits::MIN_PASSWORD_LENGTH
    }
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    /// Handle user registration
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::new(resources);
        let response = service.register(request).await?;

        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle user login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let service = AuthService::new(resources);
        let response = service.login(request).await?;

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(AuthService::is_valid_email("cook@example.com"));
        assert!(!AuthService::is_valid_email("invalid-email"));
        assert!(!AuthService::is_valid_email("@example.com"));
        assert!(!AuthService::is_valid_email("cook@"));
        assert!(!AuthService::is_valid_email(""));
    }

    #[test]
    fn test_password_validation() {
        assert!(AuthService::is_valid_password("password123"));
        assert!(!AuthService::is_valid_password("123"));
        // Trimmed length is what counts
        assert!(!AuthService::is_valid_password("   1234   "));
    }
}
