// ABOUTME: Request authentication middleware for JWT bearer tokens
// ABOUTME: Validates tokens, resolves the user, and produces an AuthResult for handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

use crate::auth::AuthManager;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::UserType;
use std::sync::Arc;
use uuid::Uuid;

/// Authentication result with user context
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user `ID`
    pub user_id: Uuid,
    /// Authenticated user's email
    pub email: String,
    /// Authenticated user's account type
    pub user_type: UserType,
}

/// Middleware that gates routes behind a valid JWT bearer token
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: AuthManager,
    database: Arc<Database>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: AuthManager, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The header is missing or not a `Bearer` token
    /// - JWT validation fails (bad signature, malformed, expired)
    /// - The user no longer exists or has been deactivated
    #[tracing::instrument(
        skip(self, auth_header),
        fields(user_id = tracing::field::Empty, success = tracing::field::Empty)
    )]
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let Some(auth_str) = auth_header else {
            tracing::warn!("Authentication failed: Missing authorization header");
            return Err(AppError::auth_required());
        };

        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            tracing::Span::current().record("success", false);
            tracing::warn!(
                "Authentication failed: Invalid authorization header format (expected 'Bearer ...')"
            );
            return Err(AppError::auth_invalid(
                "Invalid authorization header format - must be 'Bearer <token>'",
            ));
        };

        match self.authenticate_jwt_token(token).await {
            Ok(result) => {
                tracing::Span::current()
                    .record("user_id", result.user_id.to_string())
                    .record("success", true);
                tracing::debug!("JWT authentication successful for user: {}", result.user_id);
                Ok(result)
            }
            Err(e) => {
                tracing::Span::current().record("success", false);
                tracing::warn!("JWT authentication failed: {}", e);
                Err(e)
            }
        }
    }

    /// Authenticate using an HS256 JWT token
    async fn authenticate_jwt_token(&self, token: &str) -> AppResult<AuthResult> {
        let claims = self
            .auth_manager
            .validate_token_detailed(token)
            .map_err(|e| AppError::auth_invalid(format!("JWT validation failed: {e}")))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid user ID in token"))?;

        // The token may outlive the account; confirm against the database
        let user = self
            .database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;

        if !user.is_active {
            return Err(AppError::auth_invalid(
                crate::constants::error_messages::ACCOUNT_DISABLED,
            ));
        }

        Ok(AuthResult {
            user_id,
            email: user.email,
            user_type: user.user_type,
        })
    }

    /// Get reference to the auth manager for testing purposes
    #[must_use]
    pub const fn auth_manager(&self) -> &AuthManager {
        &self.auth_manager
    }
}
