// ABOUTME: Account settings route handlers
// ABOUTME: Provides an authenticated endpoint for updating the account type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! Account settings routes
//!
//! The settings page lets a user switch their account classification
//! between individual and caterer; the choice only tailors directory
//! presentation.

use crate::{
    errors::AppError, middleware::AuthResult, models::UserType, resources::ServerResources,
    routes::auth::UserInfo,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::put,
    Json, Router,
};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

/// Account type update request
#[derive(Debug, Deserialize)]
pub struct UpdateAccountTypeRequest {
    /// New account type (INDIVIDUAL or CATERER)
    pub user_type: String,
}

/// Settings routes
pub struct SettingsRoutes;

impl SettingsRoutes {
    /// Create all settings routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/settings/account-type",
                put(Self::handle_update_account_type),
            )
            .with_state(resources)
    }

    /// Extract and authenticate user from authorization header
    async fn authenticate(
        headers: &axum::http::HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<AuthResult, AppError> {
        let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
        resources
            .auth_middleware
            .authenticate_request(auth_header)
            .await
    }

    /// Handle account type update
    async fn handle_update_account_type(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Json(request): Json<UpdateAccountTypeRequest>,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let user_type = UserType::from_str(&request.user_type)?;

        resources
            .database
            .update_user_type(auth.user_id, user_type)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(auth.user_id))?;

        tracing::info!(
            "Account type updated to {} for user {}",
            user_type,
            auth.user_id
        );

        Ok((
            StatusCode::OK,
            Json(UserInfo {
                user_id: auth.user_id.to_string(),
                email: auth.email,
                user_type: user_type.to_string(),
            }),
        )
            .into_response())
    }
}
