// ABOUTME: Catalog route handlers for the ingredient catalog and retailer directory
// ABOUTME: Provides authenticated REST endpoints returning the full read-only catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! Catalog routes
//!
//! This module serves the authenticated client's one-shot catalog fetch:
//! the full ingredient list (each ingredient with its price sources, each
//! source with its retailer) and the retailer directory. Both endpoints
//! require a valid JWT.

use crate::{errors::AppError, middleware::AuthResult, resources::ServerResources};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Catalog routes
pub struct CatalogRoutes;

impl CatalogRoutes {
    /// Create all catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/ingredients", get(Self::handle_get_ingredients))
            .route("/api/retailers", get(Self::handle_get_retailers))
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

    /// Handle the full ingredient catalog read
    async fn handle_get_ingredients(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let ingredients = resources.database.get_ingredients().await.map_err(|e| {
            tracing::error!("Failed to fetch ingredients: {}", e);
            AppError::database("Failed to fetch ingredients").with_user_id(auth.user_id)
        })?;

        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle the retailer directory read
    async fn handle_get_retailers(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = Self::authenticate(&headers, &resources).await?;

        let retailers = resources.database.get_retailers().await.map_err(|e| {
            tracing::error!("Failed to fetch retailers: {}", e);
            AppError::database("Failed to fetch retailers").with_user_id(auth.user_id)
        })?;

        Ok((StatusCode::OK, Json(retailers)).into_response())
    }
}
