// ABOUTME: HTTP server assembly and startup
// ABOUTME: Merges per-domain routers and serves them with CORS and trace layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! # HTTP Server
//!
//! Assembles the per-domain routers into one application router, applies
//! CORS and request tracing, and serves it.

use crate::middleware::cors::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, CatalogRoutes, HealthRoutes, SettingsRoutes};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// The formulation API server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a new server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the application router with all routes and layers
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes())
            .merge(AuthRoutes::routes(self.resources.clone())) // Safe: Arc clone for route handler
            .merge(CatalogRoutes::routes(self.resources.clone())) // Safe: Arc clone for route handler
            .merge(SettingsRoutes::routes(self.resources.clone())) // Safe: Arc clone for route handler
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors(&self.resources.config))
    }

    /// Bind and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if binding the listener or serving fails
    pub async fn run(self, port: u16) -> Result<()> {
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("Failed to bind port {port}"))?;

        info!("HTTP server listening on port {}", port);

        axum::serve(listener, router)
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}
