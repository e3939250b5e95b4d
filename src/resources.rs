// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Manages shared resources like database, auth manager, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Expensive
//! shared resources (database pool, auth manager) are created once and
//! shared behind `Arc` instead of being recreated per request.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::middleware::AuthMiddleware;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Shared database pool
    pub database: Arc<Database>,
    /// JWT issue/validate manager
    pub auth_manager: Arc<AuthManager>,
    /// Bearer-token authentication middleware
    pub auth_middleware: Arc<AuthMiddleware>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: Arc<ServerConfig>) -> Self {
        let database = Arc::new(database);
        let auth_middleware = Arc::new(AuthMiddleware::new(
            auth_manager.clone(),
            database.clone(), // Safe: Arc clone for middleware sharing
        ));

        Self {
            database,
            auth_manager: Arc::new(auth_manager),
            auth_middleware,
            config,
        }
    }
}
