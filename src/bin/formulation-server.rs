// ABOUTME: Server binary for the Formulation Designer API
// ABOUTME: Production-ready server with authentication and catalog serving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! # Formulation API Server Binary
//!
//! Starts the formulation API with user authentication, catalog reads, and
//! database management.

use anyhow::Result;
use clap::Parser;
use formulation_server::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    logging,
    resources::ServerResources,
    server::HttpServer,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "formulation-server")]
#[command(about = "Formulation Designer - recipe costing and ingredient sourcing API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Override port if specified
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Formulation API");
    info!("{}", config.summary());

    // Initialize database (runs migrations)
    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!(
        "Database initialized successfully: {}",
        config.database.url.to_connection_string()
    );

    // JWT secret from environment, or an ephemeral one for this process
    let jwt_secret = config.auth.jwt_secret.as_ref().map_or_else(
        || {
            warn!("JWT_SECRET not set; generating an ephemeral secret (sessions will not survive restarts)");
            generate_jwt_secret().to_vec()
        },
        |secret| secret.as_bytes().to_vec(),
    );

    // Initialize authentication manager
    let auth_manager = AuthManager::new(jwt_secret, config.auth.jwt_expiry_hours);
    info!("Authentication manager initialized");

    // Create server resources and server
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(config.clone()),
    ));
    let server = HttpServer::new(resources);

    info!("Server starting on port {}", config.http_port);
    display_available_endpoints(&config);
    info!("Ready to serve the catalog!");

    // Run the server (includes all routes)
    if let Err(e) = server.run(config.http_port).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints with their ports
fn display_available_endpoints(config: &ServerConfig) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("Authentication:");
    info!("   User Registration: POST http://{host}:{port}/api/auth/register");
    info!("   User Login:        POST http://{host}:{port}/api/auth/login");
    info!("Catalog:");
    info!("   Ingredients:       GET  http://{host}:{port}/api/ingredients");
    info!("   Retailers:         GET  http://{host}:{port}/api/retailers");
    info!("Settings:");
    info!("   Account Type:      PUT  http://{host}:{port}/api/settings/account-type");
    info!("Monitoring:");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
    info!("=== End of Endpoint List ===");
}
