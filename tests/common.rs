// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, resource, and seed-data helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `formulation_server`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use formulation_server::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    models::{Ingredient, Retailer, User, UserType, VolumeType},
    resources::ServerResources,
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Arc::new(Database::new("sqlite::memory:").await?);
    Ok(database)
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> Arc<AuthManager> {
    let jwt_secret = generate_jwt_secret().to_vec();
    Arc::new(AuthManager::new(jwt_secret, 24))
}

/// Create the full resource container over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = create_test_auth_manager();
    let config = Arc::new(ServerConfig::default());

    Ok(Arc::new(ServerResources::new(
        (*database).clone(),
        (*auth_manager).clone(),
        config,
    )))
}

/// Create a standard test user
pub async fn create_test_user(database: &Database) -> Result<(Uuid, User)> {
    create_test_user_with_email(database, "test@example.com").await
}

/// Create a test user with a custom email
pub async fn create_test_user_with_email(
    database: &Database,
    email: &str,
) -> Result<(Uuid, User)> {
    let user = User::new(
        email.to_string(),
        bcrypt::hash("password123", 4)?, // Low cost for fast tests
        UserType::Individual,
    );
    let user_id = user.id;

    database.create_user(&user).await?;
    Ok((user_id, user))
}

/// Ids of the rows created by [`seed_test_catalog`]
pub struct TestCatalog {
    pub tesco_id: Uuid,
    pub booker_id: Uuid,
    pub flour_id: Uuid,
    pub eggs_id: Uuid,
    pub saffron_id: Uuid,
}

/// Seed a small catalog: two retailers, three ingredients, three prices.
///
/// Flour is sold at Tesco (1.50/kg) and Booker (0.45/kg); eggs only at
/// Tesco (3.00/kg); saffron has no sources at all.
pub async fn seed_test_catalog(database: &Database) -> Result<TestCatalog> {
    let tesco = Retailer::new(
        "Tesco".into(),
        "https://www.tesco.com/".into(),
        VolumeType::Low,
    );
    let booker = Retailer::new(
        "Booker Wholesale".into(),
        "https://www.booker.co.uk/".into(),
        VolumeType::High,
    );
    database.create_retailer(&tesco).await?;
    database.create_retailer(&booker).await?;

    let flour = Ingredient::new("Plain Flour".into(), "Grain".into(), 364.0, true, true);
    let eggs = Ingredient::new(
        "Free Range Eggs (Medium)".into(),
        "Dairy & Eggs".into(),
        155.0,
        false,
        true,
    );
    let saffron = Ingredient::new("Saffron".into(), "Spice".into(), 310.0, true, true);
    database.create_ingredient(&flour).await?;
    database.create_ingredient(&eggs).await?;
    database.create_ingredient(&saffron).await?;

    database
        .create_ingredient_source(flour.id, tesco.id, 1.50, Some("#"))
        .await?;
    database
        .create_ingredient_source(flour.id, booker.id, 0.45, Some("#"))
        .await?;
    database
        .create_ingredient_source(eggs.id, tesco.id, 3.00, Some("#"))
        .await?;

    Ok(TestCatalog {
        tesco_id: tesco.id,
        booker_id: booker.id,
        flour_id: flour.id,
        eggs_id: eggs.id,
        saffron_id: saffron.id,
    })
}
