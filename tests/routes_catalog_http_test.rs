// ABOUTME: HTTP integration tests for catalog and settings routes
// ABOUTME: Tests JWT gating and the nested ingredient/source/retailer response shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! HTTP integration tests for the catalog and settings routes

mod common;
mod helpers;

use formulation_server::models::Ingredient;
use formulation_server::resources::ServerResources;
use formulation_server::routes::{catalog::CatalogRoutes, settings::SettingsRoutes};
use helpers::axum_test::AxumTestRequest;
use serde_json::json;
use std::sync::Arc;

struct CatalogTestSetup {
    resources: Arc<ServerResources>,
    catalog: common::TestCatalog,
    token: String,
}

impl CatalogTestSetup {
    async fn new() -> anyhow::Result<Self> {
        let resources = common::create_test_resources().await?;
        let catalog = common::seed_test_catalog(&resources.database).await?;
        let (_user_id, user) = common::create_test_user(&resources.database).await?;
        let token = resources.auth_manager.generate_token(&user)?;

        Ok(Self {
            resources,
            catalog,
            token,
        })
    }

    fn catalog_routes(&self) -> axum::Router {
        CatalogRoutes::routes(self.resources.clone())
    }

    fn settings_routes(&self) -> axum::Router {
        SettingsRoutes::routes(self.resources.clone())
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// ============================================================================
// GET /api/ingredients
// ============================================================================

#[tokio::test]
async fn test_ingredients_require_auth() {
    let setup = CatalogTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::get("/api/ingredients")
        .send(setup.catalog_routes())
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_ingredients_reject_garbage_token() {
    let setup = CatalogTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::get("/api/ingredients")
        .header("Authorization", "Bearer not.a.jwt")
        .send(setup.catalog_routes())
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_ingredients_returns_full_catalog() {
    let setup = CatalogTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::get("/api/ingredients")
        .header("Authorization", &setup.bearer())
        .send(setup.catalog_routes())
        .await;
    assert_eq!(response.status(), 200);

    let ingredients: Vec<Ingredient> = response.json();
    assert_eq!(ingredients.len(), 3);

    let flour = ingredients
        .iter()
        .find(|i| i.id == setup.catalog.flour_id)
        .expect("Flour missing from catalog");
    assert_eq!(flour.sources.len(), 2);
    assert!(flour.is_vegan && flour.is_vegetarian);

    // Sources carry their retailer for the client
    let booker_source = flour
        .sources
        .iter()
        .find(|s| s.retailer.id == setup.catalog.booker_id)
        .expect("Booker source missing");
    assert!((booker_source.price_per_kg - 0.45).abs() < 1e-9);
    assert_eq!(booker_source.retailer.name, "Booker Wholesale");

    // An ingredient without sources still appears, with an empty list
    let saffron = ingredients
        .iter()
        .find(|i| i.id == setup.catalog.saffron_id)
        .expect("Saffron missing from catalog");
    assert!(saffron.sources.is_empty());
}

// ============================================================================
// GET /api/retailers
// ============================================================================

#[tokio::test]
async fn test_retailers_require_auth() {
    let setup = CatalogTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::get("/api/retailers")
        .send(setup.catalog_routes())
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_retailers_returns_directory() {
    let setup = CatalogTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::get("/api/retailers")
        .header("Authorization", &setup.bearer())
        .send(setup.catalog_routes())
        .await;
    assert_eq!(response.status(), 200);

    let retailers: serde_json::Value = response.json();
    let retailers = retailers.as_array().expect("Expected array");
    assert_eq!(retailers.len(), 2);

    let volume_types: Vec<&str> = retailers
        .iter()
        .map(|r| r["volume_type"].as_str().unwrap())
        .collect();
    assert!(volume_types.contains(&"LOW"));
    assert!(volume_types.contains(&"HIGH"));
}

// ============================================================================
// PUT /api/settings/account-type
// ============================================================================

#[tokio::test]
async fn test_settings_require_auth() {
    let setup = CatalogTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::put("/api/settings/account-type")
        .json(&json!({"user_type": "CATERER"}))
        .send(setup.settings_routes())
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_settings_update_account_type() {
    let setup = CatalogTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::put("/api/settings/account-type")
        .header("Authorization", &setup.bearer())
        .json(&json!({"user_type": "CATERER"}))
        .send(setup.settings_routes())
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["user_type"], "CATERER");

    // Persisted for the next lookup
    let user = setup
        .resources
        .database
        .get_user_by_email("test@example.com")
        .await
        .expect("Query failed")
        .expect("User missing");
    assert_eq!(user.user_type.as_str(), "CATERER");
}

#[tokio::test]
async fn test_settings_reject_invalid_account_type() {
    let setup = CatalogTestSetup::new().await.expect("Setup failed");

    let response = AxumTestRequest::put("/api/settings/account-type")
        .header("Authorization", &setup.bearer())
        .json(&json!({"user_type": "SUPERUSER"}))
        .send(setup.settings_routes())
        .await;
    assert_eq!(response.status(), 400);
}
