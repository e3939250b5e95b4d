// ABOUTME: Route module organization for the formulation server HTTP endpoints
// ABOUTME: Provides centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! Route module for the formulation server
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains route definitions and thin handler functions that delegate to
//! service layers.

/// Authentication and registration routes
pub mod auth;
/// Ingredient catalog and retailer directory routes
pub mod catalog;
/// Health check and system status routes
pub mod health;
/// Account settings routes
pub mod settings;

// Re-export commonly used types from each domain

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Authentication service
pub use auth::AuthService;
/// Login request payload
pub use auth::LoginRequest;
/// Login response with token
pub use auth::LoginResponse;
/// User registration request
pub use auth::RegisterRequest;
/// Registration response with user details
pub use auth::RegisterResponse;
/// User information
pub use auth::UserInfo;
/// Catalog route handlers
pub use catalog::CatalogRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Settings route handlers
pub use settings::SettingsRoutes;
