// ABOUTME: Main library entry point for the Formulation Designer API
// ABOUTME: Provides recipe costing, ingredient sourcing, and user authentication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

#![deny(unsafe_code)]

//! # Formulation Server
//!
//! A recipe-costing web service. Users register and authenticate, fetch an
//! ingredient catalog where each ingredient carries per-retailer price
//! sources, assemble a session-local recipe, and read the recipe's cost,
//! calorie, and dietary totals after every mutation.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Models**: Ingredients, price sources, retailers, and users
//! - **Catalog**: Immutable catalog snapshot and cheapest-source resolution
//! - **Recipe**: The recipe state machine and totals aggregation
//! - **Routes**: REST endpoints for registration, login, and catalog reads
//! - **Database**: SQLite-backed storage for users and the catalog
//! - **Config**: Environment-based configuration management
//!
//! ## Quick Start
//!
//! 1. Seed the catalog with the `seed-catalog` binary
//! 2. Start the API with `formulation-server`
//! 3. Register a user, log in, and fetch `/api/ingredients`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use formulation_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Formulation server configured with port: {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication and JWT session management
pub mod auth;

/// Catalog snapshot and cheapest-source pricing resolution
pub mod catalog;

/// Configuration management
pub mod config;

/// Application constants and shared messages
pub mod constants;

/// User and catalog storage
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for authentication and CORS
pub mod middleware;

/// Common data models for users, ingredients, sources, and retailers
pub mod models;

/// Recipe state machine and totals aggregation
pub mod recipe;

/// Centralized resource container for dependency injection
pub mod resources;

/// `HTTP` routes for user registration, login, and catalog reads
pub mod routes;

/// HTTP server assembly and startup
pub mod server;

/// Client session page state and transitions
pub mod session;
