// ABOUTME: Configuration module organization
// ABOUTME: Exposes environment-based server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! Configuration management for the formulation server
//!
//! Configuration is environment-only: a typed [`environment::ServerConfig`]
//! is assembled from environment variables (optionally via a `.env` file)
//! at startup.

/// Environment-based configuration management
pub mod environment;

pub use environment::ServerConfig;
