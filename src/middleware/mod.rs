// ABOUTME: HTTP middleware module organization
// ABOUTME: Exposes request authentication and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! HTTP middleware for the formulation server

/// Bearer-token request authentication
pub mod auth;

/// CORS configuration for web clients
pub mod cors;

pub use auth::{AuthMiddleware, AuthResult};
