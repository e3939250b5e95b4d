// ABOUTME: Core data models for the Formulation Designer API
// ABOUTME: Defines User, Ingredient, IngredientSource, Retailer and related types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! # Data Models
//!
//! This module contains the core data structures used throughout the
//! formulation server.
//!
//! ## Design Principles
//!
//! - **Serializable**: All models support JSON serialization for the REST API
//! - **Type Safe**: Strong typing prevents common data handling errors
//! - **Read-mostly catalog**: Ingredient, source, and retailer rows are
//!   written by the seeding process and read-only to the API

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Account classification chosen at registration
///
/// Individuals shop low-volume retail; caterers buy wholesale. The type only
/// tailors the retailer directory presentation, it grants no permissions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    /// Home cook buying retail quantities
    Individual,
    /// Catering business buying wholesale quantities
    Caterer,
}

impl UserType {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "INDIVIDUAL",
            Self::Caterer => "CATERER",
        }
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INDIVIDUAL" => Ok(Self::Individual),
            "CATERER" => Ok(Self::Caterer),
            _ => Err(AppError::invalid_input(
                crate::constants::error_messages::INVALID_USER_TYPE,
            )),
        }
    }
}

/// Volume classification for a retailer
///
/// Display-only: the sourcing directory groups retailers by it, nothing in
/// the pricing or aggregation path reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum VolumeType {
    /// Retail quantities for individuals
    Low,
    /// Wholesale quantities for caterers
    High,
}

impl VolumeType {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
        }
    }
}

impl Display for VolumeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VolumeType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "HIGH" => Ok(Self::High),
            _ => Err(AppError::invalid_input(format!("Invalid volume type: {s}"))),
        }
    }
}

/// Represents a registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (used for identification)
    pub email: String,
    /// Hashed password for authentication
    pub password_hash: String,
    /// Account classification (individual or caterer)
    pub user_type: UserType,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time the user accessed the system
    pub last_active: DateTime<Utc>,
    /// Whether the user account is active
    pub is_active: bool,
}

impl User {
    /// Create a new user with the given email and password hash
    #[must_use]
    pub fn new(email: String, password_hash: String, user_type: UserType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            user_type,
            created_at: now,
            last_active: now,
            is_active: true,
        }
    }

    /// Update last active timestamp
    pub fn update_last_active(&mut self) {
        self.last_active = Utc::now();
    }
}

/// A retailer that stocks ingredients
///
/// Part of the read-only sourcing directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retailer {
    /// Unique retailer identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Retailer website URL
    pub website: String,
    /// Volume classification for directory grouping
    pub volume_type: VolumeType,
}

impl Retailer {
    /// Create a new retailer
    #[must_use]
    pub fn new(name: String, website: String, volume_type: VolumeType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            website,
            volume_type,
        }
    }
}

/// One retailer's price for one ingredient
///
/// An ingredient can have at most one source per retailer; the catalog
/// response denormalizes the retailer into each source for the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientSource {
    /// Unique source identifier
    pub id: Uuid,
    /// Ingredient this price belongs to
    pub ingredient_id: Uuid,
    /// Price per kilogram at this retailer (non-negative)
    pub price_per_kg: f64,
    /// Product page URL when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    /// The retailer offering this price
    pub retailer: Retailer,
}

/// A named foodstuff with nutritional metadata and retailer price sources
///
/// The vegan and vegetarian flags are independent: nothing enforces or
/// assumes `is_vegan` implies `is_vegetarian`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique ingredient identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Food group for catalog presentation
    pub food_group: String,
    /// Calories per 100 grams (non-negative)
    pub calories_per_100g: f64,
    /// Whether the ingredient is vegan
    pub is_vegan: bool,
    /// Whether the ingredient is vegetarian
    pub is_vegetarian: bool,
    /// Retailer price sources; may be empty
    #[serde(default)]
    pub sources: Vec<IngredientSource>,
}

impl Ingredient {
    /// Create a new ingredient without sources
    #[must_use]
    pub fn new(
        name: String,
        food_group: String,
        calories_per_100g: f64,
        is_vegan: bool,
        is_vegetarian: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            food_group,
            calories_per_100g,
            is_vegan,
            is_vegetarian,
            sources: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_roundtrip() {
        assert_eq!(UserType::from_str("INDIVIDUAL").unwrap(), UserType::Individual);
        assert_eq!(UserType::from_str("CATERER").unwrap(), UserType::Caterer);
        assert_eq!(UserType::Caterer.as_str(), "CATERER");
        assert!(UserType::from_str("ADMIN").is_err());
    }

    #[test]
    fn test_volume_type_roundtrip() {
        assert_eq!(VolumeType::from_str("LOW").unwrap(), VolumeType::Low);
        assert_eq!(VolumeType::from_str("HIGH").unwrap(), VolumeType::High);
        assert!(VolumeType::from_str("MEDIUM").is_err());
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "cook@example.com".to_owned(),
            "hash".to_owned(),
            UserType::Individual,
        );
        assert!(user.is_active);
        assert_eq!(user.user_type, UserType::Individual);
        assert_eq!(user.created_at, user.last_active);
    }

    #[test]
    fn test_dietary_flags_are_independent() {
        // Vegetarian but not vegan, and the (unusual) inverse both construct fine.
        let eggs = Ingredient::new("Eggs".into(), "Dairy & Eggs".into(), 155.0, false, true);
        assert!(!eggs.is_vegan);
        assert!(eggs.is_vegetarian);

        let odd = Ingredient::new("Odd".into(), "Other".into(), 0.0, true, false);
        assert!(odd.is_vegan);
        assert!(!odd.is_vegetarian);
    }
}
