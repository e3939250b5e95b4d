// ABOUTME: SQLite-backed storage for users and the ingredient catalog
// ABOUTME: Handles migrations, user CRUD, and catalog reads with nested sources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! # Database Management
//!
//! This module provides database functionality for the formulation server:
//! user storage plus the read-only ingredient catalog and retailer
//! directory. Catalog rows are created by the seeding binary and only read
//! here.

use crate::models::{Ingredient, IngredientSource, Retailer, User, UserType, VolumeType};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite, SqlitePool};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

/// Database manager for user and catalog storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a DDL statement fails
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                user_type TEXT NOT NULL CHECK (user_type IN ('INDIVIDUAL', 'CATERER')),
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Index on email for fast login lookups
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS retailers (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                website TEXT NOT NULL,
                volume_type TEXT NOT NULL CHECK (volume_type IN ('LOW', 'HIGH'))
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                food_group TEXT NOT NULL,
                calories_per_100g REAL NOT NULL CHECK (calories_per_100g >= 0),
                is_vegan BOOLEAN NOT NULL,
                is_vegetarian BOOLEAN NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredient_sources (
                id TEXT PRIMARY KEY,
                ingredient_id TEXT NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
                retailer_id TEXT NOT NULL REFERENCES retailers(id) ON DELETE CASCADE,
                price_per_kg REAL NOT NULL CHECK (price_per_kg >= 0),
                product_url TEXT,

                -- One price per retailer per ingredient
                UNIQUE(ingredient_id, retailer_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sources_ingredient_id ON ingredient_sources(ingredient_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sources_retailer_id ON ingredient_sources(retailer_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ── Users ───────────────────────────────────────────────────────────

    /// Create a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a duplicate email)
    pub async fn create_user(&self, user: &User) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, user_type, created_at, last_active, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.user_type.as_str())
        .bind(user.created_at.to_rfc3339())
        .bind(user.last_active.to_rfc3339())
        .bind(user.is_active)
        .execute(&self.pool)
        .await?;

        Ok(user.id)
    }

    /// Get user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_user(&row)).transpose()
    }

    /// Get user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::row_to_user(&row)).transpose()
    }

    /// Get user by email, returning an error if not found (for authentication)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or no user has this email
    pub async fn get_user_by_email_required(&self, email: &str) -> Result<User> {
        match self.get_user_by_email(email).await? {
            Some(user) => Ok(user),
            None => Err(anyhow::anyhow!("User not found")),
        }
    }

    /// Update a user's last active timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_last_active(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_active = ?1 WHERE id = ?2")
            .bind(Utc::now().to_rfc3339())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Update a user's account type (settings page)
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_user_type(&self, user_id: Uuid, user_type: UserType) -> Result<()> {
        sqlx::query("UPDATE users SET user_type = ?1, last_active = ?2 WHERE id = ?3")
            .bind(user_type.as_str())
            .bind(Utc::now().to_rfc3339())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ── Catalog: retailers ──────────────────────────────────────────────

    /// Create a retailer (seeding only)
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a duplicate name)
    pub async fn create_retailer(&self, retailer: &Retailer) -> Result<Uuid> {
        sqlx::query(
            "INSERT INTO retailers (id, name, website, volume_type) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(retailer.id.to_string())
        .bind(&retailer.name)
        .bind(&retailer.website)
        .bind(retailer.volume_type.as_str())
        .execute(&self.pool)
        .await?;

        Ok(retailer.id)
    }

    /// Get the full retailer directory
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn get_retailers(&self) -> Result<Vec<Retailer>> {
        let rows = sqlx::query("SELECT * FROM retailers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_retailer).collect()
    }

    /// Get a retailer by display name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_retailer_by_name(&self, name: &str) -> Result<Option<Retailer>> {
        let row = sqlx::query("SELECT * FROM retailers WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_retailer).transpose()
    }

    // ── Catalog: ingredients ────────────────────────────────────────────

    /// Create an ingredient without sources (seeding only)
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including a duplicate name)
    pub async fn create_ingredient(&self, ingredient: &Ingredient) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO ingredients (id, name, food_group, calories_per_100g, is_vegan, is_vegetarian)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(ingredient.id.to_string())
        .bind(&ingredient.name)
        .bind(&ingredient.food_group)
        .bind(ingredient.calories_per_100g)
        .bind(ingredient.is_vegan)
        .bind(ingredient.is_vegetarian)
        .execute(&self.pool)
        .await?;

        Ok(ingredient.id)
    }

    /// Get an ingredient by display name, without its sources
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        let row = sqlx::query("SELECT * FROM ingredients WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_ingredient).transpose()
    }

    /// Link an ingredient to a retailer with a price (seeding only).
    ///
    /// Idempotent: an existing (ingredient, retailer) pair is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_ingredient_source(
        &self,
        ingredient_id: Uuid,
        retailer_id: Uuid,
        price_per_kg: f64,
        product_url: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            r"
            INSERT OR IGNORE INTO ingredient_sources (id, ingredient_id, retailer_id, price_per_kg, product_url)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(ingredient_id.to_string())
        .bind(retailer_id.to_string())
        .bind(price_per_kg)
        .bind(product_url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the full ingredient catalog with nested sources and retailers.
    ///
    /// This is the authenticated client's one-shot catalog fetch: every
    /// ingredient, each carrying its price sources, each source carrying its
    /// retailer.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be decoded
    pub async fn get_ingredients(&self) -> Result<Vec<Ingredient>> {
        let ingredient_rows = sqlx::query("SELECT * FROM ingredients ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let source_rows = sqlx::query(
            r"
            SELECT s.id, s.ingredient_id, s.price_per_kg, s.product_url,
                   r.id AS retailer_id, r.name AS retailer_name,
                   r.website AS retailer_website, r.volume_type AS retailer_volume_type
            FROM ingredient_sources s
            JOIN retailers r ON r.id = s.retailer_id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut sources_by_ingredient: HashMap<Uuid, Vec<IngredientSource>> = HashMap::new();
        for row in &source_rows {
            let source = Self::row_to_source(row)?;
            sources_by_ingredient
                .entry(source.ingredient_id)
                .or_default()
                .push(source);
        }

        ingredient_rows
            .iter()
            .map(|row| {
                let mut ingredient = Self::row_to_ingredient(row)?;
                if let Some(sources) = sources_by_ingredient.remove(&ingredient.id) {
                    ingredient.sources = sources;
                }
                Ok(ingredient)
            })
            .collect()
    }

    // ── Row decoding ────────────────────────────────────────────────────

    fn row_to_user(row: &SqliteRow) -> Result<User> {
        let id: String = row.try_get("id")?;
        let user_type: String = row.try_get("user_type")?;
        let created_at: String = row.try_get("created_at")?;
        let last_active: String = row.try_get("last_active")?;

        Ok(User {
            id: Uuid::parse_str(&id).context("Invalid user id in database")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            user_type: UserType::from_str(&user_type)
                .map_err(|e| anyhow::anyhow!("Invalid user type in database: {e}"))?,
            created_at: parse_timestamp(&created_at)?,
            last_active: parse_timestamp(&last_active)?,
            is_active: row.try_get("is_active")?,
        })
    }

    fn row_to_retailer(row: &SqliteRow) -> Result<Retailer> {
        let id: String = row.try_get("id")?;
        let volume_type: String = row.try_get("volume_type")?;

        Ok(Retailer {
            id: Uuid::parse_str(&id).context("Invalid retailer id in database")?,
            name: row.try_get("name")?,
            website: row.try_get("website")?,
            volume_type: VolumeType::from_str(&volume_type)
                .map_err(|e| anyhow::anyhow!("Invalid volume type in database: {e}"))?,
        })
    }

    fn row_to_ingredient(row: &SqliteRow) -> Result<Ingredient> {
        let id: String = row.try_get("id")?;

        Ok(Ingredient {
            id: Uuid::parse_str(&id).context("Invalid ingredient id in database")?,
            name: row.try_get("name")?,
            food_group: row.try_get("food_group")?,
            calories_per_100g: row.try_get("calories_per_100g")?,
            is_vegan: row.try_get("is_vegan")?,
            is_vegetarian: row.try_get("is_vegetarian")?,
            sources: Vec::new(),
        })
    }

    fn row_to_source(row: &SqliteRow) -> Result<IngredientSource> {
        let id: String = row.try_get("id")?;
        let ingredient_id: String = row.try_get("ingredient_id")?;
        let retailer_id: String = row.try_get("retailer_id")?;
        let retailer_volume_type: String = row.try_get("retailer_volume_type")?;

        Ok(IngredientSource {
            id: Uuid::parse_str(&id).context("Invalid source id in database")?,
            ingredient_id: Uuid::parse_str(&ingredient_id)
                .context("Invalid ingredient id in database")?,
            price_per_kg: row.try_get("price_per_kg")?,
            product_url: row.try_get("product_url")?,
            retailer: Retailer {
                id: Uuid::parse_str(&retailer_id).context("Invalid retailer id in database")?,
                name: row.try_get("retailer_name")?,
                website: row.try_get("retailer_website")?,
                volume_type: VolumeType::from_str(&retailer_volume_type)
                    .map_err(|e| anyhow::anyhow!("Invalid volume type in database: {e}"))?,
            },
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid timestamp in database: {value}"))?
        .with_timezone(&Utc))
}
