// ABOUTME: Recipe state machine and totals aggregation
// ABOUTME: Implements add/set_quantity/remove transitions and cost/calorie/dietary totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! # Recipe Aggregation
//!
//! A recipe is an ordered sequence of ingredient/quantity pairs, unique by
//! ingredient id, that lives only for the duration of a client session.
//! Totals are recomputed in full after every mutation: recipes are
//! interactive-sized (tens of items), so a single O(n) pass beats any
//! incremental bookkeeping.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{cheapest_source, CatalogSnapshot};
use crate::constants::limits::DEFAULT_QUANTITY_G;

/// One ingredient reference plus its quantity in grams
///
/// References the ingredient by id; the recipe reads catalog data, it never
/// owns it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeItem {
    /// Ingredient this item refers to
    pub ingredient_id: Uuid,
    /// Quantity in grams; zero is allowed
    pub quantity_g: u32,
}

/// Derived cost, calorie, and dietary summary of a recipe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    /// Total estimated cost, priced at each ingredient's cheapest source
    pub cost: f64,
    /// Total calories
    pub calories: f64,
    /// True while every item's ingredient is vegan
    pub is_all_vegan: bool,
    /// True while every item's ingredient is vegetarian
    pub is_all_vegetarian: bool,
}

impl Default for Totals {
    fn default() -> Self {
        Self {
            cost: 0.0,
            calories: 0.0,
            is_all_vegan: true,
            is_all_vegetarian: true,
        }
    }
}

/// A user's in-progress ingredient selection
///
/// Ordered by insertion, unique by ingredient id. Session-local only:
/// recipes are never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    items: Vec<RecipeItem>,
}

impl Recipe {
    /// Create an empty recipe
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[RecipeItem] {
        &self.items
    }

    /// Number of items in the recipe
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the recipe has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current quantity for an ingredient, if present
    #[must_use]
    pub fn quantity(&self, ingredient_id: Uuid) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.ingredient_id == ingredient_id)
            .map(|item| item.quantity_g)
    }

    /// Add an ingredient with the default quantity.
    ///
    /// No-op when the ingredient is already present.
    pub fn add(&mut self, ingredient_id: Uuid) {
        if self.quantity(ingredient_id).is_some() {
            return;
        }
        self.items.push(RecipeItem {
            ingredient_id,
            quantity_g: DEFAULT_QUANTITY_G,
        });
    }

    /// Set the quantity for an ingredient already in the recipe.
    ///
    /// Invalid quantities (negative, or too large for a gram count) are
    /// rejected silently and the prior quantity is retained. A no-op when
    /// the ingredient is absent.
    pub fn set_quantity(&mut self, ingredient_id: Uuid, quantity_g: i64) {
        let Ok(quantity_g) = u32::try_from(quantity_g) else {
            return;
        };
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.ingredient_id == ingredient_id)
        {
            item.quantity_g = quantity_g;
        }
    }

    /// Remove an ingredient from the recipe.
    ///
    /// No-op when the ingredient is absent.
    pub fn remove(&mut self, ingredient_id: Uuid) {
        self.items.retain(|item| item.ingredient_id != ingredient_id);
    }
}

/// Compute the cost, calorie, and dietary totals of a recipe.
///
/// Pure and idempotent: two calls on an unchanged recipe and snapshot yield
/// identical results. Accumulation follows recipe order so rounding is
/// reproducible. Per item:
///
/// - cost contribution is `price_per_kg / 1000 * quantity_g` at the
///   ingredient's cheapest source, or zero when it has no sources;
/// - calorie contribution is `calories_per_100g / 100 * quantity_g`;
/// - `is_all_vegan` / `is_all_vegetarian` drop to `false` permanently once
///   any item's ingredient lacks the flag; the two flags are independent.
///
/// An empty recipe yields zero cost, zero calories, and both flags `true`.
/// Items whose ingredient is missing from the snapshot contribute nothing.
#[must_use]
pub fn compute_totals(recipe: &Recipe, catalog: &CatalogSnapshot) -> Totals {
    let mut totals = Totals::default();

    for item in recipe.items() {
        let Some(ingredient) = catalog.ingredient(item.ingredient_id) else {
            continue;
        };
        let quantity_g = f64::from(item.quantity_g);

        if let Some(source) = cheapest_source(ingredient) {
            totals.cost += source.price_per_kg / 1000.0 * quantity_g;
        }
        totals.calories += ingredient.calories_per_100g / 100.0 * quantity_g;

        if !ingredient.is_vegan {
            totals.is_all_vegan = false;
        }
        if !ingredient.is_vegetarian {
            totals.is_all_vegetarian = false;
        }
    }

    totals
}
