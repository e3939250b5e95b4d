// ABOUTME: Client session page state and gated recipe mutations
// ABOUTME: Models the Unauthenticated/Builder/Sourcing/Settings page dispatch as a tagged variant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! # Client Session State
//!
//! One logical thread of control per client session: every mutation and
//! recomputation happens synchronously in response to a discrete user
//! action. The catalog is fetched once per authentication transition and
//! held as an immutable snapshot; the recipe is private to the session and
//! dies with it.

use crate::catalog::CatalogSnapshot;
use crate::recipe::{compute_totals, Recipe, Totals};
use uuid::Uuid;

/// Which page the client is on
///
/// A plain tagged variant with explicit transitions; there is no dynamic
/// dispatch behind page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Not signed in; only the auth forms are reachable
    #[default]
    Unauthenticated,
    /// Recipe builder (the landing page after sign-in)
    Builder,
    /// Retailer sourcing directory
    Sourcing,
    /// Account settings
    Settings,
}

impl Page {
    /// Whether this page is only reachable when signed in
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(self, Self::Unauthenticated)
    }
}

/// Session-local client state: current page, catalog snapshot, and recipe
///
/// Mutations while unauthenticated are dropped; signing out destroys the
/// recipe and the snapshot.
#[derive(Debug, Default)]
pub struct ClientSession {
    page: Page,
    catalog: Option<CatalogSnapshot>,
    recipe: Recipe,
}

impl ClientSession {
    /// Create a fresh, unauthenticated session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current page
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Whether the session is authenticated
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.page.requires_auth()
    }

    /// The catalog snapshot fetched at sign-in, if any
    #[must_use]
    pub const fn catalog(&self) -> Option<&CatalogSnapshot> {
        self.catalog.as_ref()
    }

    /// The in-progress recipe
    #[must_use]
    pub const fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Complete a sign-in: store the fetched catalog and land on the builder.
    ///
    /// The snapshot is fixed for the remainder of the session; there is no
    /// refresh protocol.
    pub fn sign_in(&mut self, catalog: CatalogSnapshot) {
        self.catalog = Some(catalog);
        self.page = Page::Builder;
    }

    /// Sign out: drop the recipe and snapshot, return to the auth page.
    pub fn sign_out(&mut self) {
        self.page = Page::Unauthenticated;
        self.catalog = None;
        self.recipe = Recipe::new();
    }

    /// Navigate to another page.
    ///
    /// Only authenticated sessions can navigate, and no navigation leads
    /// back to `Unauthenticated` (that is what [`Self::sign_out`] is for).
    pub fn navigate(&mut self, target: Page) {
        if self.is_authenticated() && target.requires_auth() {
            self.page = target;
        }
    }

    /// Add an ingredient to the recipe and return the recomputed totals.
    ///
    /// Dropped while unauthenticated.
    pub fn add_ingredient(&mut self, ingredient_id: Uuid) -> Totals {
        if self.is_authenticated() {
            self.recipe.add(ingredient_id);
        }
        self.totals()
    }

    /// Update an item's quantity and return the recomputed totals.
    ///
    /// Negative quantities are rejected silently with the prior value kept.
    pub fn set_quantity(&mut self, ingredient_id: Uuid, quantity_g: i64) -> Totals {
        if self.is_authenticated() {
            self.recipe.set_quantity(ingredient_id, quantity_g);
        }
        self.totals()
    }

    /// Remove an ingredient and return the recomputed totals.
    pub fn remove_ingredient(&mut self, ingredient_id: Uuid) -> Totals {
        if self.is_authenticated() {
            self.recipe.remove(ingredient_id);
        }
        self.totals()
    }

    /// Totals for the current recipe against the session's snapshot.
    ///
    /// An unauthenticated session (no snapshot) reports empty totals.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.catalog
            .as_ref()
            .map_or_else(Totals::default, |catalog| {
                compute_totals(&self.recipe, catalog)
            })
    }
}
