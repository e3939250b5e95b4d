// ABOUTME: Immutable catalog snapshot and cheapest-source pricing resolution
// ABOUTME: Provides ingredient lookup, name search, and retailer directory partitioning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! # Catalog Snapshot
//!
//! Once a client authenticates it fetches the full ingredient catalog and
//! retailer directory exactly once; the result is held here as an immutable
//! snapshot for the remainder of the session. The aggregation code reads the
//! snapshot, it never mutates it, and no process-wide cache exists.

use uuid::Uuid;

use crate::models::{Ingredient, IngredientSource, Retailer, VolumeType};

/// Select the cheapest price source for an ingredient.
///
/// Scans all sources and returns the one with the minimum price per
/// kilogram. On equal prices the first source encountered wins; the
/// tie-break has no business meaning. Returns `None` for an ingredient
/// with no sources — callers treat that as a zero-cost contribution, not
/// as an error.
#[must_use]
pub fn cheapest_source(ingredient: &Ingredient) -> Option<&IngredientSource> {
    ingredient
        .sources
        .iter()
        .reduce(|best, source| {
            if source.price_per_kg < best.price_per_kg {
                source
            } else {
                best
            }
        })
}

/// Immutable snapshot of the fetched catalog
///
/// Constructed from the `/api/ingredients` and `/api/retailers` responses
/// after authentication and passed explicitly to the aggregator.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    ingredients: Vec<Ingredient>,
    retailers: Vec<Retailer>,
}

impl CatalogSnapshot {
    /// Create a snapshot from fetched catalog data
    #[must_use]
    pub const fn new(ingredients: Vec<Ingredient>, retailers: Vec<Retailer>) -> Self {
        Self {
            ingredients,
            retailers,
        }
    }

    /// All ingredients in the snapshot
    #[must_use]
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// All retailers in the snapshot
    #[must_use]
    pub fn retailers(&self) -> &[Retailer] {
        &self.retailers
    }

    /// Look up an ingredient by id
    #[must_use]
    pub fn ingredient(&self, id: Uuid) -> Option<&Ingredient> {
        self.ingredients.iter().find(|ing| ing.id == id)
    }

    /// Case-insensitive substring search over ingredient names
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Ingredient> {
        let needle = term.to_lowercase();
        self.ingredients
            .iter()
            .filter(|ing| ing.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Retailers with the given volume classification, for directory display
    #[must_use]
    pub fn retailers_by_volume(&self, volume_type: VolumeType) -> Vec<&Retailer> {
        self.retailers
            .iter()
            .filter(|r| r.volume_type == volume_type)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, IngredientSource, Retailer, VolumeType};

    fn retailer(name: &str, volume_type: VolumeType) -> Retailer {
        Retailer::new(name.to_owned(), "https://example.com/".to_owned(), volume_type)
    }

    fn source(ingredient_id: Uuid, price_per_kg: f64, retailer_name: &str) -> IngredientSource {
        IngredientSource {
            id: Uuid::new_v4(),
            ingredient_id,
            price_per_kg,
            product_url: Some("#".to_owned()),
            retailer: retailer(retailer_name, VolumeType::Low),
        }
    }

    fn flour_with_prices(prices: &[f64]) -> Ingredient {
        let mut flour = Ingredient::new("Plain Flour".into(), "Grain".into(), 364.0, true, true);
        flour.sources = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| source(flour.id, p, &format!("Retailer {i}")))
            .collect();
        flour
    }

    #[test]
    fn test_cheapest_source_picks_minimum() {
        let flour = flour_with_prices(&[0.80, 0.45, 0.75, 0.50]);
        let cheapest = cheapest_source(&flour).unwrap();
        assert!((cheapest.price_per_kg - 0.45).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cheapest_source_tie_keeps_first() {
        let flour = flour_with_prices(&[1.10, 1.10]);
        let cheapest = cheapest_source(&flour).unwrap();
        assert_eq!(cheapest.retailer.name, "Retailer 0");
    }

    #[test]
    fn test_cheapest_source_none_for_empty() {
        let flour = flour_with_prices(&[]);
        assert!(cheapest_source(&flour).is_none());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let snapshot = CatalogSnapshot::new(
            vec![
                flour_with_prices(&[0.45]),
                Ingredient::new("Caster Sugar".into(), "Sugar".into(), 400.0, true, true),
            ],
            vec![],
        );
        assert_eq!(snapshot.search("FLOUR").len(), 1);
        assert_eq!(snapshot.search("sugar").len(), 1);
        assert_eq!(snapshot.search("a").len(), 2);
        assert!(snapshot.search("salt").is_empty());
    }

    #[test]
    fn test_retailers_partition_by_volume() {
        let snapshot = CatalogSnapshot::new(
            vec![],
            vec![
                retailer("Tesco", VolumeType::Low),
                retailer("Costco Wholesale", VolumeType::High),
                retailer("ASDA", VolumeType::Low),
            ],
        );
        assert_eq!(snapshot.retailers_by_volume(VolumeType::Low).len(), 2);
        assert_eq!(snapshot.retailers_by_volume(VolumeType::High).len(), 1);
    }
}
