// ABOUTME: Catalog seeder for the Formulation Designer API
// ABOUTME: Populates retailers, ingredients, and per-retailer prices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! Catalog seeder for the formulation server.
//!
//! This binary populates the database with the retailer directory and the
//! starter ingredient catalog. It is idempotent: existing retailers and
//! ingredients are reused, and existing (ingredient, retailer) prices are
//! left untouched.
//!
//! Usage:
//! ```bash
//! # Seed with the configured DATABASE_URL
//! cargo run --bin seed-catalog
//!
//! # Seed a specific database
//! cargo run --bin seed-catalog -- --database-url sqlite:data/formulation.db
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use formulation_server::{
    config::environment::ServerConfig,
    database::Database,
    logging,
    models::{Ingredient, Retailer, VolumeType},
};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "seed-catalog",
    about = "Formulation Designer catalog seeder",
    long_about = "Populate the database with the retailer directory and starter ingredient catalog"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,
}

/// Seed retailer configuration
struct SeedRetailer {
    name: &'static str,
    website: &'static str,
    volume_type: VolumeType,
}

/// Seed ingredient configuration
struct SeedIngredient {
    name: &'static str,
    food_group: &'static str,
    calories_per_100g: f64,
    is_vegan: bool,
    is_vegetarian: bool,
}

/// (ingredient name, retailer name, price per kg)
type SeedSource = (&'static str, &'static str, f64);

const RETAILERS: &[SeedRetailer] = &[
    SeedRetailer {
        name: "Tesco",
        website: "https://www.tesco.com/",
        volume_type: VolumeType::Low,
    },
    SeedRetailer {
        name: "ASDA",
        website: "https://www.asda.com/",
        volume_type: VolumeType::Low,
    },
    SeedRetailer {
        name: "Costco Wholesale",
        website: "https://www.costco.co.uk/",
        volume_type: VolumeType::High,
    },
    SeedRetailer {
        name: "Booker Wholesale",
        website: "https://www.booker.co.uk/",
        volume_type: VolumeType::High,
    },
];

const INGREDIENTS: &[SeedIngredient] = &[
    SeedIngredient {
        name: "Plain Flour",
        food_group: "Grain",
        calories_per_100g: 364.0,
        is_vegan: true,
        is_vegetarian: true,
    },
    SeedIngredient {
        name: "Caster Sugar",
        food_group: "Sugar",
        calories_per_100g: 400.0,
        is_vegan: true,
        is_vegetarian: true,
    },
    SeedIngredient {
        name: "Free Range Eggs (Medium)",
        food_group: "Dairy & Eggs",
        calories_per_100g: 155.0,
        is_vegan: false,
        is_vegetarian: true,
    },
    SeedIngredient {
        name: "Unsalted Butter",
        food_group: "Dairy & Eggs",
        calories_per_100g: 717.0,
        is_vegan: false,
        is_vegetarian: true,
    },
    SeedIngredient {
        name: "Vegan Block (Butter Alternative)",
        food_group: "Fat & Oil",
        calories_per_100g: 720.0,
        is_vegan: true,
        is_vegetarian: true,
    },
    SeedIngredient {
        name: "Dark Chocolate (70%)",
        food_group: "Confectionery",
        calories_per_100g: 598.0,
        is_vegan: true,
        is_vegetarian: true,
    },
];

const SOURCES: &[SeedSource] = &[
    // Plain Flour
    ("Plain Flour", "Tesco", 0.80),
    ("Plain Flour", "ASDA", 0.75),
    ("Plain Flour", "Costco Wholesale", 0.50),
    ("Plain Flour", "Booker Wholesale", 0.45),
    // Caster Sugar
    ("Caster Sugar", "Tesco", 1.50),
    ("Caster Sugar", "ASDA", 1.45),
    ("Caster Sugar", "Booker Wholesale", 1.10),
    // Eggs
    ("Free Range Eggs (Medium)", "Tesco", 3.00),
    ("Free Range Eggs (Medium)", "ASDA", 2.90),
    // Butter
    ("Unsalted Butter", "Tesco", 7.00),
    ("Unsalted Butter", "ASDA", 6.95),
    ("Unsalted Butter", "Costco Wholesale", 6.50),
    // Vegan Block
    ("Vegan Block (Butter Alternative)", "Tesco", 8.00),
    ("Vegan Block (Butter Alternative)", "ASDA", 7.90),
    // Dark Chocolate
    ("Dark Chocolate (70%)", "Tesco", 10.00),
    ("Dark Chocolate (70%)", "Booker Wholesale", 8.50),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    logging::init_from_env()?;

    let config = ServerConfig::from_env()?;
    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database.url.to_connection_string());

    info!("Seeding catalog into {}", database_url);
    let database = Database::new(&database_url).await?;

    let retailer_ids = seed_retailers(&database).await?;
    let ingredient_ids = seed_ingredients(&database).await?;
    seed_sources(&database, &retailer_ids, &ingredient_ids).await?;

    info!("Seeding finished");
    Ok(())
}

async fn seed_retailers(database: &Database) -> Result<HashMap<&'static str, Uuid>> {
    let mut ids = HashMap::new();
    let mut created = 0_u32;

    for seed in RETAILERS {
        let id = match database.get_retailer_by_name(seed.name).await? {
            Some(existing) => existing.id,
            None => {
                created += 1;
                database
                    .create_retailer(&Retailer::new(
                        seed.name.to_owned(),
                        seed.website.to_owned(),
                        seed.volume_type,
                    ))
                    .await?
            }
        };
        ids.insert(seed.name, id);
    }

    info!("Retailers ready ({} created)", created);
    Ok(ids)
}

async fn seed_ingredients(database: &Database) -> Result<HashMap<&'static str, Uuid>> {
    let mut ids = HashMap::new();
    let mut created = 0_u32;

    for seed in INGREDIENTS {
        let id = match database.get_ingredient_by_name(seed.name).await? {
            Some(existing) => existing.id,
            None => {
                created += 1;
                database
                    .create_ingredient(&Ingredient::new(
                        seed.name.to_owned(),
                        seed.food_group.to_owned(),
                        seed.calories_per_100g,
                        seed.is_vegan,
                        seed.is_vegetarian,
                    ))
                    .await?
            }
        };
        ids.insert(seed.name, id);
    }

    info!("Ingredients ready ({} created)", created);
    Ok(ids)
}

async fn seed_sources(
    database: &Database,
    retailer_ids: &HashMap<&'static str, Uuid>,
    ingredient_ids: &HashMap<&'static str, Uuid>,
) -> Result<()> {
    for (ingredient_name, retailer_name, price_per_kg) in SOURCES {
        let ingredient_id = ingredient_ids
            .get(ingredient_name)
            .with_context(|| format!("Unknown seed ingredient: {ingredient_name}"))?;
        let retailer_id = retailer_ids
            .get(retailer_name)
            .with_context(|| format!("Unknown seed retailer: {retailer_name}"))?;

        database
            .create_ingredient_source(*ingredient_id, *retailer_id, *price_per_kg, Some("#"))
            .await?;
    }

    info!("Linked {} ingredient prices", SOURCES.len());
    Ok(())
}
