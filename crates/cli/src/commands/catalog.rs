use pitchcraft_core::config::{AppConfig, LoadOptions};
use pitchcraft_core::domain::product::Product;
use pitchcraft_core::sales::catalog::configured_source;
use pitchcraft_core::sales::pricing::OfferPricing;
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct CatalogEntry {
    id: u32,
    name: String,
    category: &'static str,
    tags: Vec<String>,
    list_price: u32,
    discounted_price: u32,
    anchor_price: u64,
}

#[derive(Debug, Serialize)]
struct CatalogReport {
    command: &'static str,
    status: &'static str,
    source: String,
    products: Vec<CatalogEntry>,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("catalog", "config_validation", error.to_string(), 2)
        }
    };

    let source = configured_source(config.catalog.path.as_deref());
    let catalog = match source.load() {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure("catalog", "catalog_load", error.to_string(), 3)
        }
    };

    CommandResult::report(&CatalogReport {
        command: "catalog",
        status: "ok",
        source: source.describe(),
        products: catalog.products().iter().map(entry).collect(),
    })
}

fn entry(product: &Product) -> CatalogEntry {
    let pricing = OfferPricing::for_product(product);
    CatalogEntry {
        id: product.id.0,
        name: product.name.clone(),
        category: product.category.label(),
        tags: product.tags.clone(),
        list_price: pricing.list_price,
        discounted_price: pricing.discounted_price,
        anchor_price: pricing.anchor_price,
    }
}
