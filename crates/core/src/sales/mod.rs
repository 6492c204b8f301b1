pub mod catalog;
pub mod matcher;
pub mod pricing;

pub use catalog::{configured_source, BuiltinCatalog, Catalog, CatalogSource, JsonFileCatalog};
pub use matcher::ProductMatcher;
pub use pricing::{anchor_price, discounted_price, OfferPricing};
