pub mod config;
pub mod domain;
pub mod errors;
pub mod funnel;
pub mod sales;

pub use domain::conversation::{Message, Role, Transcript};
pub use domain::customer::CustomerProfile;
pub use domain::product::{Product, ProductCategory, ProductId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use funnel::{
    IntentClassifier, SelectionInput, SignalKind, SignalPatterns, SignalSet, Stage, StageDecision,
    StageRule, StageRuleId, StageSelector,
};
pub use sales::{
    BuiltinCatalog, Catalog, CatalogSource, JsonFileCatalog, OfferPricing, ProductMatcher,
};
