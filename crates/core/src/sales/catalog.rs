use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::product::{Product, ProductCategory, ProductId};
use crate::errors::{ApplicationError, DomainError};

/// Ordered, read-only list of sellable items. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn from_products(products: Vec<Product>) -> Result<Self, DomainError> {
        if products.is_empty() {
            return Err(DomainError::InvalidCatalog("catalog must not be empty".to_string()));
        }

        let mut seen = BTreeSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate product id {}",
                    product.id.0
                )));
            }
            if product.price == 0 {
                return Err(DomainError::InvalidCatalog(format!(
                    "product {} must have a positive price",
                    product.id.0
                )));
            }
        }

        Ok(Self { products })
    }

    pub fn builtin() -> Self {
        Self { products: builtin_products() }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Fallback item used when nothing in the catalog matched.
    pub fn first(&self) -> &Product {
        &self.products[0]
    }

    pub fn leading(&self, count: usize) -> &[Product] {
        &self.products[..count.min(self.products.len())]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

pub trait CatalogSource: Send + Sync {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Catalog, ApplicationError>;
}

#[derive(Clone, Debug, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn describe(&self) -> String {
        "builtin".to_string()
    }

    fn load(&self) -> Result<Catalog, ApplicationError> {
        Ok(Catalog::builtin())
    }
}

/// Reads a JSON array of products from disk.
#[derive(Clone, Debug)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn load(&self) -> Result<Catalog, ApplicationError> {
        let raw = fs::read_to_string(&self.path).map_err(|error| {
            ApplicationError::CatalogSource(format!(
                "could not read `{}`: {error}",
                self.path.display()
            ))
        })?;
        let products = serde_json::from_str::<Vec<Product>>(&raw).map_err(|error| {
            ApplicationError::CatalogSource(format!(
                "could not parse `{}`: {error}",
                self.path.display()
            ))
        })?;
        Ok(Catalog::from_products(products)?)
    }
}

/// Picks the JSON file source when a path is configured, the built-in catalog otherwise.
pub fn configured_source(path: Option<&Path>) -> Box<dyn CatalogSource> {
    match path {
        Some(path) => Box::new(JsonFileCatalog::new(path)),
        None => Box::new(BuiltinCatalog),
    }
}

fn product(
    id: u32,
    name: &str,
    price: u32,
    category: ProductCategory,
    tags: &[&str],
    description: &str,
    benefits: &[&str],
) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        price,
        category,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        description: description.to_string(),
        benefits: benefits.iter().map(|benefit| benefit.to_string()).collect(),
    }
}

fn builtin_products() -> Vec<Product> {
    use ProductCategory::{Course, Product as Tool};

    vec![
        product(
            1,
            "Premium Web Development Course",
            299,
            Course,
            &["programming", "web development", "javascript", "react"],
            "Master modern web development with React, Next.js, and TypeScript",
            &["Lifetime access", "Project-based learning", "Certificate of completion"],
        ),
        product(
            2,
            "Digital Marketing Mastery",
            199,
            Course,
            &["marketing", "business", "social media", "seo"],
            "Learn proven strategies to grow your business online",
            &["Real-world case studies", "Marketing templates", "Community access"],
        ),
        product(
            3,
            "AI & Machine Learning Bundle",
            399,
            Course,
            &["programming", "ai", "machine learning", "python"],
            "Become an AI expert with hands-on projects",
            &["GPU cloud credits", "Live coding sessions", "Career support"],
        ),
        product(
            4,
            "Professional Design Toolkit",
            149,
            Tool,
            &["design", "graphics", "creative", "templates"],
            "1000+ premium design templates and resources",
            &["Commercial license", "Regular updates", "Priority support"],
        ),
        product(
            5,
            "Business Automation Suite",
            249,
            Tool,
            &["business", "productivity", "automation", "saas"],
            "Automate your workflow and save 10+ hours per week",
            &["No-code setup", "Unlimited workflows", "Team collaboration"],
        ),
    ]
}
