use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Course,
    Product,
}

impl ProductCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Product => "Product",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// List price in whole dollars.
    pub price: u32,
    pub category: ProductCategory,
    pub tags: Vec<String>,
    pub description: String,
    pub benefits: Vec<String>,
}
