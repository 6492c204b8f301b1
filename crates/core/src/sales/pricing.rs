use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Multiple of the list price quoted as the "do it yourself" anchor.
pub const ANCHOR_MULTIPLE: u64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferPricing {
    pub list_price: u32,
    pub discounted_price: u32,
    pub anchor_price: u64,
}

impl OfferPricing {
    pub fn for_product(product: &Product) -> Self {
        Self {
            list_price: product.price,
            discounted_price: discounted_price(product.price),
            anchor_price: anchor_price(product.price),
        }
    }
}

/// Share of the list price the customer pays on the special offer (70%).
pub fn offer_rate() -> Decimal {
    Decimal::new(7, 1)
}

/// `floor(price * 0.7)`, computed exactly.
pub fn discounted_price(price: u32) -> u32 {
    (Decimal::from(price) * offer_rate()).floor().to_u32().unwrap_or_default()
}

pub fn anchor_price(price: u32) -> u64 {
    u64::from(price) * ANCHOR_MULTIPLE
}
