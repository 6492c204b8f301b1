use crate::domain::product::Product;
use crate::sales::catalog::Catalog;

/// Narrows the catalog to items related to the customer's interests or the latest message.
///
/// An item is relevant when an interest appears inside its space-joined tag string, or when
/// one of its tags appears inside the latest message. A blank interest is a substring of every
/// tag string and so matches the whole catalog. Output keeps catalog order and may be empty;
/// choosing a fallback item is the caller's decision.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProductMatcher;

impl ProductMatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn matches<'a>(
        &self,
        catalog: &'a Catalog,
        interests: &[String],
        latest_message: &str,
    ) -> Vec<&'a Product> {
        let interests = interests
            .iter()
            .map(|interest| interest.trim().to_lowercase())
            .collect::<Vec<_>>();
        let message = latest_message.to_lowercase();

        catalog
            .products()
            .iter()
            .filter(|product| {
                interest_match(product, &interests) || message_match(product, &message)
            })
            .collect()
    }
}

fn interest_match(product: &Product, interests: &[String]) -> bool {
    let joined_tags = product.tags.join(" ").to_lowercase();
    interests.iter().any(|interest| joined_tags.contains(interest.as_str()))
}

fn message_match(product: &Product, message: &str) -> bool {
    product.tags.iter().any(|tag| message.contains(tag.to_lowercase().as_str()))
}
