//! Bundled product fixture lists.
//!
//! The store ships with static product lists compiled into the binary.
//! They back the catalog whenever the remote API is empty or unreachable,
//! and the merge layer deduplicates them against remote records by id.

use serde::Deserialize;

use super::types::Product;

const FEATURED_JSON: &str = include_str!("../../fixtures/featured.json");
const ACCESSORIES_JSON: &str = include_str!("../../fixtures/accessories.json");

/// All bundled fixture lists, parsed once at startup.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    featured: Vec<Product>,
    accessories: Vec<Product>,
}

impl FixtureSet {
    /// Parse the bundled fixture files.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled file is not valid JSON for a product
    /// list. This only happens when a fixture edit broke the format, so
    /// startup should fail loudly rather than serve a partial catalog.
    pub fn load() -> Result<Self, serde_json::Error> {
        Ok(Self {
            featured: parse_list(FEATURED_JSON)?,
            accessories: parse_list(ACCESSORIES_JSON)?,
        })
    }

    /// The fixture lists in precedence order.
    #[must_use]
    pub fn lists(&self) -> [&[Product]; 2] {
        [&self.featured, &self.accessories]
    }

    /// Total number of fixture products across all lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.featured.len() + self.accessories.len()
    }

    /// `true` if no fixture products are bundled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_list(json: &str) -> Result<Vec<Product>, serde_json::Error> {
    let products: Vec<Product> = Vec::<FixtureRecord>::deserialize(
        &mut serde_json::Deserializer::from_str(json),
    )?
    .into_iter()
    .map(FixtureRecord::into_product)
    .collect();
    Ok(products)
}

/// Fixture file record. Unlike remote records, fixtures always carry a
/// static `id` field.
#[derive(Debug, Deserialize)]
struct FixtureRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    price: gadget_grove_core::Money,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default = "default_true")]
    in_stock: bool,
}

const fn default_true() -> bool {
    true
}

impl FixtureRecord {
    fn into_product(self) -> Product {
        Product {
            id: gadget_grove_core::ItemId::new(self.id),
            title: self.title,
            description: self.description,
            price: self.price,
            image: self.image,
            category: self.category,
            in_stock: self.in_stock,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bundled_fixtures_parse() {
        let fixtures = FixtureSet::load().unwrap();
        assert!(!fixtures.is_empty());
        for list in fixtures.lists() {
            assert!(!list.is_empty());
        }
    }

    #[test]
    fn test_bundled_fixture_ids_unique() {
        let fixtures = FixtureSet::load().unwrap();
        let mut seen = HashSet::new();
        for list in fixtures.lists() {
            for product in list {
                assert!(seen.insert(product.id.clone()), "duplicate id {}", product.id);
            }
        }
    }
}
