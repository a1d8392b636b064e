//! Domain types for the remote commerce API.
//!
//! These types provide a clean API separate from the raw wire records.

use serde::{Deserialize, Serialize};

use gadget_grove_core::{ItemId, Money, OrderId};

/// A catalog product, from either the remote API or a bundled fixture list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

const fn default_true() -> bool {
    true
}

/// Raw product record as the remote API serves it.
///
/// Remote records carry a database id in `_id`; fixture-originated records
/// that the remote re-serves keep their static `id`. Whichever is present
/// first becomes the product identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(default, rename = "_id")]
    pub database_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl ProductRecord {
    /// Convert to a [`Product`], or `None` when the record has no usable id.
    #[must_use]
    pub fn into_product(self) -> Option<Product> {
        let id = ItemId::from_source_fields(self.database_id.as_deref(), self.id.as_deref())?;
        Some(Product {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            image: self.image,
            category: self.category,
            in_stock: self.in_stock,
        })
    }
}

/// Response body for a created order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedOrder {
    pub id: OrderId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_prefers_database_id() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"_id":"64fa","id":"fixture-1","title":"Watch","price":{"amount":"999"}}"#,
        )
        .unwrap();
        let product = record.into_product().unwrap();
        assert_eq!(product.id, ItemId::new("64fa"));
    }

    #[test]
    fn test_record_with_fixture_id_only() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id":"fixture-1","title":"Watch","price":{"amount":"999"}}"#)
                .unwrap();
        let product = record.into_product().unwrap();
        assert_eq!(product.id, ItemId::new("fixture-1"));
        assert!(product.in_stock);
    }

    #[test]
    fn test_record_without_any_id_is_dropped() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"title":"Watch","price":{"amount":"999"}}"#).unwrap();
        assert!(record.into_product().is_none());
    }
}
