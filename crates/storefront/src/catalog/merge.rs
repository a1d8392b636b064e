//! Catalog merge: remote list first, fixtures filling the gaps.

use std::collections::HashSet;

use gadget_grove_core::ItemId;

use super::types::Product;

/// Merge the remote product list with bundled fixture lists.
///
/// Precedence is remote-first: the first occurrence of an id wins and
/// later duplicates are dropped, so a remote record always shadows a
/// fixture with the same id. Relative order within each source is kept.
#[must_use]
pub fn merge_catalog(remote: Vec<Product>, fixture_lists: &[&[Product]]) -> Vec<Product> {
    let mut seen: HashSet<ItemId> = HashSet::new();
    let mut merged = Vec::with_capacity(remote.len());

    for product in remote {
        if seen.insert(product.id.clone()) {
            merged.push(product);
        }
    }

    for list in fixture_lists {
        for product in *list {
            if seen.insert(product.id.clone()) {
                merged.push(product.clone());
            }
        }
    }

    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gadget_grove_core::{Currency, Money};

    fn product(id: &str, title: &str) -> Product {
        Product {
            id: ItemId::new(id),
            title: title.to_owned(),
            description: None,
            price: Money::new("100".parse().unwrap(), Currency::BDT),
            image: None,
            category: None,
            in_stock: true,
        }
    }

    #[test]
    fn test_remote_shadows_fixture() {
        let remote = vec![product("a", "remote a")];
        let fixtures = vec![product("a", "fixture a"), product("b", "fixture b")];
        let merged = merge_catalog(remote, &[&fixtures]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.first().unwrap().title, "remote a");
        assert_eq!(merged.get(1).unwrap().id, ItemId::new("b"));
    }

    #[test]
    fn test_empty_remote_falls_back_to_fixtures() {
        let fixtures = vec![product("a", "a"), product("b", "b")];
        let merged = merge_catalog(Vec::new(), &[&fixtures]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_multiple_fixture_lists_in_order() {
        let first = vec![product("a", "a"), product("b", "b")];
        let second = vec![product("b", "dup b"), product("c", "c")];
        let merged = merge_catalog(Vec::new(), &[&first, &second]);
        let ids: Vec<&str> = merged.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        // First occurrence won
        assert_eq!(merged.get(1).unwrap().title, "b");
    }

    #[test]
    fn test_duplicates_within_remote() {
        let remote = vec![product("a", "first"), product("a", "second")];
        let merged = merge_catalog(remote, &[]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.first().unwrap().title, "first");
    }

    #[test]
    fn test_everything_empty() {
        assert!(merge_catalog(Vec::new(), &[]).is_empty());
    }
}
