//! Line items and the cart/wishlist list type.
//!
//! Cart and wishlist share one representation: an ordered list of line
//! items, unique by item id, serialized as JSON under a storage key scoped
//! by the current identity. All mutations go through [`ItemList`] so the
//! uniqueness invariant holds no matter which view triggered them.

use serde::{Deserialize, Serialize};

use gadget_grove_core::{Currency, Email, ItemId, Money};

/// A product entry with quantity inside a cart or wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub title: String,
    pub price: Money,
    pub quantity: u32,
    pub image: Option<String>,
}

impl LineItem {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// Result of an [`ItemList::add`] call.
///
/// Adding a duplicate is not an error: callers surface it as a transient
/// notification and the list stays untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Ordered list of line items, unique by item id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemList(Vec<LineItem>);

impl ItemList {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an item with quantity reset to 1.
    ///
    /// Returns [`AddOutcome::AlreadyPresent`] without mutating the list if
    /// an entry with the same id exists.
    pub fn add(&mut self, mut item: LineItem) -> AddOutcome {
        if self.contains(&item.id) {
            return AddOutcome::AlreadyPresent;
        }
        item.quantity = 1;
        self.0.push(item);
        AddOutcome::Added
    }

    /// Remove the entry with the given id. Returns `true` if one was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.0.len();
        self.0.retain(|item| &item.id != id);
        self.0.len() != before
    }

    /// Apply a signed delta to an entry's quantity, clamped to minimum 1.
    ///
    /// Returns `false` if no entry matches the id.
    pub fn adjust_quantity(&mut self, id: &ItemId, delta: i32) -> bool {
        let Some(item) = self.0.iter_mut().find(|item| &item.id == id) else {
            return false;
        };
        let current = i64::from(item.quantity);
        let adjusted = current.saturating_add(i64::from(delta)).max(1);
        item.quantity = u32::try_from(adjusted).unwrap_or(u32::MAX);
        true
    }

    /// Take the entry with the given id out of the list.
    pub fn take(&mut self, id: &ItemId) -> Option<LineItem> {
        let pos = self.0.iter().position(|item| &item.id == id)?;
        Some(self.0.remove(pos))
    }

    /// `true` if an entry with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.0.iter().any(|item| &item.id == id)
    }

    /// Number of entries (not quantities).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all quantities, for badge counts.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.0
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.0
            .iter()
            .fold(Money::zero(Currency::BDT), |acc, item| {
                acc.plus(&item.line_total())
            })
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.0.iter()
    }

    /// Consume the list into its entries.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Which of the two per-identity lists a key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Cart,
    Wishlist,
}

impl ListKind {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
        }
    }
}

/// Whose list a key addresses.
///
/// Signed-in users are keyed by their normalized email, so the same cart
/// follows them across sessions. Guests are keyed by session id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    Identity(Email),
    Guest(String),
}

impl ListScope {
    /// Derive the storage key for a list. Switching identity switches the
    /// effective list; there is no merging between scopes.
    #[must_use]
    pub fn storage_key(&self, kind: ListKind) -> String {
        match self {
            Self::Identity(email) => format!("{}:{}", kind.prefix(), email.as_str()),
            Self::Guest(session_id) => format!("{}:guest:{}", kind.prefix(), session_id),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64) -> LineItem {
        LineItem {
            id: ItemId::new(id),
            title: format!("Item {id}"),
            price: Money::bdt(price),
            quantity: 1,
            image: None,
        }
    }

    #[test]
    fn test_add_then_duplicate_add() {
        let mut list = ItemList::new();
        assert_eq!(list.add(item("a", 100)), AddOutcome::Added);
        assert_eq!(list.add(item("a", 100)), AddOutcome::AlreadyPresent);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_resets_quantity_to_one() {
        let mut list = ItemList::new();
        let mut entry = item("a", 100);
        entry.quantity = 5;
        list.add(entry);
        assert_eq!(list.iter().next().unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_only_item_empties_list() {
        let mut list = ItemList::new();
        list.add(item("a", 100));
        assert!(list.remove(&ItemId::new("a")));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_missing_id() {
        let mut list = ItemList::new();
        list.add(item("a", 100));
        assert!(!list.remove(&ItemId::new("b")));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_adjust_quantity_clamps_at_one() {
        let mut list = ItemList::new();
        list.add(item("a", 100));
        assert!(list.adjust_quantity(&ItemId::new("a"), -5));
        assert_eq!(list.iter().next().unwrap().quantity, 1);
    }

    #[test]
    fn test_adjust_quantity_up_and_down() {
        let mut list = ItemList::new();
        list.add(item("a", 100));
        list.adjust_quantity(&ItemId::new("a"), 3);
        assert_eq!(list.iter().next().unwrap().quantity, 4);
        list.adjust_quantity(&ItemId::new("a"), -2);
        assert_eq!(list.iter().next().unwrap().quantity, 2);
    }

    #[test]
    fn test_adjust_quantity_unknown_id() {
        let mut list = ItemList::new();
        assert!(!list.adjust_quantity(&ItemId::new("nope"), 1));
    }

    #[test]
    fn test_take_preserves_entry() {
        let mut list = ItemList::new();
        list.add(item("a", 100));
        list.add(item("b", 50));
        let taken = list.take(&ItemId::new("a")).unwrap();
        assert_eq!(taken.id, ItemId::new("a"));
        assert_eq!(list.len(), 1);
        assert!(list.take(&ItemId::new("a")).is_none());
    }

    #[test]
    fn test_subtotal_and_counts() {
        let mut list = ItemList::new();
        list.add(item("a", 100));
        list.add(item("b", 50));
        list.adjust_quantity(&ItemId::new("b"), 2);
        assert_eq!(list.subtotal(), Money::bdt(250));
        assert_eq!(list.total_quantity(), 4);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut list = ItemList::new();
        list.add(item("c", 1));
        list.add(item("a", 1));
        list.add(item("b", 1));
        let ids: Vec<&str> = list.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_serde_roundtrip_is_plain_array() {
        let mut list = ItemList::new();
        list.add(item("a", 100));
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.starts_with('['));
        let back: ItemList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn test_storage_key_per_identity() {
        let alice = ListScope::Identity(Email::parse("alice@example.com").unwrap());
        let bob = ListScope::Identity(Email::parse("bob@example.com").unwrap());
        assert_eq!(alice.storage_key(ListKind::Cart), "cart:alice@example.com");
        assert_ne!(
            alice.storage_key(ListKind::Cart),
            bob.storage_key(ListKind::Cart)
        );
        assert_ne!(
            alice.storage_key(ListKind::Cart),
            alice.storage_key(ListKind::Wishlist)
        );
    }

    #[test]
    fn test_storage_key_guest_scope() {
        let guest = ListScope::Guest("s-123".to_owned());
        assert_eq!(guest.storage_key(ListKind::Wishlist), "wishlist:guest:s-123");
    }

    #[test]
    fn test_storage_key_case_insensitive_identity() {
        // Email normalization means case variants address the same list
        let a = ListScope::Identity(Email::parse("Alice@Example.com").unwrap());
        let b = ListScope::Identity(Email::parse("alice@example.com").unwrap());
        assert_eq!(a.storage_key(ListKind::Cart), b.storage_key(ListKind::Cart));
    }
}
