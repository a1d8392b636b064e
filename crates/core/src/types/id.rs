//! Newtype IDs for type-safe entity references.

use serde::{Deserialize, Serialize};

/// Identifier of a catalog item.
///
/// Products arrive from two sources: the remote commerce API (database ids)
/// and bundled fixture lists (static ids). A record may carry either field;
/// the first one present becomes the item's identifier. Both are compared
/// as plain strings, so this wrapper stores whichever was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an item ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Pick the identifier from a record that may carry a database id,
    /// a fixture id, or both. Database ids take precedence.
    #[must_use]
    pub fn from_source_fields(database_id: Option<&str>, fixture_id: Option<&str>) -> Option<Self> {
        database_id
            .or(fixture_id)
            .map(|id| Self(id.to_owned()))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of an order, assigned when the snapshot is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create an order ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database ID of a local storefront user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Create a new ID from an i32 value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the underlying i32 value.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for UserId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for UserId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for UserId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_prefers_database_id() {
        let id = ItemId::from_source_fields(Some("64fa12"), Some("fixture-7")).unwrap();
        assert_eq!(id.as_str(), "64fa12");
    }

    #[test]
    fn test_item_id_falls_back_to_fixture_id() {
        let id = ItemId::from_source_fields(None, Some("fixture-7")).unwrap();
        assert_eq!(id.as_str(), "fixture-7");
    }

    #[test]
    fn test_item_id_neither_field() {
        assert!(ItemId::from_source_fields(None, None).is_none());
    }

    #[test]
    fn test_item_id_string_comparison() {
        // Ids from different sources are equal when their strings match
        assert_eq!(ItemId::new("42"), ItemId::from("42"));
        assert_ne!(ItemId::new("42"), ItemId::new("042"));
    }

    #[test]
    fn test_user_id_roundtrip() {
        let id = UserId::new(7);
        assert_eq!(id.as_i32(), 7);
        assert_eq!(i32::from(id), 7);
        assert_eq!(UserId::from(7), id);
    }

    #[test]
    fn test_serde_transparent() {
        let id = ItemId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: ItemId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }
}
