//! User domain types.

use chrono::{DateTime, Utc};

use gadget_grove_core::{Email, Role, UserId};

/// A storefront account (domain type).
///
/// The password hash lives in a separate table and never leaves the
/// repository layer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
