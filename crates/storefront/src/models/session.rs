//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use gadget_grove_core::{Email, Role, UserId};

use super::user::User;

/// Session-stored identity of the signed-in user.
///
/// This record drives storage namespacing: cart and wishlist keys are
/// derived from its email. Switching identity switches the effective lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    /// `true` if this identity may use the admin panel.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current signed-in identity.
    pub const CURRENT_USER: &str = "current_user";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin() {
        #[allow(clippy::unwrap_used)]
        let email = Email::parse("a@b.c").unwrap();
        let user = CurrentUser {
            id: UserId::new(1),
            email,
            name: "A".to_owned(),
            role: Role::Customer,
        };
        assert!(!user.is_admin());
        let admin = CurrentUser {
            role: Role::Admin,
            ..user
        };
        assert!(admin.is_admin());
    }
}
