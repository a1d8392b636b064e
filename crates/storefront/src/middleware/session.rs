//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions, and derives
//! the item-list scope (account email or a per-session guest id) that keys
//! cart and wishlist storage.

use sqlx::PgPool;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use uuid::Uuid;

use crate::config::StorefrontConfig;
use crate::models::{CurrentUser, ListScope};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "gg_session";

/// Session key holding the guest list id.
const GUEST_ID_KEY: &str = "guest_id";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The sessions table must be created via migration before serving.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());

    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Derive the item-list scope for this request.
///
/// Signed-in accounts get an email-keyed scope, so their lists follow them
/// across devices. Guests get a random id stored in the session, minted on
/// first use.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn list_scope(
    session: &Session,
    user: Option<&CurrentUser>,
) -> Result<ListScope, tower_sessions::session::Error> {
    if let Some(user) = user {
        return Ok(ListScope::Identity(user.email.clone()));
    }

    if let Some(guest_id) = session.get::<String>(GUEST_ID_KEY).await? {
        return Ok(ListScope::Guest(guest_id));
    }

    let guest_id = Uuid::new_v4().to_string();
    session.insert(GUEST_ID_KEY, &guest_id).await?;
    Ok(ListScope::Guest(guest_id))
}
