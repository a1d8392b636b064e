//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! gg-cli admin create -e admin@example.com -n "Admin Name" -p <password>
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL`
//!   connection string

use sqlx::PgPool;
use thiserror::Error;

use gadget_grove_core::Role;
use gadget_grove_storefront::services::{AuthError, AuthService};

/// Errors that can occur during admin account operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Account creation failed.
    #[error("Account error: {0}")]
    Auth(#[from] AuthError),
}

/// Create a new admin account.
///
/// # Errors
///
/// Returns an error if the database is unreachable, the email or password
/// is invalid, or an account with this email already exists.
pub async fn create_admin(email: &str, name: &str, password: &str) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| AdminError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    let pool = PgPool::connect(&database_url).await?;

    let service = AuthService::new(&pool);
    let user = service.register(email, name, password, Role::Admin).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "admin account created");
    Ok(())
}
