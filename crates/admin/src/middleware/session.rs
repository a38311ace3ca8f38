//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The only value
//! kept in a session is the OAuth `state` nonce between `/auth` and
//! `/auth/callback`.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "theme_sections_session";

/// Sessions only need to outlive one install round trip.
const SESSION_EXPIRY_SECONDS: i64 = 10 * 60;

const SESSION_SCHEMA: &str = "app";
const SESSION_TABLE: &str = "session";

/// Create the session store in the `app` schema.
///
/// # Errors
///
/// Returns an error if the schema or table name is rejected by the store.
pub fn create_session_store(pool: &PgPool) -> Result<PostgresStore, sqlx::Error> {
    PostgresStore::new(pool.clone())
        .with_schema_name(SESSION_SCHEMA)
        .map_err(|e| sqlx::Error::Configuration(e.into()))?
        .with_table_name(SESSION_TABLE)
        .map_err(|e| sqlx::Error::Configuration(e.into()))
}

/// Wrap a store in the session layer.
///
/// `SameSite=Lax` so the cookie survives the top-level redirect back from
/// Shopify's consent screen.
#[must_use]
pub fn session_layer<S>(store: S, config: &AdminConfig) -> SessionManagerLayer<S>
where
    S: tower_sessions::SessionStore + Clone,
{
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

/// Create the `PostgreSQL` session layer.
///
/// # Errors
///
/// See [`create_session_store`].
pub fn create_session_layer(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<SessionManagerLayer<PostgresStore>, sqlx::Error> {
    Ok(session_layer(create_session_store(pool)?, config))
}
