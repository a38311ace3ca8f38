//! Shopify OAuth token repository.
//!
//! Stores the offline Admin API token obtained at install so the app keeps
//! working across restarts.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use super::RepositoryError;
use crate::shopify::OAuthToken;

// =============================================================================
// Types
// =============================================================================

/// A stored Shopify OAuth token.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyToken {
    /// Shop domain (e.g., your-store.myshopify.com).
    pub shop: String,
    /// Offline access token (redacted in debug output).
    pub access_token: SecretString,
    /// Granted scopes.
    pub scopes: Vec<String>,
    /// Unix timestamp when token was obtained.
    pub obtained_at: i64,
}

impl std::fmt::Debug for ShopifyToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyToken")
            .field("shop", &self.shop)
            .field("access_token", &"[REDACTED]")
            .field("scopes", &self.scopes)
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

impl From<ShopifyToken> for OAuthToken {
    fn from(token: ShopifyToken) -> Self {
        Self {
            access_token: token.access_token.expose_secret().to_string(),
            scope: token.scopes.join(","),
            obtained_at: token.obtained_at,
            shop: token.shop,
        }
    }
}

/// Internal row type for `PostgreSQL` queries.
#[derive(Debug, sqlx::FromRow)]
struct ShopifyTokenRow {
    shop: String,
    access_token: String,
    scope: String,
    obtained_at: i64,
    #[allow(dead_code)]
    updated_at: DateTime<Utc>,
}

impl From<ShopifyTokenRow> for ShopifyToken {
    fn from(row: ShopifyTokenRow) -> Self {
        Self {
            shop: row.shop,
            access_token: SecretString::from(row.access_token),
            scopes: split_scopes(&row.scope),
            obtained_at: row.obtained_at,
        }
    }
}

fn split_scopes(scope: &str) -> Vec<String> {
    scope
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for Shopify OAuth token database operations.
pub struct ShopifyTokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShopifyTokenRepository<'a> {
    /// Create a new Shopify token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the token for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_shop(&self, shop: &str) -> Result<Option<ShopifyToken>, RepositoryError> {
        let row = sqlx::query_as::<_, ShopifyTokenRow>(
            r"
            SELECT shop, access_token, scope, obtained_at, updated_at
            FROM app.shopify_token
            WHERE shop = $1
            ",
        )
        .bind(shop)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ShopifyToken::from))
    }

    /// Save or replace the token for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn save(&self, token: &OAuthToken) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO app.shopify_token (shop, access_token, scope, obtained_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (shop) DO UPDATE SET
                access_token = EXCLUDED.access_token,
                scope = EXCLUDED.scope,
                obtained_at = EXCLUDED.obtained_at,
                updated_at = NOW()
            ",
        )
        .bind(&token.shop)
        .bind(&token.access_token)
        .bind(split_scopes(&token.scope).join(","))
        .bind(token.obtained_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete the token for a shop (app uninstalled).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no token was stored, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, shop: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM app.shopify_token WHERE shop = $1")
            .bind(shop)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
