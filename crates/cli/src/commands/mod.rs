//! CLI command implementations.

pub mod migrate;
pub mod sections;

use theme_sections_admin::config::ConfigError;
use theme_sections_admin::db::RepositoryError;
use theme_sections_admin::shopify::AdminShopifyError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Repository query failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Admin API call failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// No install token is stored for the shop.
    #[error("App is not installed on {0}. Open the app from the Shopify admin first.")]
    NotInstalled(String),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The workflow ended in a failure result.
    #[error("{0}")]
    Workflow(String),
}
