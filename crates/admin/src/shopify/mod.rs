//! Shopify Admin API client.
//!
//! # Security
//!
//! The client holds the store's offline access token, which can read and
//! write every theme in the store. The token is obtained through the OAuth
//! install flow (`/auth`) and is never sent to the browser.
//!
//! # Architecture
//!
//! - Uses `graphql_client` query bodies for the themes query and the
//!   theme file mutation
//! - Direct API calls to Shopify with `reqwest` (no local theme sync)
//! - The [`ThemeAdmin`] trait is the seam the add-section workflow talks
//!   to; [`AdminClient`] is the production implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use theme_sections_admin::shopify::{AdminClient, ThemeAdmin};
//!
//! let client = AdminClient::new(&config.shopify);
//! client.set_token(token).await;
//!
//! let themes = client.list_themes(10).await?;
//! ```

mod admin;

pub use admin::{AdminClient, OAuthToken};

use async_trait::async_trait;
use theme_sections_core::{SectionFile, Theme, UserError};
use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The app has not been installed yet (no access token cached).
    #[error("No access token - complete the OAuth install first")]
    NoAccessToken,

    /// OAuth code exchange failed.
    #[error("OAuth error: {0}")]
    OAuth(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    /// An error with only a message, for malformed responses.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Theme operations the add-section workflow needs from the Admin API.
#[async_trait]
pub trait ThemeAdmin: Send + Sync {
    /// List the first `first` themes in server order.
    async fn list_themes(&self, first: usize) -> Result<Vec<Theme>, AdminShopifyError>;

    /// Create a theme file. Returns the mutation's user errors, which are
    /// empty when the file was created.
    async fn create_theme_file(
        &self,
        file: &SectionFile,
    ) -> Result<Vec<UserError>, AdminShopifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_access_token_display() {
        let err = AdminShopifyError::NoAccessToken;
        assert_eq!(
            err.to_string(),
            "No access token - complete the OAuth install first"
        );
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError::message("Field 'themes' doesn't exist"),
            GraphQLError::message("Access denied for themes field"),
        ];
        let err = AdminShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field 'themes' doesn't exist; Access denied for themes field"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = AdminShopifyError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
