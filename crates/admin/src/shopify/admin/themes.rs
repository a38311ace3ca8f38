//! Theme operations for the Admin API.

use async_trait::async_trait;
use theme_sections_core::{SectionFile, Theme, ThemeId, ThemeRole, UserError};
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError, GraphQLError,
    queries::{GetThemes, ThemeFileCreate, get_themes, theme_file_create},
};
use crate::shopify::ThemeAdmin;

impl AdminClient {
    /// Get the first `first` themes in server order.
    ///
    /// No pagination: themes past the first page are never fetched.
    ///
    /// Nodes that fail conversion are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response carries
    /// GraphQL errors.
    #[instrument(skip(self), fields(shop = %self.store()))]
    pub async fn get_themes(&self, first: usize) -> Result<Vec<Theme>, AdminShopifyError> {
        let variables = get_themes::Variables {
            first: i64::try_from(first).unwrap_or(i64::MAX),
        };

        let response = self.execute::<GetThemes>(variables).await?;

        Ok(response
            .themes
            .edges
            .into_iter()
            .filter_map(|edge| match convert_theme(edge.node) {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping theme");
                    None
                }
            })
            .collect())
    }

    /// Create a file on a theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation payload is
    /// missing. Rejections of the file itself come back as `Ok` user errors.
    #[instrument(skip(self, file), fields(shop = %self.store(), key = %file.key, theme_id = %file.theme_id))]
    pub async fn create_theme_file(
        &self,
        file: &SectionFile,
    ) -> Result<Vec<UserError>, AdminShopifyError> {
        let variables = theme_file_create::Variables {
            input: theme_file_create::ThemeFileInput {
                key: file.key.clone(),
                value: file.value.clone(),
                theme_id: file.theme_id.to_string(),
            },
        };

        let response = self.execute::<ThemeFileCreate>(variables).await?;

        let payload = response.theme_file_create.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError::message(
                "No payload returned from themeFileCreate",
            )])
        })?;

        Ok(payload
            .user_errors
            .into_iter()
            .map(|e| UserError {
                field: e.field,
                message: e.message,
            })
            .collect())
    }
}

fn convert_theme(node: get_themes::GetThemesThemesEdgesNode) -> Result<Theme, AdminShopifyError> {
    let id = ThemeId::parse(&node.id).map_err(|e| {
        AdminShopifyError::GraphQL(vec![GraphQLError::message(format!(
            "Invalid theme id in response: {e}"
        ))])
    })?;

    Ok(Theme {
        id,
        name: node.name,
        role: ThemeRole::from_graphql(&node.role),
    })
}

#[async_trait]
impl ThemeAdmin for AdminClient {
    async fn list_themes(&self, first: usize) -> Result<Vec<Theme>, AdminShopifyError> {
        self.get_themes(first).await
    }

    async fn create_theme_file(
        &self,
        file: &SectionFile,
    ) -> Result<Vec<UserError>, AdminShopifyError> {
        Self::create_theme_file(self, file).await
    }
}
