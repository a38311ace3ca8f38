//! Theme commands that run against the configured store.
//!
//! # Environment Variables
//!
//! The full app configuration (see `AdminConfig::from_env`).

use theme_sections_admin::config::AdminConfig;
use theme_sections_admin::db::{self, ShopifyTokenRepository};
use theme_sections_admin::sections::{self, AdminContext};
use theme_sections_admin::shopify::AdminClient;
use theme_sections_core::THEME_PAGE_SIZE;

use super::CommandError;

/// Build an Admin API client holding the stored install token.
async fn installed_client() -> Result<AdminClient, CommandError> {
    let config = AdminConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let client = AdminClient::new(&config.shopify);
    let token = ShopifyTokenRepository::new(&pool)
        .get_by_shop(client.store().as_str())
        .await?
        .ok_or_else(|| CommandError::NotInstalled(client.store().to_string()))?;

    client.set_token(token.into()).await;
    Ok(client)
}

/// Print the first page of themes, one per line.
///
/// # Errors
///
/// Returns an error if the app is not installed or the request fails.
pub async fn list_themes() -> Result<(), CommandError> {
    let client = installed_client().await?;
    let themes = client.get_themes(THEME_PAGE_SIZE).await?;

    #[allow(clippy::print_stdout)]
    {
        for theme in &themes {
            println!("{}\t{}\t{}", theme.role, theme.id, theme.name);
        }
    }

    tracing::info!(count = themes.len(), "Listed themes");
    Ok(())
}

/// Run the add-section workflow and print the result JSON.
///
/// # Errors
///
/// Returns an error if the app is not installed, the publish request fails,
/// or the workflow ends in a failure result.
pub async fn add_section() -> Result<(), CommandError> {
    let client = installed_client().await?;
    let shop = client.store().clone();
    let ctx = AdminContext::new(&shop, &client);

    let outcome = sections::add_section(&ctx).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    }

    if outcome.result.is_success() {
        Ok(())
    } else {
        Err(CommandError::Workflow(format!(
            "Workflow ended in {}",
            outcome.stage.as_str()
        )))
    }
}
