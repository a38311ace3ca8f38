//! Section file creation on the active theme.

use theme_sections_core::{MainTheme, SectionFile, SectionName, WorkflowResult};
use tracing::instrument;

use super::{AdminContext, template};
use crate::shopify::AdminShopifyError;

/// Create a freshly named section file on `theme`.
///
/// The name is stamped with the current time in milliseconds.
///
/// # Errors
///
/// Returns the transport error if the mutation could not be sent or its
/// response could not be read. There is no retry.
pub async fn publish_section(
    ctx: &AdminContext<'_>,
    theme: &MainTheme,
) -> Result<WorkflowResult, AdminShopifyError> {
    publish_named_section(ctx, theme, &SectionName::now()).await
}

/// Create the section file for `name` on `theme`.
///
/// User errors from the mutation become a [`WorkflowResult::Failure`]
/// carrying them verbatim; an empty list means success.
///
/// # Errors
///
/// Returns the transport error if the mutation could not be sent or its
/// response could not be read.
#[instrument(skip(ctx, theme), fields(shop = %ctx.shop, theme_id = %theme.id(), name = %name))]
pub async fn publish_named_section(
    ctx: &AdminContext<'_>,
    theme: &MainTheme,
    name: &SectionName,
) -> Result<WorkflowResult, AdminShopifyError> {
    let key = name.file_key();
    let value = template::render_section(&key);
    let file = SectionFile::new(theme, key, value);

    let user_errors = ctx.admin.create_theme_file(&file).await?;

    if !user_errors.is_empty() {
        tracing::warn!(key = %file.key, ?user_errors, "Theme file creation rejected");
        return Ok(WorkflowResult::publish_failed(user_errors));
    }

    tracing::info!(key = %file.key, "Section file created");
    Ok(WorkflowResult::published())
}
