//! Add-section orchestration.
//!
//! ```text
//! Start -> ResolvingTheme -> NoTheme                      (error)
//!                         -> Publishing -> PublishFailed  (error)
//!                                       -> Published      (success)
//! ```
//!
//! `NoTheme` is taken iff the resolver finds no `main` theme, and no
//! mutation is sent in that case.

use theme_sections_core::{SectionName, WorkflowResult};
use tracing::instrument;

use super::{AdminContext, publisher, resolver};
use crate::shopify::AdminShopifyError;

/// Workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ResolvingTheme,
    NoTheme,
    Publishing,
    PublishFailed,
    Published,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ResolvingTheme => "resolving_theme",
            Self::NoTheme => "no_theme",
            Self::Publishing => "publishing",
            Self::PublishFailed => "publish_failed",
            Self::Published => "published",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::NoTheme | Self::PublishFailed | Self::Published)
    }
}

/// Terminal stage reached by a run together with its caller-facing result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOutcome {
    pub stage: Stage,
    pub result: WorkflowResult,
}

/// Run the workflow with a section name stamped now.
///
/// # Errors
///
/// Returns the transport error if the publish step could not reach
/// Shopify. Resolution failures are never errors; they end in
/// [`Stage::NoTheme`].
pub async fn add_section(ctx: &AdminContext<'_>) -> Result<WorkflowOutcome, AdminShopifyError> {
    add_section_named(ctx, &SectionName::now()).await
}

/// Run the workflow with the given section name.
///
/// # Errors
///
/// Returns the transport error if the publish step could not reach
/// Shopify.
#[instrument(skip(ctx, name), fields(shop = %ctx.shop, stage = tracing::field::Empty))]
pub async fn add_section_named(
    ctx: &AdminContext<'_>,
    name: &SectionName,
) -> Result<WorkflowOutcome, AdminShopifyError> {
    let span = tracing::Span::current();
    let enter = |stage: Stage| {
        span.record("stage", stage.as_str());
        tracing::debug!(stage = stage.as_str(), "Workflow stage");
        stage
    };

    enter(Stage::Start);
    enter(Stage::ResolvingTheme);

    let Some(theme) = resolver::resolve_main_theme(ctx).await else {
        return Ok(WorkflowOutcome {
            stage: enter(Stage::NoTheme),
            result: WorkflowResult::no_theme(),
        });
    };

    enter(Stage::Publishing);

    let result = publisher::publish_named_section(ctx, &theme, name).await?;
    let stage = if result.is_success() {
        Stage::Published
    } else {
        Stage::PublishFailed
    };

    Ok(WorkflowOutcome {
        stage: enter(stage),
        result,
    })
}
