//! Active theme resolution.

use theme_sections_core::{MainTheme, THEME_PAGE_SIZE};
use tracing::instrument;

use super::AdminContext;

/// Find the store's active (`main`) theme.
///
/// Requests a single page of [`THEME_PAGE_SIZE`] themes and picks the
/// first entry whose role is `main`. Returns `None` when there is no such
/// entry on that page. Request and parse failures are logged and also
/// reported as `None`; they never reach the caller.
#[instrument(skip(ctx), fields(shop = %ctx.shop))]
pub async fn resolve_main_theme(ctx: &AdminContext<'_>) -> Option<MainTheme> {
    let themes = match ctx.admin.list_themes(THEME_PAGE_SIZE).await {
        Ok(themes) => themes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch themes");
            return None;
        }
    };

    tracing::debug!(count = themes.len(), ?themes, "Fetched themes");

    let main = MainTheme::select(themes);

    match &main {
        Some(theme) => tracing::info!(theme_id = %theme.id(), theme_name = %theme.name(), "Resolved active theme"),
        None => tracing::warn!("No active theme found"),
    }

    main
}

#[cfg(test)]
mod tests {
    use theme_sections_core::ShopDomain;

    use super::*;
    use crate::sections::testing::{FakeAdmin, theme};

    fn shop() -> ShopDomain {
        ShopDomain::parse("pineapple.myshopify.com").unwrap_or_else(|e| panic!("{e}"))
    }

    #[tokio::test]
    async fn test_resolves_the_main_theme() {
        let admin = FakeAdmin::with_themes(vec![theme("T0", "unpublished"), theme("T1", "main")]);
        let shop = shop();
        let ctx = AdminContext::new(&shop, &admin);

        let main = resolve_main_theme(&ctx).await;
        assert_eq!(main.map(|m| m.id().to_string()), Some("T1".to_string()));
    }

    #[tokio::test]
    async fn test_requests_one_page_of_ten() {
        let admin = FakeAdmin::with_themes(Vec::new());
        let shop = shop();
        let ctx = AdminContext::new(&shop, &admin);

        let _ = resolve_main_theme(&ctx).await;
        let calls = admin.list_calls.lock().map(|c| c.clone()).unwrap_or_default();
        assert_eq!(calls, vec![10]);
    }

    #[tokio::test]
    async fn test_empty_list_is_not_found() {
        let admin = FakeAdmin::with_themes(Vec::new());
        let shop = shop();
        let ctx = AdminContext::new(&shop, &admin);

        assert!(resolve_main_theme(&ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_main_beyond_first_page_is_not_found() {
        let mut themes: Vec<_> = (0..12).map(|i| theme(&format!("U{i}"), "unpublished")).collect();
        themes.push(theme("LATE", "main"));
        let admin = FakeAdmin::with_themes(themes);
        let shop = shop();
        let ctx = AdminContext::new(&shop, &admin);

        assert!(resolve_main_theme(&ctx).await.is_none());
    }

    #[tokio::test]
    async fn test_request_failure_is_not_found() {
        let admin = FakeAdmin::failing_list("Invalid API key or access token");
        let shop = shop();
        let ctx = AdminContext::new(&shop, &admin);

        assert!(resolve_main_theme(&ctx).await.is_none());
    }
}
