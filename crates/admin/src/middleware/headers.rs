//! Response headers for pages embedded in the Shopify admin.

use axum::http::{HeaderValue, header};
use theme_sections_core::ShopDomain;
use tower_http::set_header::SetResponseHeaderLayer;

/// `Content-Security-Policy` allowing the app to be framed only by the
/// shop's admin.
#[must_use]
pub fn frame_ancestors_policy(shop: &ShopDomain) -> String {
    format!("frame-ancestors https://{shop} https://admin.shopify.com;")
}

/// Layer setting [`frame_ancestors_policy`] on every response.
#[must_use]
pub fn frame_ancestors_layer(shop: &ShopDomain) -> SetResponseHeaderLayer<HeaderValue> {
    // Shop domains are validated to [a-z0-9.-], always a valid header value
    let value = HeaderValue::from_str(&frame_ancestors_policy(shop))
        .unwrap_or_else(|_| HeaderValue::from_static("frame-ancestors https://admin.shopify.com;"));
    SetResponseHeaderLayer::overriding(header::CONTENT_SECURITY_POLICY, value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_ancestors_policy() {
        let shop = ShopDomain::parse("pineapple.myshopify.com").unwrap();
        assert_eq!(
            frame_ancestors_policy(&shop),
            "frame-ancestors https://pineapple.myshopify.com https://admin.shopify.com;"
        );
    }
}
