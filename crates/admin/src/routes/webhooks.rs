//! Shopify webhook receivers.

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use secrecy::ExposeSecret;
use tracing::instrument;

use super::auth::served_shop;
use crate::auth::signature;
use crate::db::{RepositoryError, ShopifyTokenRepository};
use crate::error::AppError;
use crate::state::AppState;

const HMAC_HEADER: &str = "x-shopify-hmac-sha256";
const SHOP_HEADER: &str = "x-shopify-shop-domain";

pub fn router() -> Router<AppState> {
    Router::new().route("/webhooks/app-uninstalled", post(app_uninstalled))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// POST /webhooks/app-uninstalled - Forget the shop's access token.
#[instrument(skip_all)]
async fn app_uninstalled(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let signature_header = header(&headers, HMAC_HEADER)
        .ok_or_else(|| AppError::Unauthorized("Missing webhook signature".to_string()))?;

    if !signature::verify_webhook(
        &body,
        signature_header,
        state.shopify().api_secret().expose_secret(),
    ) {
        tracing::warn!("Invalid webhook signature");
        return Err(AppError::Unauthorized("Invalid webhook signature".to_string()));
    }

    let shop_header = header(&headers, SHOP_HEADER)
        .ok_or_else(|| AppError::BadRequest("Missing shop domain".to_string()))?;
    let shop = served_shop(&state, Some(shop_header))?;

    match ShopifyTokenRepository::new(state.pool())
        .delete(shop.as_str())
        .await
    {
        Ok(()) | Err(RepositoryError::NotFound) => {}
        Err(e) => return Err(e.into()),
    }
    state.shopify().clear_token().await;

    tracing::info!(%shop, "App uninstalled, access token removed");
    Ok(StatusCode::OK)
}
