//! OAuth install routes.
//!
//! Installs the app on the configured store and persists the offline
//! Admin API token the workflow runs with.

use std::collections::BTreeMap;

use axum::{
    Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use theme_sections_core::ShopDomain;
use tower_sessions::Session;
use tracing::instrument;

use crate::auth::signature;
use crate::db::ShopifyTokenRepository;
use crate::error::AppError;
use crate::state::AppState;

const OAUTH_STATE_KEY: &str = "shopify_oauth_state";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth", get(install))
        .route("/auth/callback", get(callback))
}

#[derive(Debug, Deserialize)]
pub struct InstallParams {
    pub shop: Option<String>,
}

/// Resolve a `shop` query parameter against the configured store.
///
/// A missing parameter means the configured store.
pub(crate) fn served_shop(state: &AppState, shop: Option<&str>) -> Result<ShopDomain, AppError> {
    let store = state.shopify().store();
    let Some(raw) = shop else {
        return Ok(store.clone());
    };

    let shop = ShopDomain::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))?;
    if &shop != store {
        return Err(AppError::Forbidden(format!("{shop} is not served by this app")));
    }
    Ok(shop)
}

/// GET /auth - Start the OAuth install.
#[instrument(skip(state, session))]
async fn install(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<InstallParams>,
) -> Result<Response, AppError> {
    let shop = served_shop(&state, params.shop.as_deref())?;

    let oauth_state = uuid::Uuid::new_v4().to_string();
    session
        .insert(OAUTH_STATE_KEY, &oauth_state)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store OAuth state: {e}")))?;

    let auth_url = state.shopify().authorization_url(
        &state.config().oauth_redirect_uri(),
        &state.config().shopify.scopes,
        &oauth_state,
    );

    tracing::info!(%shop, "Redirecting to Shopify OAuth");
    Ok(Redirect::to(&auth_url).into_response())
}

/// GET /auth/callback - Finish the OAuth install.
#[instrument(skip(state, session, params))]
async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    if let Some(error) = params.get("error") {
        let description = params
            .get("error_description")
            .map(String::as_str)
            .unwrap_or_default();
        tracing::error!(%error, %description, "Shopify OAuth error");
        return Err(AppError::BadRequest(format!("OAuth denied: {error}")));
    }

    if !signature::verify_query(&params, state.shopify().api_secret().expose_secret()) {
        tracing::error!("Invalid HMAC signature in OAuth callback");
        return Err(AppError::Unauthorized("Invalid signature".to_string()));
    }

    let shop = served_shop(&state, params.get("shop").map(String::as_str))?;

    let code = params
        .get("code")
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;
    let callback_state = params
        .get("state")
        .ok_or_else(|| AppError::BadRequest("Missing state parameter".to_string()))?;

    let stored_state: Option<String> = session.get(OAUTH_STATE_KEY).await.ok().flatten();
    if stored_state.as_ref() != Some(callback_state) {
        tracing::error!("OAuth state mismatch");
        return Err(AppError::Unauthorized("Invalid state parameter".to_string()));
    }
    clear_oauth_state(&session).await;

    let token = state.shopify().exchange_code(code).await?;

    ShopifyTokenRepository::new(state.pool()).save(&token).await?;

    tracing::info!(%shop, scope = %token.scope, "App installed");

    let embedded_url = format!(
        "https://{shop}/admin/apps/{}",
        urlencoding::encode(state.shopify().api_key())
    );
    Ok(Redirect::to(&embedded_url).into_response())
}

/// Drop the OAuth nonce so it cannot be replayed. Returns `false` if the
/// session store failed and the nonce may still be stored.
async fn clear_oauth_state(session: &Session) -> bool {
    match session.remove::<String>(OAUTH_STATE_KEY).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to clear OAuth state from session");
            false
        }
    }
}
