//! Embedded app page and the add-section endpoint.

use std::collections::BTreeMap;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use secrecy::ExposeSecret;
use theme_sections_core::WorkflowResult;
use tracing::instrument;

use super::auth::served_shop;
use crate::auth::signature;
use crate::error::{AppError, set_sentry_shop};
use crate::middleware::ShopifySession;
use crate::sections::{AdminContext, add_section};
use crate::state::AppState;

const PAGE_TITLE: &str = "Add Simple Template Section";

#[derive(Template)]
#[template(path = "sections/index.html")]
pub struct SectionsPageTemplate {
    pub api_key: String,
    pub shop: String,
    pub title: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/app", get(index))
        .route("/app/sections", post(create))
}

/// Workflow result as an HTTP response.
///
/// `Success` is 200 `{ "message" }`, `Failure` is 400
/// `{ "error", "details"? }`.
#[derive(Debug)]
pub struct SectionResponse(pub WorkflowResult);

impl IntoResponse for SectionResponse {
    fn into_response(self) -> Response {
        let status = if self.0.is_success() {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        (status, Json(self.0)).into_response()
    }
}

/// GET /app - Render the embedded page.
///
/// Shopify opens this URL with an HMAC-signed query. Before the app is
/// installed the merchant is sent through OAuth first.
#[instrument(skip(state, params))]
async fn index(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    if !signature::verify_query(&params, state.shopify().api_secret().expose_secret()) {
        return Err(AppError::Unauthorized("Invalid launch signature".to_string()));
    }

    let shop = served_shop(&state, params.get("shop").map(String::as_str))?;

    if !state.shopify().has_token().await {
        tracing::info!(%shop, "No access token, starting install");
        let url = format!("/auth?shop={}", urlencoding::encode(shop.as_str()));
        return Ok(Redirect::to(&url).into_response());
    }

    let template = SectionsPageTemplate {
        api_key: state.shopify().api_key().to_string(),
        shop: shop.to_string(),
        title: PAGE_TITLE,
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
    .into_response())
}

/// POST /app/sections - Add the section to the active theme.
#[instrument(skip(state, session), fields(shop = %session.shop()))]
async fn create(
    State(state): State<AppState>,
    ShopifySession(session): ShopifySession,
) -> Result<SectionResponse, AppError> {
    set_sentry_shop(session.shop().as_str());

    if !state.shopify().has_token().await {
        return Err(AppError::Unauthorized(
            "App is not installed for this shop".to_string(),
        ));
    }

    let ctx = AdminContext::new(session.shop(), state.shopify());
    let outcome = add_section(&ctx).await?;

    tracing::info!(stage = outcome.stage.as_str(), "Add section finished");
    Ok(SectionResponse(outcome.result))
}
