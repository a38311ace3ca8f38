//! Session token extractor for embedded app requests.
//!
//! Requests from the embedded page carry an App Bridge session token in the
//! `Authorization` header. The extractor verifies it against the app
//! credentials and checks that it was issued for the configured store.

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;

use crate::auth::{SessionToken, SessionTokenError};
use crate::state::AppState;

/// Response header asking App Bridge to retry with a fresh token.
pub const RETRY_INVALID_SESSION_HEADER: &str = "x-shopify-retry-invalid-session-request";

/// Extractor that requires a valid session token.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(ShopifySession(session): ShopifySession) -> impl IntoResponse {
///     format!("Hello, {}!", session.shop())
/// }
/// ```
pub struct ShopifySession(pub SessionToken);

/// Why a request was refused.
#[derive(Debug)]
pub enum SessionRejection {
    /// No `Authorization: Bearer` header.
    Missing,
    /// The token failed verification.
    Invalid(SessionTokenError),
    /// The token names a shop this app does not serve.
    WrongShop,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Missing => "Missing session token".to_string(),
            Self::Invalid(e) => format!("Invalid session token: {e}"),
            Self::WrongShop => "Session token issued for another shop".to_string(),
        };

        tracing::warn!(reason = %message, "Rejected session token");

        let mut response = (StatusCode::UNAUTHORIZED, message).into_response();
        response.headers_mut().insert(
            RETRY_INVALID_SESSION_HEADER,
            HeaderValue::from_static("1"),
        );
        response
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for ShopifySession {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(SessionRejection::Missing)?;
        let shopify = &state.config().shopify;

        let session = SessionToken::verify(
            token,
            &shopify.api_key,
            shopify.api_secret.expose_secret(),
            chrono::Utc::now().timestamp(),
        )
        .map_err(SessionRejection::Invalid)?;

        if session.shop() != &shopify.store {
            return Err(SessionRejection::WrongShop);
        }

        Ok(Self(session))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/app/sections");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc.def.ghi"))), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&parts(Some("Basic dXNlcg=="))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }

    #[test]
    fn test_rejection_asks_for_retry() {
        let response = SessionRejection::Invalid(SessionTokenError::Expired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(RETRY_INVALID_SESSION_HEADER).unwrap(),
            "1"
        );
    }
}
