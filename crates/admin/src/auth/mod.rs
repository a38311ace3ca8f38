//! Shopify request authentication.
//!
//! Shopify proves a request came from it in three ways, all keyed on the
//! app's API secret:
//!
//! - [`signature::verify_query`] - signed query strings on app launch and OAuth
//!   callbacks
//! - [`signature::verify_webhook`] - `X-Shopify-Hmac-Sha256` header on webhooks
//! - [`session_token`] - HS256 JWTs App Bridge attaches to requests made
//!   from inside the admin

pub mod signature;
pub mod session_token;

pub use session_token::{SessionToken, SessionTokenClaims, SessionTokenError};
