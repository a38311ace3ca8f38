//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. `Content-Security-Policy: frame-ancestors` for the embedded page
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Session tokens are checked per handler via [`ShopifySession`].

pub mod auth;
pub mod headers;
pub mod session;

pub use auth::{RETRY_INVALID_SESSION_HEADER, SessionRejection, ShopifySession};
pub use headers::frame_ancestors_layer;
pub use session::{SESSION_COOKIE_NAME, create_session_layer, create_session_store, session_layer};
