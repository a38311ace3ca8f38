//! Add-section workflow.
//!
//! One button press runs two steps against the Admin API:
//!
//! 1. [`resolver`] lists the first page of themes and picks the one with
//!    the `main` role.
//! 2. [`publisher`] renders the Liquid section and creates it as a file on
//!    that theme.
//!
//! [`workflow`] strings the two together and maps the outcome onto a
//! [`WorkflowResult`](theme_sections_core::WorkflowResult). All steps take
//! an explicit [`AdminContext`] instead of reaching for global state.

pub mod publisher;
pub mod resolver;
pub mod template;
pub mod workflow;

pub use publisher::{publish_named_section, publish_section};
pub use resolver::resolve_main_theme;
pub use workflow::{Stage, WorkflowOutcome, add_section, add_section_named};

use theme_sections_core::ShopDomain;

use crate::shopify::ThemeAdmin;

/// Authenticated admin session for one request.
///
/// Carries the shop the request acts on and the API handle authorized for
/// it. Built by the HTTP layer after the session token has been verified,
/// or by the CLI from the stored install token.
#[derive(Clone, Copy)]
pub struct AdminContext<'a> {
    pub shop: &'a ShopDomain,
    pub admin: &'a dyn ThemeAdmin,
}

impl<'a> AdminContext<'a> {
    #[must_use]
    pub const fn new(shop: &'a ShopDomain, admin: &'a dyn ThemeAdmin) -> Self {
        Self { shop, admin }
    }
}
