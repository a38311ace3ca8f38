//! Core types for the theme sections app.
//!
//! This module provides type-safe wrappers for the domain concepts the
//! workflow passes around.

pub mod id;
pub mod section;
pub mod shop;
pub mod theme;
pub mod workflow;

pub use id::{ThemeId, ThemeIdError};
pub use section::{SECTION_DISPLAY_NAME, SectionFile, SectionName, UserError, slugify};
pub use shop::{ShopDomain, ShopDomainError};
pub use theme::{MainTheme, THEME_PAGE_SIZE, Theme, ThemeRole};
pub use workflow::{
    CREATE_FAILED_ERROR, NO_THEME_ERROR, SUCCESS_MESSAGE, WorkflowResult,
};
