//! Opaque Shopify identifiers.
//!
//! Shopify hands out global IDs (`gid://shopify/OnlineStoreTheme/123`). The
//! app never interprets them; it only passes them back to the API. The
//! newtype keeps theme IDs from being mixed up with other strings such as
//! file keys or shop domains.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ThemeId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeIdError {
    /// The input string is empty or only whitespace.
    #[error("theme id cannot be empty")]
    Empty,
}

/// Identifier of a theme in the merchant's store.
///
/// ## Examples
///
/// ```
/// use theme_sections_core::ThemeId;
///
/// let id = ThemeId::parse("gid://shopify/OnlineStoreTheme/1").unwrap();
/// assert_eq!(id.as_str(), "gid://shopify/OnlineStoreTheme/1");
///
/// assert!(ThemeId::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeId(String);

impl ThemeId {
    /// Parse a `ThemeId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeIdError::Empty`] if the input is blank.
    pub fn parse(s: &str) -> Result<Self, ThemeIdError> {
        if s.trim().is_empty() {
            return Err(ThemeIdError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ThemeId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ThemeId {
    type Err = ThemeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ThemeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
