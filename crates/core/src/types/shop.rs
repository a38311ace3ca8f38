//! Shop domain type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ShopDomain`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopDomainError {
    /// The input string is empty.
    #[error("shop domain cannot be empty")]
    Empty,
    /// The input is not a `*.myshopify.com` host.
    #[error("shop domain must end with {}", ShopDomain::SUFFIX)]
    WrongSuffix,
    /// The store name contains characters Shopify never issues.
    #[error("shop domain contains invalid characters")]
    InvalidCharacters,
}

/// A `<store>.myshopify.com` domain.
///
/// Shopify passes the shop as a query parameter on app load and OAuth
/// callbacks, and as the `dest` claim of session tokens. Everything the app
/// receives is validated through this type before it is compared against
/// the configured store or used to build a URL.
///
/// ## Examples
///
/// ```
/// use theme_sections_core::ShopDomain;
///
/// assert!(ShopDomain::parse("pineapple.myshopify.com").is_ok());
/// assert!(ShopDomain::parse("https://pineapple.myshopify.com").is_ok());
///
/// assert!(ShopDomain::parse("").is_err());
/// assert!(ShopDomain::parse("evil.example.com").is_err());
/// assert!(ShopDomain::parse("a/b.myshopify.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Host suffix shared by every Shopify store.
    pub const SUFFIX: &'static str = ".myshopify.com";

    /// Parse a `ShopDomain`, accepting an optional `https://` scheme and a
    /// trailing slash (the `dest` claim of session tokens carries both).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is not a `myshopify.com`
    /// host, or the store name has characters outside `[a-z0-9-]`.
    pub fn parse(s: &str) -> Result<Self, ShopDomainError> {
        let host = s
            .trim()
            .trim_start_matches("https://")
            .trim_end_matches('/')
            .to_ascii_lowercase();

        if host.is_empty() {
            return Err(ShopDomainError::Empty);
        }

        let name = host
            .strip_suffix(Self::SUFFIX)
            .ok_or(ShopDomainError::WrongSuffix)?;

        if name.is_empty()
            || name.starts_with('-')
            || !name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ShopDomainError::InvalidCharacters);
        }

        Ok(Self(host))
    }

    /// Returns the domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the store handle (the part before `.myshopify.com`).
    #[must_use]
    pub fn handle(&self) -> &str {
        self.0.strip_suffix(Self::SUFFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ShopDomain {
    type Err = ShopDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShopDomain {
    type Error = ShopDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShopDomain> for String {
    fn from(shop: ShopDomain) -> Self {
        shop.0
    }
}
