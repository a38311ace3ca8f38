//! Theme types and the active-theme selection rule.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ThemeId;

/// Number of themes requested from the Admin API.
///
/// Only the first page is ever read. A store whose published theme is not
/// among the first `THEME_PAGE_SIZE` entries resolves to "no active theme".
pub const THEME_PAGE_SIZE: usize = 10;

/// Role of a theme within the store.
///
/// The domain spelling is lowercase (`main`, `unpublished`, ...). The
/// Admin GraphQL API reports the same roles as `SCREAMING_CASE` enum
/// values; [`ThemeRole::from_graphql`] converts those at the client
/// boundary so the selection rule only ever compares domain values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeRole {
    /// The published theme customers see.
    Main,
    Unpublished,
    Demo,
    Development,
    Archived,
    Locked,
    /// Any role this app does not know about, kept verbatim.
    Other(String),
}

impl ThemeRole {
    /// Parse a domain role. Matching is exact and case-sensitive: `"Main"`
    /// is not the main role.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "main" => Self::Main,
            "unpublished" => Self::Unpublished,
            "demo" => Self::Demo,
            "development" => Self::Development,
            "archived" => Self::Archived,
            "locked" => Self::Locked,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Convert a GraphQL `ThemeRole` enum value (`MAIN`, `UNPUBLISHED`, ...).
    #[must_use]
    pub fn from_graphql(s: &str) -> Self {
        match s {
            "MAIN" => Self::Main,
            "UNPUBLISHED" => Self::Unpublished,
            "DEMO" => Self::Demo,
            "DEVELOPMENT" => Self::Development,
            "ARCHIVED" => Self::Archived,
            "LOCKED" => Self::Locked,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the domain spelling of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Main => "main",
            Self::Unpublished => "unpublished",
            Self::Demo => "demo",
            Self::Development => "development",
            Self::Archived => "archived",
            Self::Locked => "locked",
            Self::Other(s) => s,
        }
    }

    /// Whether this is the published (`main`) role.
    #[must_use]
    pub const fn is_main(&self) -> bool {
        matches!(self, Self::Main)
    }
}

impl fmt::Display for ThemeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ThemeRole {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ThemeRole> for String {
    fn from(role: ThemeRole) -> Self {
        role.as_str().to_owned()
    }
}

/// A theme in the merchant's store (read-only snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
    pub role: ThemeRole,
}

/// A theme known to carry the `main` role.
///
/// Only [`MainTheme::select`] produces one, so code that holds a
/// `MainTheme` has already passed the selection rule. Section files are
/// built from a `MainTheme`, never from a bare [`Theme`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainTheme(Theme);

impl MainTheme {
    /// Select the active theme from a theme list in server order.
    ///
    /// Looks at no more than the first [`THEME_PAGE_SIZE`] entries and
    /// returns the first whose role is `main`.
    ///
    /// ```
    /// use theme_sections_core::{MainTheme, Theme, ThemeId, ThemeRole};
    ///
    /// let themes = vec![
    ///     Theme { id: ThemeId::parse("T0").unwrap(), name: "Old".into(), role: ThemeRole::Unpublished },
    ///     Theme { id: ThemeId::parse("T1").unwrap(), name: "Dawn".into(), role: ThemeRole::Main },
    /// ];
    /// let main = MainTheme::select(themes).unwrap();
    /// assert_eq!(main.id().as_str(), "T1");
    /// ```
    pub fn select<I>(themes: I) -> Option<Self>
    where
        I: IntoIterator<Item = Theme>,
    {
        themes
            .into_iter()
            .take(THEME_PAGE_SIZE)
            .find(|theme| theme.role.is_main())
            .map(Self)
    }

    #[must_use]
    pub const fn id(&self) -> &ThemeId {
        &self.0.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Theme {
        self.0
    }
}
