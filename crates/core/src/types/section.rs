//! Section file naming and the theme file payload.

use core::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{MainTheme, ThemeId};

/// Display name of the section this app installs.
pub const SECTION_DISPLAY_NAME: &str = "Simple Template";

/// Derive a path-safe slug from a display name.
///
/// Lowercases the name and collapses every run of whitespace into a single
/// hyphen. Nothing else is touched, so a name that is already lowercase and
/// hyphenated comes back unchanged.
///
/// ```
/// use theme_sections_core::slugify;
///
/// assert_eq!(slugify("Simple Template 1700000000000"), "simple-template-1700000000000");
/// assert_eq!(slugify("A \t\n B"), "a-b");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            in_whitespace = false;
            slug.extend(c.to_lowercase());
        }
    }

    slug
}

/// Timestamped name of a section, e.g. `Simple Template 1700000000000`.
///
/// The millisecond timestamp is the only thing keeping two installs apart;
/// two requests landing in the same millisecond produce the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionName(String);

impl SectionName {
    /// Name stamped with the given epoch milliseconds.
    #[must_use]
    pub fn at(timestamp_millis: i64) -> Self {
        Self(format!("{SECTION_DISPLAY_NAME} {timestamp_millis}"))
    }

    /// Name stamped with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(Utc::now().timestamp_millis())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn slug(&self) -> String {
        slugify(&self.0)
    }

    /// Theme file key: `sections/<slug>.liquid`.
    #[must_use]
    pub fn file_key(&self) -> String {
        format!("sections/{}.liquid", self.slug())
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A theme file to be created on the active theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFile {
    pub key: String,
    pub value: String,
    pub theme_id: ThemeId,
}

impl SectionFile {
    /// Build the file for `theme`. Requires a [`MainTheme`], so a file can
    /// only exist once the active theme has been identified.
    #[must_use]
    pub fn new(theme: &MainTheme, key: String, value: String) -> Self {
        Self {
            key,
            value,
            theme_id: theme.id().clone(),
        }
    }
}

/// A field-level error returned by an Admin API mutation.
///
/// `field` is the input path Shopify blames (`["input", "key"]`) and is
/// `null` for errors that concern the whole request. Both fields are
/// passed through to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) if !field.is_empty() => write!(f, "{}: {}", field.join("."), self.message),
            _ => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Theme, ThemeRole};

    fn is_conforming_key(key: &str) -> bool {
        key.strip_prefix("sections/")
            .and_then(|rest| rest.strip_suffix(".liquid"))
            .is_some_and(|slug| {
                !slug.is_empty()
                    && slug
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            })
    }

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Simple Template 42"), "simple-template-42");
    }

    #[test]
    fn test_slugify_collapses_whitespace_runs() {
        assert_eq!(slugify("Simple   Template\t\t42"), "simple-template-42");
        assert_eq!(slugify(" leading"), "-leading");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for input in [
            "simple-template-1700000000000",
            "already-slugged",
            "Simple Template 1",
            "  Mixed  CASE  input ",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_section_name_format() {
        let name = SectionName::at(1_700_000_000_000);
        assert_eq!(name.as_str(), "Simple Template 1700000000000");
        assert_eq!(name.file_key(), "sections/simple-template-1700000000000.liquid");
    }

    #[test]
    fn test_file_keys_conform() {
        for ts in [0, 1, 1_700_000_000_000, i64::MAX] {
            let key = SectionName::at(ts).file_key();
            assert!(is_conforming_key(&key), "key: {key}");
        }
        assert!(is_conforming_key(&SectionName::now().file_key()));
    }

    #[test]
    fn test_section_file_takes_theme_id() {
        let main = MainTheme::select(vec![Theme {
            id: ThemeId::parse("T1").unwrap(),
            name: "Dawn".to_string(),
            role: ThemeRole::Main,
        }])
        .unwrap();

        let file = SectionFile::new(&main, "sections/x.liquid".to_string(), "body".to_string());
        assert_eq!(file.theme_id.as_str(), "T1");

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["themeId"], "T1");
        assert_eq!(json["key"], "sections/x.liquid");
    }

    #[test]
    fn test_user_error_display() {
        let err = UserError {
            field: Some(vec!["input".to_string(), "key".to_string()]),
            message: "is invalid".to_string(),
        };
        assert_eq!(err.to_string(), "input.key: is invalid");

        let err = UserError {
            field: None,
            message: "Theme is locked".to_string(),
        };
        assert_eq!(err.to_string(), "Theme is locked");
    }
}
