//! Outcome of the add-section workflow as seen by the caller.

use serde::{Deserialize, Serialize};

use super::UserError;

/// Message returned when the section file was created.
pub const SUCCESS_MESSAGE: &str = "Section added successfully!";

/// Error returned when the mutation came back with user errors.
pub const CREATE_FAILED_ERROR: &str = "Failed to create section";

/// Error returned when no theme with the `main` role was found.
pub const NO_THEME_ERROR: &str =
    "No active theme found. Please ensure your theme is active and has the role 'main'.";

/// Result of one add-section request.
///
/// Serializes to the JSON body the admin page consumes:
/// `{"message": ...}` on success, `{"error": ..., "details": [...]}` on
/// failure (`details` is omitted when there are none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkflowResult {
    Success {
        message: String,
    },
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<Vec<UserError>>,
    },
}

impl WorkflowResult {
    /// The section file was created.
    #[must_use]
    pub fn published() -> Self {
        Self::Success {
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    /// No active theme could be resolved; nothing was sent to Shopify.
    #[must_use]
    pub fn no_theme() -> Self {
        Self::Failure {
            error: NO_THEME_ERROR.to_string(),
            details: None,
        }
    }

    /// Shopify rejected the file with field-level errors.
    #[must_use]
    pub fn publish_failed(details: Vec<UserError>) -> Self {
        Self::Failure {
            error: CREATE_FAILED_ERROR.to_string(),
            details: Some(details),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_body() {
        let body = serde_json::to_value(WorkflowResult::published()).unwrap();
        assert_eq!(body, json!({ "message": "Section added successfully!" }));
    }

    #[test]
    fn test_no_theme_body_has_no_details() {
        let body = serde_json::to_value(WorkflowResult::no_theme()).unwrap();
        assert_eq!(
            body,
            json!({
                "error": "No active theme found. Please ensure your theme is active and has the role 'main'."
            })
        );
    }

    #[test]
    fn test_publish_failed_body_keeps_details_in_order() {
        let details = vec![
            UserError {
                field: Some(vec!["input".to_string(), "key".to_string()]),
                message: "Key is invalid".to_string(),
            },
            UserError {
                field: None,
                message: "Theme is locked".to_string(),
            },
        ];
        let body = serde_json::to_value(WorkflowResult::publish_failed(details)).unwrap();
        assert_eq!(
            body,
            json!({
                "error": "Failed to create section",
                "details": [
                    { "field": ["input", "key"], "message": "Key is invalid" },
                    { "field": null, "message": "Theme is locked" }
                ]
            })
        );
    }

    #[test]
    fn test_deserialize_distinguishes_variants() {
        let ok: WorkflowResult =
            serde_json::from_value(json!({ "message": "Section added successfully!" })).unwrap();
        assert!(ok.is_success());

        let err: WorkflowResult = serde_json::from_value(json!({ "error": "nope" })).unwrap();
        assert_eq!(
            err,
            WorkflowResult::Failure {
                error: "nope".to_string(),
                details: None
            }
        );
    }
}
