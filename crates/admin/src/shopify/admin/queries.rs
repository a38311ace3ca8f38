//! GraphQL operation definitions for the Shopify Admin API.
//!
//! The operations live in `graphql/admin/queries/themes.graphql`. Each one
//! implements `graphql_client::GraphQLQuery` by hand with serde types that
//! mirror the selection set, so no schema dump is needed at build time.

use graphql_client::{GraphQLQuery, QueryBody};

const THEMES_DOCUMENT: &str = include_str!("../../../graphql/admin/queries/themes.graphql");

// =============================================================================
// Theme queries
// =============================================================================

/// `query GetThemes($first: Int!)`
pub struct GetThemes;

pub mod get_themes {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "GetThemes";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub themes: GetThemesThemes,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetThemesThemes {
        pub edges: Vec<GetThemesThemesEdges>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct GetThemesThemesEdges {
        pub node: GetThemesThemesEdgesNode,
    }

    /// `role` is the GraphQL `ThemeRole` enum (`MAIN`, `UNPUBLISHED`, ...).
    #[derive(Debug, Clone, Deserialize)]
    pub struct GetThemesThemesEdgesNode {
        pub id: String,
        pub name: String,
        pub role: String,
    }
}

impl GraphQLQuery for GetThemes {
    type Variables = get_themes::Variables;
    type ResponseData = get_themes::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: THEMES_DOCUMENT,
            operation_name: get_themes::OPERATION_NAME,
        }
    }
}

// =============================================================================
// Theme file mutations
// =============================================================================

/// `mutation ThemeFileCreate($input: ThemeFileInput!)`
pub struct ThemeFileCreate;

pub mod theme_file_create {
    use serde::{Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "ThemeFileCreate";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: ThemeFileInput,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ThemeFileInput {
        pub key: String,
        pub value: String,
        pub theme_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub theme_file_create: Option<ThemeFileCreatePayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ThemeFileCreatePayload {
        pub user_errors: Vec<ThemeFileCreateUserErrors>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ThemeFileCreateUserErrors {
        pub field: Option<Vec<String>>,
        pub message: String,
    }
}

impl GraphQLQuery for ThemeFileCreate {
    type Variables = theme_file_create::Variables;
    type ResponseData = theme_file_create::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: THEMES_DOCUMENT,
            operation_name: theme_file_create::OPERATION_NAME,
        }
    }
}
