//! Integration tests for the Admin API client against the fake store.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;
use theme_sections_admin::shopify::{AdminShopifyError, ThemeAdmin};
use theme_sections_core::{MainTheme, SectionFile, ThemeRole, UserError};
use theme_sections_integration_tests::{
    ACCESS_TOKEN, API_VERSION, FakeShopify, client, installed_client, test_config,
};

#[tokio::test]
async fn test_get_themes_normalizes_roles() {
    let shopify = FakeShopify::new()
        .with_theme("gid://shopify/OnlineStoreTheme/1", "Dawn draft", "UNPUBLISHED")
        .with_theme("gid://shopify/OnlineStoreTheme/2", "Dawn", "MAIN")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;

    let themes = client.get_themes(10).await.unwrap();

    assert_eq!(themes.len(), 2);
    assert_eq!(themes[0].role, ThemeRole::Unpublished);
    assert_eq!(themes[1].role, ThemeRole::Main);
    assert_eq!(themes[1].id.as_str(), "gid://shopify/OnlineStoreTheme/2");
    assert_eq!(themes[1].name, "Dawn");
}

#[tokio::test]
async fn test_get_themes_skips_invalid_nodes() {
    let shopify = FakeShopify::new()
        .with_theme("", "Broken", "UNPUBLISHED")
        .with_theme("gid://shopify/OnlineStoreTheme/2", "Dawn", "MAIN")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;

    let themes = client.get_themes(10).await.unwrap();

    assert_eq!(themes.len(), 1);
    assert_eq!(themes[0].role, ThemeRole::Main);
    assert_eq!(themes[0].id.as_str(), "gid://shopify/OnlineStoreTheme/2");
}

#[tokio::test]
async fn test_malformed_response_is_a_parse_error() {
    let shopify = FakeShopify::new()
        .with_themes_body(r#"{"data": {"themes": "#)
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;

    let err = client.get_themes(10).await.unwrap_err();

    assert!(matches!(err, AdminShopifyError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_get_themes_request_shape() {
    let shopify = FakeShopify::new().start().await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;

    client.list_themes(10).await.unwrap();

    let requests = shopify.requests_for("GetThemes");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.api_version, API_VERSION);
    assert_eq!(request.access_token.as_deref(), Some(ACCESS_TOKEN));
    assert_eq!(request.variables, json!({ "first": 10 }));
    assert!(request.query.contains("themes(first: $first)"));
}

#[tokio::test]
async fn test_graphql_errors_are_reported() {
    let shopify = FakeShopify::new()
        .with_themes_error("Access denied for themes field.")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;

    let err = client.get_themes(10).await.unwrap_err();
    match err {
        AdminShopifyError::GraphQL(errors) => {
            assert_eq!(errors[0].message, "Access denied for themes field.");
        }
        other => panic!("expected GraphQL error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_requests_without_token_never_leave_the_process() {
    let shopify = FakeShopify::new().start().await;
    let config = test_config();
    let client = client(&config, &shopify);

    let err = client.get_themes(10).await.unwrap_err();
    assert!(matches!(err, AdminShopifyError::NoAccessToken));
    assert!(shopify.requests().is_empty());
}

#[tokio::test]
async fn test_create_theme_file_sends_input() {
    let shopify = FakeShopify::new().start().await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;

    let main = MainTheme::select(vec![theme_sections_core::Theme {
        id: theme_sections_core::ThemeId::parse("T1").unwrap(),
        name: "Dawn".to_string(),
        role: ThemeRole::Main,
    }])
    .unwrap();
    let file = SectionFile::new(
        &main,
        "sections/simple-template-1.liquid".to_string(),
        "<div></div>".to_string(),
    );

    let user_errors = client.create_theme_file(&file).await.unwrap();
    assert!(user_errors.is_empty());

    let requests = shopify.requests_for("ThemeFileCreate");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].variables,
        json!({
            "input": {
                "key": "sections/simple-template-1.liquid",
                "value": "<div></div>",
                "themeId": "T1"
            }
        })
    );
}

#[tokio::test]
async fn test_create_theme_file_returns_user_errors() {
    let shopify = FakeShopify::new()
        .with_user_error(Some(&["input", "key"]), "Key has already been taken")
        .with_user_error(None, "Theme is locked")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;

    let main = MainTheme::select(vec![theme_sections_core::Theme {
        id: theme_sections_core::ThemeId::parse("T1").unwrap(),
        name: "Dawn".to_string(),
        role: ThemeRole::Main,
    }])
    .unwrap();
    let file = SectionFile::new(&main, "sections/x.liquid".to_string(), String::new());

    let user_errors = client.create_theme_file(&file).await.unwrap();
    assert_eq!(
        user_errors,
        vec![
            UserError {
                field: Some(vec!["input".to_string(), "key".to_string()]),
                message: "Key has already been taken".to_string(),
            },
            UserError {
                field: None,
                message: "Theme is locked".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_create_theme_file_rate_limited() {
    let shopify = FakeShopify::new()
        .with_file_create_status(StatusCode::TOO_MANY_REQUESTS)
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;

    let main = MainTheme::select(vec![theme_sections_core::Theme {
        id: theme_sections_core::ThemeId::parse("T1").unwrap(),
        name: "Dawn".to_string(),
        role: ThemeRole::Main,
    }])
    .unwrap();
    let file = SectionFile::new(&main, "sections/x.liquid".to_string(), String::new());

    let err = client.create_theme_file(&file).await.unwrap_err();
    assert!(matches!(err, AdminShopifyError::RateLimited(60)));
}

#[tokio::test]
async fn test_exchange_code_caches_token() {
    let shopify = FakeShopify::new().start().await;
    let config = test_config();
    let client = client(&config, &shopify);

    let token = client.exchange_code("code-123").await.unwrap();

    assert_eq!(token.access_token, ACCESS_TOKEN);
    assert_eq!(token.shop, "pineapple.myshopify.com");
    assert!(client.has_token().await);
    assert_eq!(
        client.get_token().await.map(|t| t.scope),
        Some("read_themes,write_themes".to_string())
    );
    assert_eq!(shopify.oauth_codes(), vec!["code-123".to_string()]);

    client.clear_token().await;
    assert!(!client.has_token().await);
}
