//! End-to-end runs of the add-section workflow against the fake store.

#![allow(clippy::unwrap_used)]

use theme_sections_admin::sections::{AdminContext, Stage, add_section, add_section_named};
use theme_sections_core::{
    CREATE_FAILED_ERROR, NO_THEME_ERROR, SUCCESS_MESSAGE, SectionName, UserError, WorkflowResult,
};
use theme_sections_integration_tests::{FakeShopify, installed_client, test_config};

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

#[tokio::test]
async fn test_main_theme_receives_section() {
    let shopify = FakeShopify::new()
        .with_theme("T0", "Draft", "UNPUBLISHED")
        .with_theme("T1", "Live", "MAIN")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;
    let ctx = AdminContext::new(&config.shopify.store, &client);

    let outcome = add_section(&ctx).await.unwrap();

    assert_eq!(outcome.stage, Stage::Published);
    assert_eq!(
        outcome.result,
        WorkflowResult::Success {
            message: SUCCESS_MESSAGE.to_string()
        }
    );

    let mutations = shopify.requests_for("ThemeFileCreate");
    assert_eq!(mutations.len(), 1);
    let input = &mutations[0].variables["input"];
    assert_eq!(input["themeId"], "T1");

    let key = input["key"].as_str().unwrap();
    assert!(is_conforming_key(key), "key: {key}");

    let value = input["value"].as_str().unwrap();
    assert!(value.starts_with(&format!("<!-- {key} -->")));
    assert!(value.contains("{% schema %}"));
}

#[tokio::test]
async fn test_invalid_theme_does_not_hide_main() {
    let shopify = FakeShopify::new()
        .with_theme("", "Broken", "UNPUBLISHED")
        .with_theme("T1", "Live", "MAIN")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;
    let ctx = AdminContext::new(&config.shopify.store, &client);

    let outcome = add_section(&ctx).await.unwrap();

    assert_eq!(outcome.stage, Stage::Published);
    let mutations = shopify.requests_for("ThemeFileCreate");
    assert_eq!(mutations.len(), 1);
    assert_eq!(mutations[0].variables["input"]["themeId"], "T1");
}

#[tokio::test]
async fn test_empty_store_sends_no_mutation() {
    let shopify = FakeShopify::new().start().await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;
    let ctx = AdminContext::new(&config.shopify.store, &client);

    let outcome = add_section(&ctx).await.unwrap();

    assert_eq!(outcome.stage, Stage::NoTheme);
    assert_eq!(
        outcome.result,
        WorkflowResult::Failure {
            error: NO_THEME_ERROR.to_string(),
            details: None,
        }
    );
    assert_eq!(shopify.requests_for("GetThemes").len(), 1);
    assert!(shopify.requests_for("ThemeFileCreate").is_empty());
}

#[tokio::test]
async fn test_store_without_main_theme() {
    let shopify = FakeShopify::new()
        .with_theme("T0", "Draft", "UNPUBLISHED")
        .with_theme("T2", "Dev", "DEVELOPMENT")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;
    let ctx = AdminContext::new(&config.shopify.store, &client);

    let outcome = add_section(&ctx).await.unwrap();

    assert_eq!(outcome.stage, Stage::NoTheme);
    assert!(shopify.requests_for("ThemeFileCreate").is_empty());
}

#[tokio::test]
async fn test_themes_query_errors_end_in_no_theme() {
    let shopify = FakeShopify::new()
        .with_themes_error("Throttled")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;
    let ctx = AdminContext::new(&config.shopify.store, &client);

    let outcome = add_section(&ctx).await.unwrap();

    assert_eq!(outcome.result, WorkflowResult::no_theme());
    assert!(shopify.requests_for("ThemeFileCreate").is_empty());
}

#[tokio::test]
async fn test_user_errors_are_passed_through() {
    let shopify = FakeShopify::new()
        .with_theme("T1", "Live", "MAIN")
        .with_user_error(Some(&["input", "value"]), "Liquid syntax error")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;
    let ctx = AdminContext::new(&config.shopify.store, &client);

    let outcome = add_section_named(&ctx, &SectionName::at(1_760_000_000_000))
        .await
        .unwrap();

    assert_eq!(outcome.stage, Stage::PublishFailed);
    assert_eq!(
        outcome.result,
        WorkflowResult::Failure {
            error: CREATE_FAILED_ERROR.to_string(),
            details: Some(vec![UserError {
                field: Some(vec!["input".to_string(), "value".to_string()]),
                message: "Liquid syntax error".to_string(),
            }]),
        }
    );

    let mutations = shopify.requests_for("ThemeFileCreate");
    assert_eq!(
        mutations[0].variables["input"]["key"],
        "sections/simple-template-1760000000000.liquid"
    );
}

#[tokio::test]
async fn test_repeated_runs_create_distinct_files() {
    let shopify = FakeShopify::new()
        .with_theme("T1", "Live", "MAIN")
        .start()
        .await;
    let config = test_config();
    let client = installed_client(&config, &shopify).await;
    let ctx = AdminContext::new(&config.shopify.store, &client);

    add_section_named(&ctx, &SectionName::at(1)).await.unwrap();
    add_section_named(&ctx, &SectionName::at(2)).await.unwrap();

    let keys: Vec<String> = shopify
        .requests_for("ThemeFileCreate")
        .iter()
        .map(|r| r.variables["input"]["key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        keys,
        vec![
            "sections/simple-template-1.liquid".to_string(),
            "sections/simple-template-2.liquid".to_string(),
        ]
    );
}
