use anyhow::Result;
use serde_json::json;
use tower_lsp::lsp_types::{CompletionResponse, DocumentLinkOptions};

use crate::{LspTest, NESTED_EN_JSON, labels};

#[tokio::test]
async fn test_initialize_capabilities() -> Result<()> {
    let test = LspTest::new()?;
    let result = test.initialize().await?;
    let capabilities = result.capabilities;

    let triggers = capabilities
        .completion_provider
        .and_then(|c| c.trigger_characters)
        .unwrap_or_default();
    assert_eq!(triggers, vec!["'", "\"", "`", ".", " "]);
    assert_eq!(
        capabilities.document_link_provider,
        Some(DocumentLinkOptions {
            resolve_provider: Some(false),
            work_done_progress_options: Default::default(),
        })
    );
    assert_eq!(
        capabilities.execute_command_provider.map(|c| c.commands),
        Some(vec!["langkey.openAtPosition".to_string()])
    );
    assert_eq!(result.server_info.map(|i| i.name).as_deref(), Some("langkey"));

    assert_eq!(test.server().store().roots(), vec![test.root().to_path_buf()]);

    Ok(())
}

#[tokio::test]
async fn test_watched_translation_change_invalidates_cache() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let uri = test.open("src/app.ts", "typescript", "Lang.t('").await;

    assert_eq!(labels(test.complete(&uri, 0, 8).await).len(), 3);

    test.write_file("src/locales/en.json", r#"{"fresh": "New"}"#)?;
    // Still served from the cache until the change is reported.
    assert_eq!(labels(test.complete(&uri, 0, 8).await).len(), 3);

    test.file_changed("src/locales/en.json").await;
    assert_eq!(labels(test.complete(&uri, 0, 8).await), vec!["fresh"]);

    Ok(())
}

#[tokio::test]
async fn test_any_reported_change_invalidates() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let uri = test.open("src/app.ts", "typescript", "Lang.t('").await;
    assert_eq!(labels(test.complete(&uri, 0, 8).await).len(), 3);

    // A client watching a wider glob reports files outside `watchPattern`.
    test.write_file("src/locales/en.json", r#"{"fresh": "New"}"#)?;
    test.write_file("src/locales/fr.json", "{}")?;
    test.file_changed("src/locales/fr.json").await;

    assert_eq!(labels(test.complete(&uri, 0, 8).await), vec!["fresh"]);

    Ok(())
}

#[tokio::test]
async fn test_config_change_reloads_settings() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    test.write_file("lang/strings.json", r#"{"other": "Other"}"#)?;
    let uri = test.open("src/app.ts", "typescript", "Lang.t('").await;
    assert_eq!(labels(test.complete(&uri, 0, 8).await).len(), 3);

    test.write_file(
        ".langkeyrc.json",
        &json!({ "translationPaths": ["lang/strings.json"] }).to_string(),
    )?;
    test.file_changed(".langkeyrc.json").await;

    assert_eq!(labels(test.complete(&uri, 0, 8).await), vec!["other"]);

    Ok(())
}

#[tokio::test]
async fn test_document_change_and_close() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let uri = test.open("src/app.ts", "typescript", "const x = 1;").await;
    assert!(test.complete(&uri, 0, 12).await.is_none());

    test.change(&uri, "Lang.t('err").await;
    assert_eq!(
        labels(test.complete(&uri, 0, 11).await),
        vec!["errors.notFound"]
    );

    test.close(&uri).await;
    assert!(test.complete(&uri, 0, 11).await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_missing_translation_file_yields_nothing() -> Result<()> {
    let test = LspTest::new()?;
    test.initialize().await?;
    let uri = test.open("src/app.ts", "typescript", "Lang.t('").await;

    // Reported to the user, and repeated failures do not error the request.
    assert!(test.complete(&uri, 0, 8).await.is_none());
    assert!(test.complete(&uri, 0, 8).await.is_none());
    assert!(test.links(&uri).await.is_none());

    test.write_file("i18n/en.json", r#"{"late": "Late"}"#)?;
    let response = test.complete(&uri, 0, 8).await;
    assert!(matches!(response, Some(CompletionResponse::Array(_))));
    assert_eq!(labels(response), vec!["late"]);

    Ok(())
}
