use anyhow::Result;
use tower_lsp::lsp_types::{
    CompletionItemKind, CompletionResponse, Documentation, MarkupContent, MarkupKind, Position,
    Range,
};

use crate::{LspTest, NESTED_EN_JSON, first_edit_range, labels};

#[tokio::test]
async fn test_completion_filters_partial_key() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let uri = test
        .open("src/app.ts", "typescript", "const a = Lang.t('com")
        .await;

    let response = test.complete(&uri, 0, 21).await;
    assert_eq!(first_edit_range(&response), None);
    assert_eq!(labels(response), vec!["common.ok", "common.cancel"]);

    Ok(())
}

#[tokio::test]
async fn test_completion_item_details() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let uri = test.open("src/app.ts", "typescript", "Lang.t('common.o").await;

    let Some(CompletionResponse::Array(items)) = test.complete(&uri, 0, 16).await else {
        panic!("expected completion items");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "common.ok");
    assert_eq!(items[0].kind, Some(CompletionItemKind::TEXT));
    assert_eq!(items[0].detail.as_deref(), Some("OK"));
    assert_eq!(
        items[0].documentation,
        Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: "**common.ok**: OK".to_string(),
        }))
    );

    Ok(())
}

#[tokio::test]
async fn test_completion_replaces_between_quotes() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let uri = test
        .open("src/app.ts", "typescript", "x\nLang.t('common.')")
        .await;

    let response = test.complete(&uri, 1, 15).await;
    assert_eq!(
        first_edit_range(&response),
        Some(Range::new(Position::new(1, 8), Position::new(1, 15)))
    );
    assert_eq!(labels(response), vec!["common.ok", "common.cancel"]);

    Ok(())
}

#[tokio::test]
async fn test_completion_outside_translation_call() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let uri = test
        .open("src/app.ts", "typescript", "const greeting = 'hel")
        .await;

    assert!(test.complete(&uri, 0, 21).await.is_none());
    // Past the end of the document.
    assert!(test.complete(&uri, 5, 0).await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_completion_unsupported_language() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let uri = test.open("src/lib.rs", "rust", "Lang.t('").await;

    assert!(test.complete(&uri, 0, 8).await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_completion_alternate_syntax_only_in_vue() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let vue = test
        .open("src/App.vue", "vue", "<p>{{ $t(\"errors.")
        .await;
    let ts = test
        .open("src/app.ts", "typescript", "<p>{{ $t(\"errors.")
        .await;

    assert_eq!(
        labels(test.complete(&vue, 0, 17).await),
        vec!["errors.notFound"]
    );
    assert!(test.complete(&ts, 0, 17).await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_completion_utf16_cursor() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    // The emoji is two UTF-16 code units.
    let uri = test
        .open("src/app.ts", "typescript", "😀 Lang.t('ok')")
        .await;

    let response = test.complete(&uri, 0, 13).await;
    assert_eq!(
        first_edit_range(&response),
        Some(Range::new(Position::new(0, 11), Position::new(0, 13)))
    );
    assert_eq!(labels(response), vec!["common.ok"]);

    Ok(())
}
