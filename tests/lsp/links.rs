use anyhow::Result;
use serde_json::json;
use tower_lsp::lsp_types::{Position, Range};

use crate::{FLAT_EN_JSON, LspTest, NESTED_EN_JSON, command_arguments};

const SOURCE: &str = "const a = Lang.t('common.ok');\nconst b = Lang.t('missing.key');\nLang.t('')\n";

#[tokio::test]
async fn test_document_links() -> Result<()> {
    let test = LspTest::with_translations(FLAT_EN_JSON).await?;
    let uri = test.open("src/app.ts", "typescript", SOURCE).await;

    let links = test.links(&uri).await.unwrap();
    assert_eq!(links.len(), 1);

    let link = &links[0];
    assert_eq!(
        link.range,
        Range::new(Position::new(0, 18), Position::new(0, 27))
    );
    assert_eq!(
        link.tooltip.as_deref(),
        Some("Open translation for \"common.ok\"")
    );

    let target = link.target.as_ref().unwrap();
    assert_eq!(target.scheme(), "command");
    assert_eq!(target.path(), "langkey.openAtPosition");

    let en_json = test.root().join("src/locales/en.json");
    assert_eq!(
        command_arguments(target),
        json!([en_json.to_string_lossy(), 1, 2])
    );

    Ok(())
}

#[tokio::test]
async fn test_document_links_idempotent() -> Result<()> {
    let test = LspTest::with_translations(FLAT_EN_JSON).await?;
    let uri = test.open("src/app.ts", "typescript", SOURCE).await;

    assert_eq!(test.links(&uri).await, test.links(&uri).await);

    Ok(())
}

#[tokio::test]
async fn test_document_links_nested_keys() -> Result<()> {
    let test = LspTest::with_translations(NESTED_EN_JSON).await?;
    let uri = test.open("src/app.ts", "typescript", SOURCE).await;

    assert_eq!(test.links(&uri).await, Some(Vec::new()));

    Ok(())
}

#[tokio::test]
async fn test_document_links_alternate_syntax() -> Result<()> {
    let test = LspTest::with_translations(FLAT_EN_JSON).await?;
    let text = "<template>{{ $t('errors.notFound') }} {{ Lang.t('common.cancel') }}</template>";
    let vue = test.open("src/App.vue", "vue", text).await;
    let ts = test.open("src/app.js", "javascript", text).await;

    let keys = |links: Option<Vec<tower_lsp::lsp_types::DocumentLink>>| -> Vec<String> {
        links
            .unwrap_or_default()
            .into_iter()
            .filter_map(|link| link.tooltip)
            .collect()
    };

    // Standard-form links come before alternate-form links.
    assert_eq!(
        keys(test.links(&vue).await),
        vec![
            "Open translation for \"common.cancel\"",
            "Open translation for \"errors.notFound\"",
        ]
    );
    assert_eq!(
        keys(test.links(&ts).await),
        vec!["Open translation for \"common.cancel\""]
    );

    Ok(())
}

#[tokio::test]
async fn test_execute_open_command() -> Result<()> {
    let test = LspTest::with_translations(FLAT_EN_JSON).await?;
    let en_json = test.root().join("src/locales/en.json");

    // The client cannot show documents in this harness; failures are reported, not returned.
    let result = test
        .execute(
            "langkey.openAtPosition",
            vec![json!(en_json.to_string_lossy()), json!(1), json!(2)],
        )
        .await;
    assert_eq!(result.unwrap(), None);

    let result = test
        .execute(
            "langkey.openAtPosition",
            vec![json!("/missing/en.json"), json!(0), json!(0)],
        )
        .await;
    assert_eq!(result.unwrap(), None);

    Ok(())
}

#[tokio::test]
async fn test_execute_rejects_bad_requests() -> Result<()> {
    let test = LspTest::with_translations(FLAT_EN_JSON).await?;

    assert!(test.execute("langkey.unknown", Vec::new()).await.is_err());
    assert!(
        test.execute("langkey.openAtPosition", vec![json!("only-a-path")])
            .await
            .is_err()
    );

    Ok(())
}
