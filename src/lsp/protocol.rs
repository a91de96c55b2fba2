//! Conversions between core results and LSP types.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionOptions, CompletionTextEdit, DocumentLink,
    DocumentLinkOptions, Documentation, ExecuteCommandOptions, MarkupContent, MarkupKind,
    Position, Range, ServerCapabilities, TextDocumentSyncCapability, TextDocumentSyncKind,
    TextEdit, Url,
};

use crate::{
    config::{COMPLETION_TRIGGERS, OPEN_AT_POSITION_COMMAND},
    core::{Candidate, KeyLink, KeyPosition, ReplaceSpan},
};

pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(COMPLETION_TRIGGERS.iter().map(|c| c.to_string()).collect()),
            ..Default::default()
        }),
        document_link_provider: Some(DocumentLinkOptions {
            resolve_provider: Some(false),
            work_done_progress_options: Default::default(),
        }),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: vec![OPEN_AT_POSITION_COMMAND.to_string()],
            work_done_progress_options: Default::default(),
        }),
        ..Default::default()
    }
}

/// A completion item inserting `candidate.key`.
///
/// With a replace span the whole key between the quotes is replaced,
/// otherwise the editor inserts at the cursor.
pub fn completion_item(
    candidate: Candidate<'_>,
    line: u32,
    replace_span: Option<ReplaceSpan>,
) -> CompletionItem {
    let value = candidate.value.unwrap_or_default();

    CompletionItem {
        label: candidate.key.to_string(),
        kind: Some(CompletionItemKind::TEXT),
        detail: (!value.is_empty()).then(|| value.to_string()),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: format!("**{}**: {}", candidate.key, value),
        })),
        text_edit: replace_span.map(|span| {
            CompletionTextEdit::Edit(TextEdit {
                range: Range::new(
                    Position::new(line, span.start),
                    Position::new(line, span.end),
                ),
                new_text: candidate.key.to_string(),
            })
        }),
        ..Default::default()
    }
}

/// `command:` URI that runs the open-at-position command for a key definition.
///
/// The JSON argument array is percent-encoded as a whole, so `#`, `%` and
/// `?` in the path stay inside the query.
pub fn open_command_target(path: &Path, position: KeyPosition) -> Option<Url> {
    let arguments = serde_json::to_string(&(path, position.line, position.character)).ok()?;
    Url::parse(&format!(
        "command:{}?{}",
        OPEN_AT_POSITION_COMMAND,
        urlencoding::encode(&arguments)
    ))
    .ok()
}

pub fn document_link(link: &KeyLink) -> Option<DocumentLink> {
    Some(DocumentLink {
        range: Range::new(
            Position::new(link.start.0, link.start.1),
            Position::new(link.end.0, link.end.1),
        ),
        target: Some(open_command_target(&link.target_path, link.target)?),
        tooltip: Some(format!("Open translation for \"{}\"", link.key)),
        data: None,
    })
}

/// Arguments of the open-at-position command: `[path, line, character]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenRequest(pub PathBuf, pub u32, pub u32);

impl OpenRequest {
    pub fn from_arguments(arguments: Vec<Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Array(arguments))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn position(&self) -> Position {
        Position::new(self.1, self.2)
    }
}
