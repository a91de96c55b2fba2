use std::path::PathBuf;

use regex::Regex;

use super::{
    matcher::{CallForm, find_call_sites},
    store::Snapshot,
    text::{LineIndex, byte_to_utf16},
};

/// Zero-based line and UTF-16 column in the translation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPosition {
    pub line: u32,
    pub character: u32,
}

/// Find where `key` is defined in the translation file contents.
///
/// Flattened keys are looked up literally: the first line containing
/// `"<key>"` followed by a colon wins, otherwise the first line containing
/// `"<key>"` anywhere. Nested keys (`common.ok` written as `"ok"` inside
/// `"common"`) therefore only resolve through the second rule if the dotted
/// text happens to appear quoted somewhere.
pub fn find_key_definition(source: &str, key: &str) -> Option<KeyPosition> {
    let quoted = format!("\"{}\"", key);
    let pattern = Regex::new(&format!(r#""{}"\s*:"#, regex::escape(key))).ok()?;

    let lines: Vec<&str> = source.split('\n').collect();

    let position = |line: usize, offset: usize| KeyPosition {
        line: line as u32,
        character: byte_to_utf16(lines[line], offset) as u32,
    };

    if let Some((line, m)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, text)| pattern.find(text).map(|m| (i, m)))
    {
        return Some(position(line, m.start()));
    }

    lines
        .iter()
        .enumerate()
        .find_map(|(i, text)| text.find(&quoted).map(|offset| position(i, offset)))
}

/// A resolved translation call in a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLink {
    pub key: String,
    pub form: CallForm,
    /// Zero-based `(line, utf16_column)` of the first key character.
    pub start: (u32, u32),
    /// Zero-based `(line, utf16_column)` just past the last key character.
    pub end: (u32, u32),
    /// Translation file containing the key.
    pub target_path: PathBuf,
    pub target: KeyPosition,
}

/// Links for every call in `text` whose key exists in the snapshot.
///
/// Calls with empty keys, unknown keys, or keys whose definition cannot be
/// found in the translation file produce nothing.
pub fn document_links(text: &str, alternate_syntax: bool, snapshot: &Snapshot) -> Vec<KeyLink> {
    let line_index = LineIndex::new(text);

    find_call_sites(text, alternate_syntax)
        .into_iter()
        .filter(|site| !site.key.is_empty() && snapshot.index.contains_key(&site.key))
        .filter_map(|site| {
            let target = find_key_definition(&snapshot.source, &site.key)?;
            Some(KeyLink {
                start: line_index.position(text, site.start),
                end: line_index.position(text, site.end),
                target_path: snapshot.path.clone(),
                target,
                form: site.form,
                key: site.key,
            })
        })
        .collect()
}
