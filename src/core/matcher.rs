//! Recognizes translation calls in source text.
//!
//! Two call forms share one grammar:
//!
//! - `Lang.t('key')`, recognized in every file
//! - `$t('key')`, recognized only in alternate-syntax files (e.g. `.vue`)
//!
//! Either form may take a leading non-string argument before the key:
//! `Lang.t(count, 'items.total')`.
//!
//! The completion entry point matches an unfinished call ending at the
//! cursor; the link entry point finds complete quoted keys in a document.

use std::sync::LazyLock;

use regex::Regex;

use super::text::{byte_to_utf16, utf16_len, utf16_to_byte};

const STANDARD_HEAD: &str = r"Lang\s*\.\s*t\s*\(";
const ALTERNATE_HEAD: &str = r"\$t\s*\(";

// Optional leading argument that is not a string literal, followed by a comma.
const LEADING_ARGUMENT: &str = r#"\s*(?:[^,)'"]*,\s*)?"#;

// Opening quote and the key typed so far, up to the end of the prefix.
const OPEN_KEY: &str = r#"(['"`])([^'"]*)$"#;

// A complete key closed by the same quote on the same line.
const QUOTED_KEY: &str =
    "(?:'([^'\\n\\r\\u{2028}\\u{2029}]*)'|\"([^\"\\n\\r\\u{2028}\\u{2029}]*)\"|`([^`\\n\\r\\u{2028}\\u{2029}]*)`)";

/// The two call forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallForm {
    /// `Lang.t(...)`
    Standard,
    /// `$t(...)`
    Alternate,
}

impl CallForm {
    /// Forms recognized in a file, in matching order.
    pub fn enabled(alternate_syntax: bool) -> &'static [CallForm] {
        if alternate_syntax {
            &[CallForm::Standard, CallForm::Alternate]
        } else {
            &[CallForm::Standard]
        }
    }

    fn head(self) -> &'static str {
        match self {
            CallForm::Standard => STANDARD_HEAD,
            CallForm::Alternate => ALTERNATE_HEAD,
        }
    }

    fn prefix_regex(self) -> &'static Regex {
        match self {
            CallForm::Standard => &STANDARD_PREFIX_REGEX,
            CallForm::Alternate => &ALTERNATE_PREFIX_REGEX,
        }
    }

    fn call_regex(self) -> &'static Regex {
        match self {
            CallForm::Standard => &STANDARD_CALL_REGEX,
            CallForm::Alternate => &ALTERNATE_CALL_REGEX,
        }
    }
}

fn build(form: CallForm, tail: &str) -> Regex {
    Regex::new(&format!("{}{}{}", form.head(), LEADING_ARGUMENT, tail)).unwrap()
}

static STANDARD_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| build(CallForm::Standard, OPEN_KEY));
static ALTERNATE_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| build(CallForm::Alternate, OPEN_KEY));
static STANDARD_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| build(CallForm::Standard, QUOTED_KEY));
static ALTERNATE_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| build(CallForm::Alternate, QUOTED_KEY));

/// Columns to replace when a completion is accepted, in UTF-16 units.
///
/// `start` is just past the opening quote and `end` is the closing quote,
/// so the whole key between the quotes is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceSpan {
    pub start: u32,
    pub end: u32,
}

/// An unfinished translation call ending at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub form: CallForm,
    pub quote: char,
    /// Key text between the opening quote and the cursor.
    pub partial_key: String,
    pub replace_span: Option<ReplaceSpan>,
}

/// Match an unfinished translation call at the cursor.
///
/// `line_prefix` is the line up to the cursor, `line_text` the whole line and
/// `cursor` the cursor column in UTF-16 units. The standard form is tried
/// first; the alternate form only when `alternate_syntax` is set.
pub fn match_completion(
    line_prefix: &str,
    line_text: &str,
    cursor: usize,
    alternate_syntax: bool,
) -> Option<MatchResult> {
    let (form, captures) = CallForm::enabled(alternate_syntax)
        .iter()
        .find_map(|&form| form.prefix_regex().captures(line_prefix).map(|c| (form, c)))?;

    let quote = captures.get(1)?.as_str().chars().next()?;
    let partial_key = captures
        .get(2)
        .map_or(String::new(), |m| m.as_str().to_string());

    Some(MatchResult {
        form,
        quote,
        partial_key,
        replace_span: replace_span(line_prefix, line_text, cursor, quote),
    })
}

fn replace_span(line_prefix: &str, line_text: &str, cursor: usize, quote: char) -> Option<ReplaceSpan> {
    let open = line_prefix.rfind(quote)?;
    let from = utf16_to_byte(line_text, cursor);
    let close = from + line_text[from..].find(quote)?;

    Some(ReplaceSpan {
        start: (utf16_len(&line_prefix[..open]) + 1) as u32,
        end: byte_to_utf16(line_text, close) as u32,
    })
}

/// Split a line at a UTF-16 cursor column into the text before it.
pub fn line_prefix(line_text: &str, cursor: usize) -> &str {
    &line_text[..utf16_to_byte(line_text, cursor)]
}

/// A complete translation call found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub form: CallForm,
    pub key: String,
    /// Byte offset of the first key character.
    pub start: usize,
    /// Byte offset just past the last key character.
    pub end: usize,
}

/// Find every complete translation call in `text`.
///
/// All standard-form calls come first in document order, followed by the
/// alternate-form calls when `alternate_syntax` is set.
pub fn find_call_sites(text: &str, alternate_syntax: bool) -> Vec<CallSite> {
    CallForm::enabled(alternate_syntax)
        .iter()
        .flat_map(|&form| {
            form.call_regex().captures_iter(text).filter_map(move |captures| {
                let key = captures
                    .get(1)
                    .or_else(|| captures.get(2))
                    .or_else(|| captures.get(3))?;
                Some(CallSite {
                    form,
                    key: key.as_str().to_string(),
                    start: key.start(),
                    end: key.end(),
                })
            })
        })
        .collect()
}
