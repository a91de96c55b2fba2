use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use serde_json::{Number, Value};

// A line whose only content before `//` is whitespace.
static LINE_COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*//.*$").unwrap());

/// Flattened projection of a translation document.
///
/// `keys` keeps the order keys were first encountered; `values` maps each of
/// them to the text of its leaf value. Both always hold the same key set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatIndex {
    keys: Vec<String>,
    values: HashMap<String, String>,
}

impl FlatIndex {
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.keys
            .iter()
            .map(|key| (key.as_str(), self.values[key].as_str()))
    }

    fn insert(&mut self, key: String, value: String) {
        // Last write wins for the value; the key keeps its first position.
        if self.values.insert(key.clone(), value).is_none() {
            self.keys.push(key);
        }
    }
}

/// Flatten a nested translation document into dotted keys.
///
/// Objects are walked depth-first in their declared order. Everything else,
/// arrays included, is a leaf rendered with [`value_text`]. A document whose
/// top level is not an object yields an empty index.
pub fn flatten(document: &Value) -> FlatIndex {
    let mut index = FlatIndex::default();
    if let Value::Object(map) = document {
        for (key, value) in map {
            flatten_value(value, key.clone(), &mut index);
        }
    }
    index
}

fn flatten_value(value: &Value, prefix: String, index: &mut FlatIndex) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                // An empty segment contributes no separator.
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_value(val, path, index);
            }
        }
        leaf => index.insert(prefix, value_text(leaf)),
    }
}

/// Text of a leaf value the way a JavaScript `String(value)` renders it.
///
/// `null` is `"null"`, arrays join their elements with `,` (null elements
/// become empty text) and objects are `[object Object]`.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if f.is_finite() => double_text(f),
        _ => n.to_string(),
    }
}

/// JavaScript `Number.prototype.toString()`: the shortest round-trip digits,
/// in exponent form below `1e-6` and from `1e21` up.
fn double_text(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let sign = if f < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest digits as `d.ddde<exp>`.
    let scientific = format!("{:e}", f.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let count = digits.len() as i32;
    // Decimal point position relative to the first digit.
    let point = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if count <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - count) as usize))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}.{}", whole, fraction)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else {
        let exp = point - 1;
        let exp_sign = if exp < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, exp_sign, exp.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exp_sign, exp.abs())
        }
    };

    format!("{}{}", sign, body)
}

/// Blank out whole-line `//` comments so commented JSON files still parse.
///
/// Only lines whose first non-whitespace characters are `//` are touched;
/// the line breaks stay in place.
pub fn strip_line_comments(content: &str) -> String {
    LINE_COMMENT_REGEX.replace_all(content, "").into_owned()
}

/// Parse translation file contents after removing whole-line comments.
pub fn parse_translation_source(content: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&strip_line_comments(content))
}
