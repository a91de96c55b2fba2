use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Locate Types (locate_translation_file)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocateTranslationFileParams {
    /// Absolute path of the project root to search
    pub project_root_path: String,
}

/// Result of locate_translation_file
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocateResult {
    pub found: bool,
    /// Absolute path of the translation file, when found
    pub file_path: Option<String>,
    /// Number of flattened keys, when the file was found and parsed
    pub key_count: Option<usize>,
    /// Parse or read failure, when the file was found but could not be loaded
    pub error: Option<String>,
    /// True if settings came from a .langkeyrc.json file
    pub config_from_file: bool,
}

// ============================================================
// Completion Types (complete_keys)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteKeysParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Partial key to filter by (case-insensitive substring). Omit to list all keys.
    pub partial_key: Option<String>,
    /// Number of items to skip (default: 0)
    pub offset: Option<u32>,
    /// Maximum number of items to return (default: 20, max: 100)
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteKeysResult {
    pub total_count: usize,
    pub items: Vec<KeyItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyItem {
    pub key: String,
    pub value: String,
}

// ============================================================
// Lookup Types (lookup_key)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupKeyParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Full dotted key, e.g. "common.ok"
    pub key: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupKeyResult {
    pub key: String,
    pub found: bool,
    pub value: Option<String>,
    pub file_path: String,
    /// Where the key is written in the file, when it can be found textually
    pub definition: Option<Location>,
}

/// One-based line and column (UTF-16 code units)
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

// ============================================================
// Link Types (find_links)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindLinksParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Source file to scan, relative to the project root or an absolute path inside it
    pub file_path: String,
    /// Match `$t(...)` calls even if the file extension is not configured for it
    pub alternate_syntax: Option<bool>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindLinksResult {
    pub file_path: String,
    pub translation_file: String,
    pub total_count: usize,
    pub links: Vec<LinkItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    pub key: String,
    /// Call site of the key in the scanned file
    pub start: Location,
    pub end: Location,
    /// Definition of the key in the translation file
    pub definition: Location,
}

// ============================================================
// Common Types
// ============================================================

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
