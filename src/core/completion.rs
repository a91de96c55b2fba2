use super::parsers::json::FlatIndex;

/// A key offered for completion, with its translated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

/// Keys containing `partial_key` as a case-insensitive substring, in index order.
///
/// An empty `partial_key` yields every key. The iterator is lazy and borrows
/// the index, so each request builds a fresh one.
pub fn complete<'a>(
    partial_key: &str,
    index: &'a FlatIndex,
) -> impl Iterator<Item = Candidate<'a>> + Clone + use<'a> {
    let needle = partial_key.to_lowercase();
    index
        .keys()
        .iter()
        .filter(move |key| needle.is_empty() || key.to_lowercase().contains(&needle))
        .map(|key| Candidate {
            key,
            value: index.get(key),
        })
}
