//! Conversions between byte offsets and editor positions.
//!
//! Editors address text by zero-based line and UTF-16 column, while the
//! regex engine reports byte offsets. All columns produced by this crate are
//! UTF-16 code units.

/// Byte offsets where each line starts, for O(log n) position lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    /// Zero-based `(line, utf16_column)` of a byte offset into `content`.
    ///
    /// `content` must be the text this index was built from.
    pub fn position(&self, content: &str, offset: usize) -> (u32, u32) {
        let line = self.line_of(offset);
        let start = self.line_starts[line];
        let column = utf16_len(&content[start..offset]);
        (line as u32, column as u32)
    }
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte offset in `line` of the given UTF-16 column, clamped to the line length.
pub fn utf16_to_byte(line: &str, column: usize) -> usize {
    let mut units = 0;
    for (i, c) in line.char_indices() {
        if units >= column {
            return i;
        }
        units += c.len_utf16();
    }
    line.len()
}

/// UTF-16 column of the given byte offset in `line`.
pub fn byte_to_utf16(line: &str, offset: usize) -> usize {
    utf16_len(&line[..offset])
}

/// The zero-based `line` of `content`, without its terminator.
pub fn line_at(content: &str, line: usize) -> Option<&str> {
    content
        .split('\n')
        .nth(line)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}
