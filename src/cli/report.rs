//! Report formatting and printing utilities.
//!
//! Key listings and links are printed in cargo-style format. Separate from
//! core logic so langkey can be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{
    Candidate, KeyLink, LookupError,
    text::{line_at, utf16_to_byte},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Gap between the key column and the value column.
const COLUMN_GAP: usize = 2;

/// `path` relative to `base` when it lies inside it.
pub fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Print candidates as an aligned `key  value` table to stdout.
pub fn print_keys(candidates: &[Candidate<'_>]) {
    print_keys_to(candidates, &mut io::stdout().lock());
}

/// Print candidates to a custom writer.
pub fn print_keys_to<W: Write>(candidates: &[Candidate<'_>], writer: &mut W) {
    let key_width = candidates
        .iter()
        .map(|c| UnicodeWidthStr::width(c.key))
        .max()
        .unwrap_or(0);

    for candidate in candidates {
        let padding = key_width - UnicodeWidthStr::width(candidate.key) + COLUMN_GAP;
        let value = candidate.value.unwrap_or_default().replace('\n', "\\n");
        let _ = writeln!(
            writer,
            "{}{:padding$}{}",
            candidate.key.bold(),
            "",
            value.dimmed(),
            padding = padding
        );
    }
}

/// Where the links of one source file point.
pub struct LinkReport<'a> {
    pub links: &'a [KeyLink],
    /// Contents of the scanned file.
    pub source: &'a str,
    pub file_display: &'a str,
    pub target_display: &'a str,
}

/// Print links in cargo-style format to stdout.
pub fn print_links(report: &LinkReport<'_>) {
    print_links_to(report, &mut io::stdout().lock());
}

/// Print links to a custom writer.
pub fn print_links_to<W: Write>(report: &LinkReport<'_>, writer: &mut W) {
    let max_line_width = report
        .links
        .iter()
        .map(|link| (link.start.0 + 1).to_string().len())
        .max()
        .unwrap_or(1);

    for link in report.links {
        print_link(link, report, writer, max_line_width);
    }

    let count = report.links.len();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Found {} {} in {}",
            count,
            if count == 1 { "link" } else { "links" },
            report.file_display
        )
        .green()
    );
}

fn print_link<W: Write>(
    link: &KeyLink,
    report: &LinkReport<'_>,
    writer: &mut W,
    max_line_width: usize,
) {
    let (line, column) = link.start;

    let _ = writeln!(writer, "{}: \"{}\"", "link".bold().cyan(), link.key);
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        report.file_display,
        line + 1,
        column + 1
    );

    if let Some(source_line) = line_at(report.source, line as usize) {
        let start = utf16_to_byte(source_line, column as usize);
        let end = utf16_to_byte(source_line, link.end.1 as usize);
        let caret_padding = UnicodeWidthStr::width(&source_line[..start]);
        let caret_count = UnicodeWidthStr::width(&source_line[start..end]).max(1);

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            (line + 1).to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            "^".repeat(caret_count).cyan(),
            width = max_line_width,
            padding = caret_padding
        );
    }

    let _ = writeln!(
        writer,
        "{:>width$} {} {} {}:{}:{}",
        "",
        "=".blue(),
        "defined at:".bold(),
        report.target_display,
        link.target.line + 1,
        link.target.character + 1,
        width = max_line_width
    );
    let _ = writeln!(writer);
}

/// Print a lookup failure to stderr.
pub fn print_lookup_error(err: &LookupError) {
    print_lookup_error_to(err, &mut io::stderr().lock());
}

/// Print a lookup failure to a custom writer.
pub fn print_lookup_error_to<W: Write>(err: &LookupError, writer: &mut W) {
    let label = if err.is_warning() {
        "warning:".bold().yellow()
    } else {
        "error:".bold().red()
    };
    let _ = writeln!(writer, "{} {}", label, err);
}

/// Print a warning to stderr.
pub fn print_warning(message: &str) {
    let _ = writeln!(
        io::stderr().lock(),
        "{} {}",
        "warning:".bold().yellow(),
        message
    );
}
