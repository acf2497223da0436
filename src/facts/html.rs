//! Regex-based access to the few HTML structures the scraped pages expose.
//!
//! The pages are not well-formed enough to be worth a DOM; the extractors only need table body
//! rows and the text of their cells.

use regex::Regex;
use std::sync::LazyLock;

static TBODY_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<tbody[^>]*>(.*?)</tbody>").expect("invalid regex"));
static ROW_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("invalid regex"));
static CELL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("invalid regex"));
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("invalid regex"));

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&auml;", "ä"),
    ("&ouml;", "ö"),
    ("&uuml;", "ü"),
    ("&Auml;", "Ä"),
    ("&Ouml;", "Ö"),
    ("&Uuml;", "Ü"),
    ("&szlig;", "ß"),
    ("&#39;", "'"),
    ("&quot;", "\""),
    ("&amp;", "&"),
];

/// Text of a markup fragment: tags removed, common entities decoded, whitespace trimmed.
#[must_use]
pub fn text_of(fragment: &str) -> String {
    let stripped = TAG_REGEX.replace_all(fragment, "");
    let decoded = ENTITIES
        .iter()
        .fold(stripped.into_owned(), |text, (entity, replacement)| text.replace(entity, replacement));
    decoded.trim().to_string()
}

/// The cell texts of every row inside any `<tbody>` of the document, in document order.
///
/// Rows without `<td>` cells (header rows) are skipped.
#[must_use]
pub fn body_rows(document: &str) -> Vec<Vec<String>> {
    TBODY_REGEX
        .captures_iter(document)
        .filter_map(|body| body.get(1))
        .flat_map(|body| ROW_REGEX.captures_iter(body.as_str()).filter_map(|row| row.get(1)).collect::<Vec<_>>())
        .map(|row| {
            CELL_REGEX
                .captures_iter(row.as_str())
                .filter_map(|cell| cell.get(1))
                .map(|cell| text_of(cell.as_str()))
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect()
}
