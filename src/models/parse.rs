//! Parsed document shapes supplied by the document parsing adapter.
//!
//! The actual PDF parsing happens upstream; this module only owns the
//! output contract: concatenated document text plus a page map whose
//! offsets index into that concatenation.

use serde::{Deserialize, Serialize};

/// Maps a character-offset range in the concatenated text to a source page.
///
/// Entries are non-overlapping, in ascending page order, and containment is
/// inclusive at both ends (`start <= offset <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMapEntry {
    /// 1-based page number.
    pub page: u32,
    pub start: usize,
    pub end: usize,
}

/// A single parsed page with its text and offsets into the concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPage {
    pub page_number: u32,
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Full output of the document parsing adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    #[serde(rename = "parsedText")]
    pub parsed_text: String,
    #[serde(rename = "pageMap")]
    pub page_map: Vec<PageMapEntry>,
    pub pages: Vec<ParsedPage>,
}

impl ParseResult {
    /// Build a consistent concatenation and page map from per-page text.
    ///
    /// Pages are joined with a single newline; each entry's end offset is
    /// the index just past the page's last character, and the next page
    /// starts one past that (the separator occupies the gap).
    pub fn from_pages<I>(texts: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut pages = Vec::new();
        let mut offset = 0usize;

        for (index, text) in texts.into_iter().enumerate() {
            let start_offset = offset;
            let end_offset = start_offset + text.len();
            pages.push(ParsedPage {
                page_number: (index + 1) as u32,
                text,
                start_offset,
                end_offset,
            });
            offset = end_offset + 1;
        }

        let parsed_text = pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let page_map = pages
            .iter()
            .map(|page| PageMapEntry {
                page: page.page_number,
                start: page.start_offset,
                end: page.end_offset,
            })
            .collect();

        ParseResult {
            parsed_text,
            page_map,
            pages,
        }
    }
}
