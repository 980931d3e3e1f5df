//! Source citation resolution.
//!
//! Locates the first occurrence of a keyword in the document text, maps the
//! offset to a page, and builds a bounded excerpt for the audit trail.

use crate::models::{PageMapEntry, SourceRef};

/// Excerpt window size in each direction around the match offset.
pub const EXCERPT_SPAN: usize = 140;

/// Locate a keyword's first occurrence and build its citation.
///
/// Returns None when the keyword is absent or the offset falls into a page
/// map gap; "citation unavailable" is a valid state, not a failure.
pub fn locate(text: &str, page_map: &[PageMapEntry], keyword: &str) -> Option<SourceRef> {
    let offset = find_offset(text, keyword)?;
    let page = page_for_offset(page_map, offset)?;
    let (excerpt, start, end) = build_excerpt(text, offset, EXCERPT_SPAN);
    Some(SourceRef {
        page: page.page,
        excerpt,
        start,
        end,
    })
}

/// First case-insensitive occurrence of `keyword` in `text`.
///
/// ASCII lowercasing keeps byte offsets into the original text valid;
/// keyword tables are ASCII.
pub fn find_offset(text: &str, keyword: &str) -> Option<usize> {
    if keyword.is_empty() {
        return None;
    }
    text.to_ascii_lowercase()
        .find(&keyword.to_ascii_lowercase())
}

/// Page whose offset range contains `offset`, inclusive at both ends.
///
/// No containing entry means the offset sits in a gap; the caller gets
/// None rather than a nearest-page guess.
fn page_for_offset(page_map: &[PageMapEntry], offset: usize) -> Option<&PageMapEntry> {
    page_map
        .iter()
        .find(|page| offset >= page.start && offset <= page.end)
}

/// Symmetric window around `offset`, clipped to the text and snapped to
/// char boundaries. The returned offsets are the window bounds before the
/// whitespace trim so downstream highlighting stays anchored.
fn build_excerpt(text: &str, offset: usize, span: usize) -> (String, usize, usize) {
    let start = floor_char_boundary(text, offset.saturating_sub(span));
    let end = ceil_char_boundary(text, (offset + span).min(text.len()));
    (text[start..end].trim().to_string(), start, end)
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
