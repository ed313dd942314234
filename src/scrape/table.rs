// src/scrape/table.rs
//
// The status pages are machine-generated and the grid's position shifts
// between pages and firmware versions, so the data table is found by
// scoring, not by position.

use crate::config::consts::{HEADER_KEYWORDS, KEYWORD_WEIGHT, ROWS_PER_BONUS_POINT};
use crate::core::html;

/// One scored `<table>` block, byte range into the source document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableCandidate {
    pub range: (usize, usize),
    pub score: u32,
    pub row_count: u32,
}

/// Score every table: fixed weight per header keyword present in the
/// table's text (case-insensitive) plus a small row-count bonus. Returned
/// ranked best-first; ties keep document order so the first table wins.
pub fn score_tables(doc: &str) -> Vec<TableCandidate> {
    let mut out: Vec<TableCandidate> = html::tag_blocks(doc, "table")
        .into_iter()
        .map(|(b_s, b_e)| {
            let block = &doc[b_s..b_e];
            let text = html::to_lower(&html::strip_tags(block));
            let mut score = 0u32;
            for kw in HEADER_KEYWORDS {
                if text.contains(kw) {
                    score += KEYWORD_WEIGHT;
                }
            }
            let row_count = html::tag_blocks(block, "tr").len() as u32;
            score += row_count / ROWS_PER_BONUS_POINT;
            TableCandidate { range: (b_s, b_e), score, row_count }
        })
        .collect();
    out.sort_by(|a, b| b.score.cmp(&a.score)); // stable: ties stay in scan order
    out
}

/// Best candidate's markup, or `None` when the document has no tables.
pub fn locate_table(doc: &str) -> Option<&str> {
    let best = score_tables(doc).into_iter().next()?;
    Some(&doc[best.range.0..best.range.1])
}
