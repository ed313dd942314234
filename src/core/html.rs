// src/core/html.rs
//
// String-level tag scanning. The controller emits machine-generated,
// unnested tables, so a full DOM is not needed; byte offsets into the
// original document are enough.

use super::sanitize;

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Find the next `<tag ...>...</tag>` block at or after `from`.
/// Matches the tag name on a word boundary, so `"th"` will not hit
/// `<thead>`. Returns byte offsets into `s` spanning the whole block.
pub fn next_tag_block(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open = join!("<", tag);
    let close = join!("</", tag, ">");

    let mut at = from;
    let start = loop {
        let rel = lc.get(at..)?.find(&open)?;
        let cand = at + rel;
        match lc.as_bytes().get(cand + open.len()) {
            Some(&b) if b == b'>' || b == b'/' || b.is_ascii_whitespace() => break cand,
            Some(_) => at = cand + open.len(),
            None => return None,
        }
    };
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close)?;
    let end = open_end + end_rel + close.len();
    Some((start, end))
}

/// Byte ranges of every `<tag>` block in document order.
pub fn tag_blocks(s: &str, tag: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = next_tag_block(s, tag, pos) {
        out.push((b_s, b_e));
        pos = b_e;
    }
    out
}

/// Next table cell, `<td>` or `<th>`, whichever comes first.
pub fn next_cell_block(s: &str, from: usize) -> Option<(usize, usize)> {
    let td = next_tag_block(s, "td", from);
    let th = next_tag_block(s, "th", from);
    match (td, th) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    sanitize::normalize_ws(&out)
}

/// Cell text the way the extraction pipeline wants it: tags stripped,
/// entities decoded, whitespace collapsed, encoding repaired. Tags go
/// first so an `&lt;` inside a value cannot be mistaken for markup.
pub fn cell_text(block: &str) -> String {
    let inner = inner_after_open_tag(block);
    sanitize::normalize_text(&sanitize::normalize_entities(&strip_tags(inner)))
}
