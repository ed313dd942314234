// src/core/sanitize.rs
//
// Cell-text cleanup. Everything here is pure and total: bad input comes
// back as the most recognizable approximation, never as a panic.

use crate::config::consts::{SLUG_FALLBACK, SLUG_MAX_LEN};

pub fn normalize_entities(s: &str) -> String {
    let mut out = s
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    if out.contains("&#") {
        out = decode_numeric_entities(&out);
    }
    out
}

/// `&#176;` and `&#xBA;` style references. Unknown or malformed ones
/// are left as-is.
fn decode_numeric_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find("&#") {
        out.push_str(&rest[..i]);
        let tail = &rest[i + 2..];
        let (digits, radix) = match tail.strip_prefix('x').or(tail.strip_prefix('X')) {
            Some(hex) => (hex, 16),
            None => (tail, 10),
        };
        let end = digits.find(';');
        let decoded = end
            .and_then(|e| u32::from_str_radix(&digits[..e], radix).ok())
            .and_then(char::from_u32);
        match (end, decoded) {
            (Some(e), Some(ch)) => {
                out.push(ch);
                let consumed = 2 + (radix == 16) as usize + e + 1;
                rest = &rest[i + consumed..];
            }
            _ => {
                out.push_str("&#");
                rest = &rest[i + 2..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() || ch == '\u{a0}' {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Full cell-text normalization: whitespace collapse plus a best-effort
/// mojibake repair for pages the controller serves as mislabeled Latin-1
/// (e.g. "TÂª DepÃ³sito" for "Tª Depósito").
pub fn normalize_text(raw: &str) -> String {
    let s = normalize_ws(raw);
    if !looks_garbled(&s) {
        return s; // a correct decode must never be "repaired" into a worse one
    }
    match reinterpret_latin1(&s) {
        Some(fixed) if accept_repair(&s, &fixed) => fixed,
        _ => s,
    }
}

/// Corruption markers: 'Â'/'Ã' are the Latin-1 faces of UTF-8 lead bytes.
fn looks_garbled(s: &str) -> bool {
    s.contains('Â') || s.contains('Ã')
}

/// Re-encode each char as its Latin-1 byte (chars above U+00FF are
/// dropped, they cannot be mojibake) and re-decode the bytes as UTF-8,
/// discarding invalid sequences.
fn reinterpret_latin1(s: &str) -> Option<String> {
    if s.chars().all(|c| (c as u32) < 0x80) {
        return None; // pure ASCII, nothing to repair
    }
    let bytes: Vec<u8> = s
        .chars()
        .filter(|c| (*c as u32) <= 0xFF)
        .map(|c| c as u8)
        .collect();
    let out = String::from_utf8_lossy(&bytes).replace('\u{FFFD}', "");
    Some(out)
}

/// Accept the reinterpretation only when it removed the corruption marker
/// and kept at least half of the usable content.
fn accept_repair(original: &str, fixed: &str) -> bool {
    !fixed.is_empty()
        && !fixed.contains('Â')
        && fixed.chars().count() >= (original.chars().count() / 2).max(1)
}

/// Filesystem-safe slug from a free-text label. Deterministic; caller
/// pairs it with the entity identifier for uniqueness.
pub fn slugify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_us = true; // suppress leading underscores
    for ch in normalize_ws(label).chars() {
        let ch = fold_diacritic(ch);
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_us = false;
        } else if !last_us {
            out.push('_');
            last_us = true;
        }
        if out.len() >= SLUG_MAX_LEN { break; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(SLUG_FALLBACK) } else { out }
}

/// ASCII fold for the Latin-1 range the controller labels actually use.
fn fold_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
        'ñ' | 'Ñ' => 'n',
        'ç' | 'Ç' => 'c',
        'ª' => 'a',
        'º' => 'o',
        _ => ch,
    }
}
