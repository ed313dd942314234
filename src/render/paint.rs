// src/render/paint.rs
//
// Conditional restyling of schematic regions. The template is parsed once
// with roxmltree to prove well-formedness and to locate the target's
// subtree by byte range; the rewrite itself is textual so every byte
// outside the target survives unchanged.

use std::error::Error;

use crate::config::consts::{OFF_TOKENS, ON_TOKENS};
use crate::core::html::to_lower;

/// Tri-state view of a driver value. Unrecognized values pass through
/// verbatim so they stay visible in diagnostics; painting happens only on
/// an exact On.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverState {
    On,
    Off,
    Other(String),
}

impl DriverState {
    pub fn from_value(value: &str) -> Self {
        let t = value.trim();
        let lc = t.to_lowercase();
        if ON_TOKENS.contains(&lc.as_str()) {
            DriverState::On
        } else if OFF_TOKENS.contains(&lc.as_str()) {
            DriverState::Off
        } else {
            DriverState::Other(t.to_string())
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, DriverState::On)
    }
}

const SPIN_ANIM: &str = "<animateTransform attributeName=\"transform\" \
attributeType=\"XML\" type=\"rotate\" from=\"0\" to=\"360\" dur=\"1.5s\" \
repeatCount=\"indefinite\" additive=\"sum\"/>";

/// Rewrite fill/stroke on the element carrying `cell_id` (matched on
/// `id` or `data-cell-id`) and on all its descendants, skipping the
/// `none` sentinel. With `animate`, a continuous rotation is attached.
///
/// `Ok(None)` means the identifier is absent from the template —
/// configuration drift the caller reports without aborting. `Err` means
/// the template is not well-formed markup, which is fatal to rendering.
pub fn paint(
    svg: &str,
    cell_id: &str,
    color: &str,
    animate: bool,
) -> Result<Option<String>, Box<dyn Error>> {
    let doc = roxmltree::Document::parse(svg)?;
    let target = doc.descendants().find(|n| {
        n.is_element()
            && (n.attribute("id") == Some(cell_id) || n.attribute("data-cell-id") == Some(cell_id))
    });
    let Some(node) = target else {
        return Ok(None);
    };

    let range = node.range();
    let subtree = &svg[range.clone()];
    let mut painted = repaint_subtree(subtree, color);
    if animate {
        painted = inject_spin(&painted);
    }

    let mut out = String::with_capacity(svg.len() + SPIN_ANIM.len());
    out.push_str(&svg[..range.start]);
    out.push_str(&painted);
    out.push_str(&svg[range.end..]);
    Ok(Some(out))
}

/// Rewrite paint properties in every tag of the subtree.
fn repaint_subtree(subtree: &str, color: &str) -> String {
    let mut out = String::with_capacity(subtree.len());
    let mut rest = subtree;
    while let Some(lt) = rest.find('<') {
        let Some(gt_rel) = rest[lt..].find('>') else { break };
        let gt = lt + gt_rel;
        out.push_str(&rest[..lt]);
        out.push_str(&rewrite_tag(&rest[lt..=gt], color));
        rest = &rest[gt + 1..];
    }
    out.push_str(rest);
    out
}

fn rewrite_tag(tag: &str, color: &str) -> String {
    let out = rewrite_paint_attr(tag, "fill", color);
    let out = rewrite_paint_attr(&out, "stroke", color);
    rewrite_style_attr(&out, color)
}

/// Replace the value of every explicit `name="..."` attribute unless it
/// is the `none` sentinel.
fn rewrite_paint_attr(tag: &str, name: &str, color: &str) -> String {
    let lc = to_lower(tag);
    let pat = join!(" ", name, "=");
    let mut out = String::with_capacity(tag.len());
    let mut pos = 0usize;
    while let Some(rel) = lc[pos..].find(&pat) {
        let vstart = pos + rel + pat.len();
        let Some(&q) = tag.as_bytes().get(vstart) else { break };
        if q != b'"' && q != b'\'' {
            out.push_str(&tag[pos..vstart]);
            pos = vstart;
            continue;
        }
        let Some(vlen) = tag[vstart + 1..].find(q as char) else { break };
        let vend = vstart + 1 + vlen;
        let value = &tag[vstart + 1..vend];
        out.push_str(&tag[pos..=vstart]);
        if value.trim().eq_ignore_ascii_case("none") {
            out.push_str(value);
        } else {
            out.push_str(color);
        }
        pos = vend;
    }
    out.push_str(&tag[pos..]);
    out
}

/// Rewrite `fill:`/`stroke:` declarations inside a `style="..."`
/// attribute, with the same non-`none` guard.
fn rewrite_style_attr(tag: &str, color: &str) -> String {
    let lc = to_lower(tag);
    let Some(rel) = lc.find(" style=") else { return tag.to_string() };
    let vstart = rel + " style=".len();
    let Some(&q) = tag.as_bytes().get(vstart) else { return tag.to_string() };
    if q != b'"' && q != b'\'' {
        return tag.to_string();
    }
    let Some(vlen) = tag[vstart + 1..].find(q as char) else { return tag.to_string() };
    let vend = vstart + 1 + vlen;

    let decls: Vec<String> = tag[vstart + 1..vend]
        .split(';')
        .map(|decl| match decl.split_once(':') {
            Some((prop, val)) => {
                let p = prop.trim().to_ascii_lowercase();
                if (p == "fill" || p == "stroke") && !val.trim().eq_ignore_ascii_case("none") {
                    join!(prop, ":", color)
                } else {
                    decl.to_string()
                }
            }
            None => decl.to_string(),
        })
        .collect();

    let mut out = String::with_capacity(tag.len());
    out.push_str(&tag[..=vstart]);
    out.push_str(&decls.join(";"));
    out.push_str(&tag[vend..]);
    out
}

/// First child of the target element; self-closing targets have no room
/// for a child and keep their paint-only treatment.
fn inject_spin(subtree: &str) -> String {
    let Some(gt) = subtree.find('>') else { return subtree.to_string() };
    if subtree[..gt].ends_with('/') {
        return subtree.to_string();
    }
    let mut out = String::with_capacity(subtree.len() + SPIN_ANIM.len());
    out.push_str(&subtree[..=gt]);
    out.push_str(SPIN_ANIM);
    out.push_str(&subtree[gt + 1..]);
    out
}
