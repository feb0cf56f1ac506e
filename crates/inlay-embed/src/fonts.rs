//! `@font-face` hoisting for isolated rendering.
//!
//! [CSS Scoping § 3.1](https://drafts.csswg.org/css-scoping/#shadow-names)
//!
//! Font faces declared inside a shadow tree are not reliably registered
//! with the document, so isolated content would render in fallback fonts.
//! The rules are copied into one shared `<style>` block in the page head
//! instead. The block only grows: a rule is appended once and never
//! removed, whichever render put it there.
//!
//! Extraction is brace counting, not CSS parsing. Braces inside strings or
//! comments of a font-face block are counted like any other.

use inlay_dom::{DomTree, NodeId};

/// Default id of the shared font-face `<style>` element.
pub const DEFAULT_FONT_BLOCK_ID: &str = "shadow-dom-fonts";

const FONT_FACE_TOKEN: &str = "@font-face";

/// Every complete `@font-face` rule of `css`, in source order.
///
/// A rule runs from the token to the `}` that brings the brace depth back
/// to zero. An unterminated rule ends the scan; rules found before it are
/// kept.
#[must_use]
pub fn font_face_rules(css: &str) -> Vec<&str> {
    let mut rules = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = css[cursor..].find(FONT_FACE_TOKEN) {
        let start = cursor + offset;
        let after_token = start + FONT_FACE_TOKEN.len();
        let Some(open_offset) = css[after_token..].find('{') else {
            break;
        };
        let Some(close) = matching_brace(css, after_token + open_offset) else {
            break;
        };
        rules.push(css[start..=close].trim());
        cursor = close + 1;
    }

    rules
}

/// Byte offset of the `}` closing the `{` at `open`.
fn matching_brace(css: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, byte) in css.bytes().enumerate().skip(open) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Hoist the font faces of every `<style>` element of `source` into the
/// `<style id="{block_id}">` element of `page`, creating it in the head if
/// needed. Returns how many rules were appended.
///
/// Rules whose text already occurs in the block are skipped, so running
/// this again with the same stylesheets appends nothing. When `source`
/// declares no font faces, `page` is left untouched.
pub fn extract_font_faces(source: &DomTree, page: &mut DomTree, block_id: &str) -> usize {
    let mut rules: Vec<String> = Vec::new();
    for style in source.elements_by_tag_name(NodeId::ROOT, "style") {
        let css = source.text_content(style);
        rules.extend(font_face_rules(&css).into_iter().map(str::to_owned));
    }
    if rules.is_empty() {
        return 0;
    }

    let Some(block) = find_or_create_block(page, block_id) else {
        tracing::warn!(block_id, "Page has no document element; font faces not hoisted");
        return 0;
    };

    let mut text = page.text_content(block);
    let mut appended = 0;
    for rule in &rules {
        if !text.contains(rule.as_str()) {
            text.push('\n');
            text.push_str(rule);
            appended += 1;
        }
    }

    if appended > 0
        && let Err(e) = page.set_text_content(block, &text)
    {
        tracing::warn!(block_id, error = %e, "Failed to update font-face block");
        return 0;
    }

    tracing::debug!(block_id, found = rules.len(), appended, "Hoisted font faces");
    appended
}

/// The font-face block, created under the head (itself created if missing).
fn find_or_create_block(page: &mut DomTree, block_id: &str) -> Option<NodeId> {
    if let Some(existing) = page.get_element_by_id(block_id) {
        return Some(existing);
    }

    let head = match page.head() {
        Some(head) => head,
        None => {
            let html = page.document_element()?;
            let head = page.create_element("head");
            let inserted = match page.first_child(html) {
                Some(first) => page.insert_before(html, head, first),
                None => page.append_child(html, head),
            };
            inserted.ok()?;
            head
        }
    };

    let style = page.create_element("style");
    page.set_attribute(style, "id", block_id).ok()?;
    page.append_child(head, style).ok()?;
    Some(style)
}

/// Remove the shared font-face block from `page`.
///
/// Nothing removes the block automatically; embedders (and tests) that
/// need a clean head call this. Returns whether a block was removed.
pub fn remove_font_face_block(page: &mut DomTree, block_id: &str) -> bool {
    page.get_element_by_id(block_id)
        .is_some_and(|block| page.detach(block).is_ok())
}

#[cfg(test)]
mod tests {
    use super::font_face_rules;

    #[test]
    fn finds_consecutive_rules() {
        let css = "@font-face { font-family: A; } p { color: red } @font-face{font-family:B}";
        assert_eq!(
            font_face_rules(css),
            vec!["@font-face { font-family: A; }", "@font-face{font-family:B}"]
        );
    }

    #[test]
    fn counts_nested_braces() {
        let css = "@font-face { src: url(a.woff); @supports (x) { y: z } } .after {}";
        assert_eq!(
            font_face_rules(css),
            vec!["@font-face { src: url(a.woff); @supports (x) { y: z } }"]
        );
    }

    #[test]
    fn unterminated_rule_keeps_earlier_results() {
        let css = "@font-face { font-family: A; } @font-face { font-family: B;";
        assert_eq!(font_face_rules(css), vec!["@font-face { font-family: A; }"]);
    }

    #[test]
    fn token_without_block_stops_scanning() {
        assert!(font_face_rules("@font-face").is_empty());
        assert!(font_face_rules("body { margin: 0 }").is_empty());
    }
}
