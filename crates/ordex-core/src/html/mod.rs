//! HTML-to-text normalization for transactional email bodies.
//!
//! Delivery-service emails are deeply nested table layouts; the field rules
//! downstream only need the visible text with line structure preserved, so
//! semantically distinct lines (item name, price, address) stay separable by
//! line-splitting.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Elements whose text content is never visible.
const SKIPPED: &[&str] = &["script", "style", "head", "title", "template", "noscript"];

/// Block-level elements that force a line boundary.
const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "dt", "dd", "fieldset", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Convert raw HTML into a flat, line-oriented text representation.
///
/// Markup tags are stripped, each block-level element boundary becomes a
/// `\n`, and runs of horizontal whitespace collapse to a single space.
/// Adjacent boundaries merge into one separator. The underlying html5ever
/// parser recovers from truncated or partially-invalid markup, so this
/// function is total: it never panics and always returns a (possibly empty)
/// string.
pub fn normalize(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    walk(document.tree.root(), &mut out);
    out.trim_matches(|c: char| c.is_whitespace()).to_string()
}

fn walk(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => push_collapsed(out, &text),
        Node::Element(element) => {
            let name = element.name();
            if SKIPPED.contains(&name) {
                return;
            }
            if name == "br" {
                push_boundary(out);
                return;
            }

            let block = BLOCK.contains(&name);
            if block {
                push_boundary(out);
            }
            for child in node.children() {
                walk(child, out);
            }
            if block {
                push_boundary(out);
            }
        }
        // Document/fragment/comment wrappers: comments carry no text,
        // everything else just forwards to its children.
        _ => {
            for child in node.children() {
                walk(child, out);
            }
        }
    }
}

/// Append a text node, collapsing whitespace runs (including raw newlines
/// inside the markup) to a single space.
fn push_collapsed(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') && !out.ends_with('\n') {
                out.push(' ');
            }
        } else {
            out.push(ch);
        }
    }
}

/// Append a line separator, trimming trailing padding first. Consecutive
/// boundaries collapse into a single separator.
fn push_boundary(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
