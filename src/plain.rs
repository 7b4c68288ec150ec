//! Plain-text rendering of a built markup tree.
//!
//! Walks the tree the builder produces and concatenates text content,
//! inserting a single space wherever two adjacent rendered fragments would
//! otherwise run together and a blank line after each paragraph element.
//! Useful for display transcripts of content composed once and rendered to
//! both markup and text.

use crate::xml::{Document, NodeId};

/// Render the document as plain text.
pub fn render(doc: &Document) -> String {
    render_node(doc, doc.root()).trim().to_string()
}

fn render_node(doc: &Document, id: NodeId) -> String {
    if let Some(text) = doc.text(id) {
        return text.to_string();
    }
    let mut out = String::new();
    for &child in doc.children(id) {
        append(&mut out, &render_node(doc, child));
    }
    if doc.name(id).is_some_and(|n| n.eq_ignore_ascii_case("p")) {
        out.push_str("\n\n");
    }
    out
}

/// Join two rendered fragments, separating them with one space iff the
/// boundary has no whitespace on either side.
fn append(out: &mut String, fragment: &str) {
    let needs_space = out.chars().next_back().is_some_and(|c| !c.is_whitespace())
        && fragment.chars().next().is_some_and(|c| !c.is_whitespace());
    if needs_space {
        out.push(' ');
    }
    out.push_str(fragment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn concatenates_text_across_elements() {
        let mut doc = Document::new("speak");
        let root = doc.root();
        doc.append_text(root, "I mean");
        let em = doc.append_element(root, "emphasis");
        doc.append_text(em, "wow!");
        assert_eq!(render(&doc), "I mean wow!");
    }

    #[test]
    fn keeps_existing_boundary_whitespace() {
        let mut doc = Document::new("speak");
        let root = doc.root();
        doc.append_text(root, "hello ");
        doc.append_text(root, "world");
        assert_eq!(render(&doc), "hello world");
    }

    #[test]
    fn paragraphs_get_a_blank_line() {
        let mut doc = Document::new("speak");
        let root = doc.root();
        let p1 = doc.append_element(root, "p");
        doc.append_text(p1, "one");
        let p2 = doc.append_element(root, "p");
        doc.append_text(p2, "two");
        assert_eq!(render(&doc), "one\n\ntwo");
    }

    #[test]
    fn result_is_trimmed() {
        let mut doc = Document::new("speak");
        let root = doc.root();
        let p = doc.append_element(root, "p");
        doc.append_text(p, "only");
        assert_eq!(render(&doc), "only");
    }

    #[test]
    fn empty_document_renders_empty() {
        let doc = Document::new("speak");
        assert_eq!(render(&doc), "");
    }
}
