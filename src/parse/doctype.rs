//! Doctype discovery and HTML version classification.

use scraper::node::Node;
use scraper::Html;

/// Known public identifiers and their labels. HTML 4.01 Strict is handled
/// separately because it only applies without a system identifier.
const PUBLIC_ID_LABELS: &[(&str, &str)] = &[
    ("-//W3C//DTD HTML 4.01 Transitional//EN", "HTML 4.01 Transitional"),
    ("-//W3C//DTD HTML 3.2 Final//EN", "HTML 3.2"),
    ("-//W3C//DTD HTML 2.0//EN", "HTML 2.0"),
    ("-//W3C//DTD HTML 1.0//EN", "HTML 1.0"),
    ("-//W3C//DTD XHTML 1.0 Strict//EN", "XHTML 1.0 Strict"),
    ("-//W3C//DTD XHTML 1.0 Transitional//EN", "XHTML 1.0 Transitional"),
    ("-//W3C//DTD XHTML 1.0 Frameset//EN", "XHTML 1.0 Frameset"),
    ("-//W3C//DTD XHTML 1.1//EN", "XHTML 1.1"),
];

const HTML401_STRICT_PUBLIC_ID: &str = "-//W3C//DTD HTML 4.01//EN";

/// A document type declaration, normalized: identifiers trimmed, name
/// trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DoctypeDecl {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

impl DoctypeDecl {
    pub fn new(name: &str, public_id: &str, system_id: &str) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            public_id: public_id.trim().to_string(),
            system_id: system_id.trim().to_string(),
        }
    }

    /// Reconstructs the declaration, leaving out empty identifier segments.
    pub fn to_literal(&self) -> String {
        let mut literal = format!("<!DOCTYPE {}", self.name);
        if !self.public_id.is_empty() {
            literal.push_str(&format!(" PUBLIC \"{}\"", self.public_id));
        }
        if !self.system_id.is_empty() {
            literal.push_str(&format!(" \"{}\"", self.system_id));
        }
        literal.push('>');
        literal
    }
}

/// Returns the document's doctype declaration, if it has one.
pub fn find_doctype(document: &Html) -> Option<DoctypeDecl> {
    document
        .tree
        .root()
        .children()
        .find_map(|node| match node.value() {
            Node::Doctype(doctype) => Some(DoctypeDecl::new(
                doctype.name(),
                doctype.public_id(),
                doctype.system_id(),
            )),
            _ => None,
        })
}

/// Maps a doctype to an HTML version label.
///
/// - no doctype: `"Unknown"`
/// - `<!DOCTYPE html>`: `"HTML5"`
/// - a known public identifier: its label
/// - anything else: the reconstructed declaration itself
pub fn classify_doctype(doctype: Option<&DoctypeDecl>) -> String {
    let Some(doctype) = doctype else {
        return "Unknown".to_string();
    };

    if doctype.name == "html" && doctype.public_id.is_empty() && doctype.system_id.is_empty() {
        return "HTML5".to_string();
    }
    if doctype.public_id == HTML401_STRICT_PUBLIC_ID && doctype.system_id.is_empty() {
        return "HTML 4.01 Strict".to_string();
    }

    PUBLIC_ID_LABELS
        .iter()
        .find(|(public_id, _)| *public_id == doctype.public_id)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| doctype.to_literal())
}
