use crate::document::{Document, Node, Span};
use crate::overlay::{Classification, Decoration, DecorationSet, DisplayHint};

/// Highlight every occurrence of the given terms, ignoring case.
///
/// Terms are searched inside each text node, so a match never spans a block
/// boundary. Blank terms are ignored; overlapping hits keep the earlier one.
pub fn term_highlights<S: AsRef<str>>(doc: &Document, terms: &[S]) -> DecorationSet {
    let terms: Vec<Vec<char>> = terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.chars().collect())
        .collect();
    if terms.is_empty() {
        return DecorationSet::empty(doc.version());
    }

    let mut items = Vec::new();
    doc.descendants(|node, offset| {
        if let Node::Text(text) = node {
            let haystack: Vec<char> = text.chars().collect();
            for term in &terms {
                for at in find_all(&haystack, term) {
                    items.push(Decoration::new(
                        Span::new(offset + at, offset + at + term.len()),
                        Classification::Matched,
                        DisplayHint::ExternalTerm,
                    ));
                }
            }
        }
        true
    });
    DecorationSet::new(doc.version(), items)
}

fn find_all(haystack: &[char], needle: &[char]) -> Vec<usize> {
    let mut hits = Vec::new();
    let mut at = 0;
    while at + needle.len() <= haystack.len() {
        let window = &haystack[at..at + needle.len()];
        if window.iter().zip(needle).all(|(&a, &b)| same_letter(a, b)) {
            hits.push(at);
            at += needle.len();
        } else {
            at += 1;
        }
    }
    hits
}

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
