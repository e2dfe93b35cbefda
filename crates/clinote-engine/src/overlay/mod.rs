//! Highlight overlay: classified sentence spans for the presentation layer.
//!
//! The overlay never carries styling. A [`Decoration`] is a span, a
//! [`Classification`] and a [`DisplayHint`]; the renderer decides what they
//! look like.

pub mod terms;
pub mod tracker;

pub use terms::term_highlights;
pub use tracker::{OverlayTracker, TrackerState};

use serde::Serialize;

use crate::config::HighlightMode;
use crate::document::{Document, Span};
use crate::editing::PositionMap;
use crate::lexicon::{Lexicon, MatchResult};
use crate::segment::segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Unmatched,
    Matched,
}

/// Rendering category for a decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayHint {
    /// Nothing in the sentence was recognised.
    Unrecognized,
    Keyword,
    Medicine,
    /// A term supplied from outside the engine.
    ExternalTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Decoration {
    pub span: Span,
    pub classification: Classification,
    pub hint: DisplayHint,
}

impl Decoration {
    pub fn new(span: Span, classification: Classification, hint: DisplayHint) -> Self {
        Self {
            span,
            classification,
            hint,
        }
    }

    /// Decoration for a sentence with the given match result.
    pub fn classify(span: Span, result: &MatchResult) -> Self {
        let (classification, hint) = if result.matched_keyword.is_some() {
            (Classification::Matched, DisplayHint::Keyword)
        } else if result.matched_medicine.is_some() {
            (Classification::Matched, DisplayHint::Medicine)
        } else {
            (Classification::Unmatched, DisplayHint::Unrecognized)
        };
        Self::new(span, classification, hint)
    }
}

/// Non-overlapping decorations ordered by start, tagged with the document
/// generation they describe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecorationSet {
    generation: u64,
    items: Vec<Decoration>,
}

impl DecorationSet {
    /// Sorts by start offset. Empty decorations and any decoration that
    /// overlaps one already kept are dropped.
    pub fn new(generation: u64, mut items: Vec<Decoration>) -> Self {
        items.sort_by_key(|d| d.span.from);
        let mut kept: Vec<Decoration> = Vec::with_capacity(items.len());
        for item in items {
            if item.span.is_empty() {
                continue;
            }
            if kept.last().is_some_and(|k| k.span.overlaps(item.span)) {
                continue;
            }
            kept.push(item);
        }
        Self {
            generation,
            items: kept,
        }
    }

    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            items: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Decoration] {
        &self.items
    }

    pub fn spans(&self) -> Vec<Span> {
        self.items.iter().map(|d| d.span).collect()
    }

    /// Carry the set across an edit. Decorations that collapse are dropped.
    pub fn map(&self, map: &PositionMap, generation: u64) -> Self {
        let items = self
            .items
            .iter()
            .filter_map(|d| {
                map.map_span(d.span)
                    .map(|span| Decoration::new(span, d.classification, d.hint))
            })
            .collect();
        Self::new(generation, items)
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Segment and classify every sentence of `doc`.
pub fn compute_decorations(
    doc: &Document,
    lexicon: &Lexicon,
    mode: HighlightMode,
) -> DecorationSet {
    let items = segment(doc)
        .into_iter()
        .filter_map(|sentence| {
            let result = lexicon.match_sentence(&sentence.text);
            log::trace!(
                "sentence {:?} {:?}: matched={}",
                sentence.span,
                sentence.text,
                result.is_match()
            );
            let decoration = Decoration::classify(sentence.span, &result);
            match (mode, decoration.classification) {
                (HighlightMode::UnmatchedOnly, Classification::Matched) => None,
                _ => Some(decoration),
            }
        })
        .collect();
    DecorationSet::new(doc.version(), items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::editing::StepMap;
    use pretty_assertions::assert_eq;

    fn lexicon() -> Lexicon {
        Lexicon::from_config(&EngineConfig::builtin().expect("Should parse builtin lexicon"))
    }

    fn unmatched(from: usize, to: usize) -> Decoration {
        Decoration::new(
            Span::new(from, to),
            Classification::Unmatched,
            DisplayHint::Unrecognized,
        )
    }

    // ============ DecorationSet ============

    #[test]
    fn test_set_sorts_and_drops_overlaps() {
        let set = DecorationSet::new(
            3,
            vec![
                unmatched(10, 20),
                unmatched(0, 5),
                unmatched(15, 25),
                unmatched(7, 7),
            ],
        );
        assert_eq!(set.spans(), vec![Span::new(0, 5), Span::new(10, 20)]);
        assert_eq!(set.generation(), 3);
    }

    #[test]
    fn test_map_shifts_and_drops_collapsed() {
        let set = DecorationSet::new(
            0,
            vec![unmatched(0, 5), unmatched(6, 10), unmatched(12, 20)],
        );
        let map = PositionMap::from_step(StepMap::new(6, 4, 0));
        let mapped = set.map(&map, 1);
        assert_eq!(mapped.spans(), vec![Span::new(0, 5), Span::new(8, 16)]);
        assert_eq!(mapped.generation(), 1);
    }

    // ============ Classification ============

    #[test]
    fn test_only_unmatched_sentences_by_default() {
        let doc =
            Document::from_paragraphs(["Patient has a fever. Patient is feeling okay today."]);
        let set = compute_decorations(&doc, &lexicon(), HighlightMode::UnmatchedOnly);
        assert_eq!(set.as_slice(), &[unmatched(21, 51)]);
    }

    #[test]
    fn test_all_sentences_mode_carries_hints() {
        let doc = Document::from_paragraphs([
            "Patient has a fever.",
            "Prescribed Aspirin daily.",
            "Nothing here.",
        ]);
        let set = compute_decorations(&doc, &lexicon(), HighlightMode::AllSentences);
        let hints: Vec<_> = set.iter().map(|d| (d.classification, d.hint)).collect();
        assert_eq!(
            hints,
            vec![
                (Classification::Matched, DisplayHint::Keyword),
                (Classification::Matched, DisplayHint::Medicine),
                (Classification::Unmatched, DisplayHint::Unrecognized),
            ]
        );
    }

    #[test]
    fn test_empty_lexicon_marks_everything_unmatched() {
        let doc = Document::from_paragraphs(["Patient has a fever.", "Aspirin given."]);
        let set = compute_decorations(&doc, &Lexicon::default(), HighlightMode::UnmatchedOnly);
        assert_eq!(set.len(), 2);
    }
}
