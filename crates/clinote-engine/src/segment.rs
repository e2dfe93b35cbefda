//! Sentence segmentation over a [`Document`].
//!
//! Sentences end at `.`, `!` or `?` followed by whitespace or the end of a
//! text node, and at every block boundary. Whitespace around a sentence is
//! trimmed off its span; whitespace-only pieces are dropped.

use std::sync::OnceLock;

use regex::Regex;

use crate::document::{Document, Node, Span};

/// A sentence span and the text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub span: Span,
    pub text: String,
}

fn terminator() -> &'static Regex {
    static TERMINATOR: OnceLock<Regex> = OnceLock::new();
    TERMINATOR.get_or_init(|| {
        Regex::new(r"[.!?](\s+|$)").expect("Invalid sentence terminator regex")
    })
}

struct Cursor<'a> {
    doc: &'a Document,
    current_start: usize,
    sentences: Vec<Sentence>,
}

impl Cursor<'_> {
    fn close(&mut self, from: usize, to: usize) {
        if from >= to {
            return;
        }
        let Ok(raw) = self.doc.text_between(from, to) else {
            return;
        };
        let lead = raw.chars().take_while(|c| c.is_whitespace()).count();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let start = from + lead;
        let end = start + trimmed.chars().count();
        self.sentences.push(Sentence {
            span: Span::new(start, end),
            text: trimmed.to_string(),
        });
    }

    fn enter_block(&mut self, offset: usize) {
        if offset > self.current_start {
            self.close(self.current_start, offset);
            self.current_start = offset;
        }
    }

    fn scan_text(&mut self, text: &str, offset: usize) {
        for m in terminator().find_iter(text) {
            let punct = offset + text[..m.start()].chars().count();
            let end = punct + 1;
            if end > self.current_start {
                self.close(self.current_start, end);
            }
            let resume = offset + text[..m.end()].chars().count();
            self.current_start = self.current_start.max(resume);
        }
    }
}

/// Split `doc` into ordered, non-overlapping sentences.
pub fn segment(doc: &Document) -> Vec<Sentence> {
    let mut cursor = Cursor {
        doc,
        current_start: 0,
        sentences: Vec::new(),
    };
    doc.descendants(|node, offset| {
        match node {
            Node::Block { .. } => cursor.enter_block(offset),
            Node::Text(text) if !text.is_empty() => cursor.scan_text(text, offset),
            Node::Text(_) => {}
        }
        true
    });
    let tail = cursor.current_start;
    cursor.close(tail, doc.len());

    log::trace!(
        "segmented {} sentences from {} chars",
        cursor.sentences.len(),
        doc.len()
    );
    cursor.sentences
}
