//! Document model: an ordered tree of blocks and text nodes.
//!
//! Offsets are a projection of the tree, never stored on the nodes. They are
//! 0-based character counts over the *linearized* document: the content of
//! every textblock (a block without block children) in document order, with
//! exactly one separator position between consecutive textblocks. Reading
//! text back renders each separator as a single space, so words from
//! adjacent blocks never run together.

pub mod node;
pub mod span;

pub use node::{BlockKind, Node};
pub use span::{RangeError, Span, check_range};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("block of kind {kind:?} mixes text and block children")]
    MixedContent { kind: BlockKind },
}

/// An immutable snapshot of a rich-text document.
///
/// Edits never mutate a `Document`; [`apply_edit`](crate::editing::apply_edit)
/// produces a new one with an incremented version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
    version: u64,
    text: String,
    len: usize,
}

/// A textblock located in the tree, with its offset range (inclusive end).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Textblock {
    pub path: Vec<usize>,
    pub start: usize,
    pub end: usize,
}

struct Walk {
    pos: usize,
    seen_textblock: bool,
}

impl Document {
    /// Build a document from top-level nodes, validating block content.
    pub fn new(children: Vec<Node>) -> Result<Self, DocumentError> {
        let root = Node::block(BlockKind::Doc, children);
        validate(&root)?;
        Ok(Self::from_root(root, 0))
    }

    /// A document made of one paragraph per entry.
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let children = paragraphs.into_iter().map(Node::paragraph).collect();
        Self::from_root(Node::block(BlockKind::Doc, children), 0)
    }

    /// Split plain text into paragraphs on blank lines.
    pub fn from_plain_text(text: &str) -> Self {
        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join("\n"));
                    current.clear();
                }
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            paragraphs.push(current.join("\n"));
        }
        Self::from_paragraphs(paragraphs)
    }

    pub(crate) fn from_root(root: Node, version: u64) -> Self {
        let text = root.text_content();
        let len = text.chars().count();
        Self {
            root,
            version,
            text,
            len,
        }
    }

    /// Total number of offset positions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Generation counter, incremented by every content-changing edit.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The full linearized text, block separators rendered as spaces.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text in `[from, to)`. Fails rather than clamping on a bad range.
    pub fn text_between(&self, from: usize, to: usize) -> Result<String, DocumentError> {
        check_range(from, to, self.len)?;
        let start = char_to_byte(&self.text, from);
        let end = char_to_byte(&self.text, to);
        Ok(self.text[start..end].to_string())
    }

    /// Depth-first traversal yielding each node below the root with its offset.
    ///
    /// The visitor returns `false` to skip a block's children.
    pub fn descendants<F>(&self, mut visit: F)
    where
        F: FnMut(&Node, usize) -> bool,
    {
        let mut walk = Walk {
            pos: 0,
            seen_textblock: false,
        };
        walk_children(self.root.children(), &mut walk, &mut visit);
    }

    pub(crate) fn into_root(self) -> Node {
        self.root
    }
}

fn walk_children<F>(children: &[Node], walk: &mut Walk, visit: &mut F)
where
    F: FnMut(&Node, usize) -> bool,
{
    for child in children {
        match child {
            Node::Text(text) => {
                visit(child, walk.pos);
                walk.pos += text.chars().count();
            }
            Node::Block { children: inner, .. } => {
                let start = if walk.seen_textblock {
                    walk.pos + 1
                } else {
                    walk.pos
                };
                let descend = visit(child, start);
                if child.is_textblock() {
                    walk.pos = start;
                    walk.seen_textblock = true;
                    if descend {
                        walk_children(inner, walk, visit);
                    }
                    walk.pos = start + child.size();
                } else if descend {
                    walk_children(inner, walk, visit);
                } else {
                    walk.pos = start + child.size();
                    walk.seen_textblock = true;
                }
            }
        }
    }
}

/// Textblocks below `root`, with paths relative to it.
pub(crate) fn textblocks_of(root: &Node) -> Vec<Textblock> {
    let mut out = Vec::new();
    let mut pos = 0;
    collect_textblocks(root, &mut Vec::new(), &mut pos, &mut out);
    out
}

fn collect_textblocks(
    node: &Node,
    path: &mut Vec<usize>,
    pos: &mut usize,
    out: &mut Vec<Textblock>,
) {
    if node.is_textblock() {
        if !out.is_empty() {
            *pos += 1;
        }
        let start = *pos;
        *pos += node.size();
        out.push(Textblock {
            path: path.clone(),
            start,
            end: *pos,
        });
        return;
    }
    for (index, child) in node.children().iter().enumerate() {
        path.push(index);
        collect_textblocks(child, path, pos, out);
        path.pop();
    }
}

fn validate(node: &Node) -> Result<(), DocumentError> {
    if let Node::Block { kind, children } = node {
        let blocks = children.iter().filter(|c| c.is_block()).count();
        if blocks != 0 && blocks != children.len() {
            return Err(DocumentError::MixedContent { kind: *kind });
        }
        children.iter().try_for_each(validate)?;
    }
    Ok(())
}

/// Byte index of the `index`-th char, or the string length past the end.
pub(crate) fn char_to_byte(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
