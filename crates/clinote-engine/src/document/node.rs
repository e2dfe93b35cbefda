/// Structural role of a block. Informational only: every kind segments the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Doc,
    Paragraph,
    Heading,
    List,
    ListItem,
    Quote,
}

/// A node of the document tree.
///
/// Blocks own child nodes and no text; Text nodes own a string and no
/// children. A block holds either only Text children or only Block children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Block {
        kind: BlockKind,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn block(kind: BlockKind, children: Vec<Node>) -> Self {
        Node::Block { kind, children }
    }

    /// A paragraph holding a single text node (or nothing, for empty text).
    pub fn paragraph(text: impl Into<String>) -> Self {
        let text = text.into();
        let children = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::Text(text)]
        };
        Node::block(BlockKind::Paragraph, children)
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Node::Block { .. })
    }

    /// A block whose content is inline text (it has no block children).
    pub fn is_textblock(&self) -> bool {
        match self {
            Node::Block { children, .. } => !children.iter().any(Node::is_block),
            Node::Text(_) => false,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Block { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// Number of offset positions this node occupies in the linearized document.
    ///
    /// Sibling blocks are separated by one position, so a container's size is
    /// the sum of its children plus one per boundary between them.
    pub fn size(&self) -> usize {
        match self {
            Node::Text(text) => text.chars().count(),
            Node::Block { children, .. } => {
                let content: usize = children.iter().map(Node::size).sum();
                if self.is_textblock() {
                    content
                } else {
                    content + children.len().saturating_sub(1)
                }
            }
        }
    }

    /// Concatenated text of all descendants, blocks joined by a single space.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Block { children, .. } if self.is_textblock() => {
                children.iter().map(Node::text_content).collect()
            }
            Node::Block { children, .. } => children
                .iter()
                .map(Node::text_content)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
