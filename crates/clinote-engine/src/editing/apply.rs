use crate::document::{Document, Node, Textblock, char_to_byte, textblocks_of};
use crate::editing::{EditError, EditOp, PositionMap, StepMap};

/// Apply `op` to `doc`, returning the edited document and its position map.
///
/// The input is left untouched. Edits that do not change content (selection
/// moves, empty insertions) return an unchanged clone and the identity map.
/// Ranges are validated up front; nothing is clamped.
pub fn apply_edit(doc: &Document, op: &EditOp) -> Result<(Document, PositionMap), EditError> {
    op.validate(doc.len())?;
    if !op.changes_content() {
        return Ok((doc.clone(), PositionMap::identity()));
    }

    let range = op.range();
    let inserted = match op {
        EditOp::Insert { text, .. } | EditOp::Replace { text, .. } => text.as_str(),
        EditOp::Delete { .. } | EditOp::Select { .. } => "",
    };

    let version = doc.version() + 1;
    let mut root = doc.clone().into_root();
    if !range.is_empty() {
        delete_range(&mut root, range.start, range.end);
    }
    if !inserted.is_empty() {
        insert_text(&mut root, range.start, inserted);
    }
    let edited = Document::from_root(root, version);

    let step = StepMap::new(range.start, range.len(), inserted.chars().count());
    debug_assert_eq!(
        edited.len() as isize,
        doc.len() as isize + step.delta(),
        "edit changed length inconsistently"
    );
    log::trace!(
        "applied edit at {} (-{} +{}), version {}",
        step.at,
        step.deleted,
        step.inserted,
        version
    );
    Ok((edited, PositionMap::from_step(step)))
}

fn locate(blocks: &[Textblock], pos: usize) -> Option<usize> {
    blocks.iter().position(|b| b.start <= pos && pos <= b.end)
}

fn node_at_mut<'a>(node: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    match path.split_first() {
        None => Some(node),
        Some((index, rest)) => match node {
            Node::Block { children, .. } => children
                .get_mut(*index)
                .and_then(|child| node_at_mut(child, rest)),
            Node::Text(_) => None,
        },
    }
}

fn take_inline(root: &mut Node, path: &[usize]) -> Vec<Node> {
    match node_at_mut(root, path) {
        Some(Node::Block { children, .. }) => std::mem::take(children),
        _ => Vec::new(),
    }
}

fn set_inline(root: &mut Node, path: &[usize], inline: Vec<Node>) {
    if let Some(Node::Block { children, .. }) = node_at_mut(root, path) {
        *children = inline;
    }
}

/// Remove the node at `path`, then any ancestors left without children.
fn remove_pruning(root: &mut Node, path: &[usize]) {
    let Some((last, parent_path)) = path.split_last() else {
        return;
    };
    let emptied = match node_at_mut(root, parent_path) {
        Some(Node::Block { children, .. }) => {
            if *last < children.len() {
                children.remove(*last);
            }
            children.is_empty()
        }
        _ => false,
    };
    if emptied && !parent_path.is_empty() {
        remove_pruning(root, parent_path);
    }
}

/// Split inline content at a character offset. Empty text pieces are dropped.
fn split_inline(inline: Vec<Node>, at: usize) -> (Vec<Node>, Vec<Node>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut remaining = at;
    for node in inline {
        match node {
            Node::Text(text) => {
                let len = text.chars().count();
                if remaining >= len {
                    if len > 0 {
                        left.push(Node::Text(text));
                    }
                    remaining -= len;
                } else if remaining == 0 {
                    right.push(Node::Text(text));
                } else {
                    let (head, tail) = text.split_at(char_to_byte(&text, remaining));
                    left.push(Node::text(head));
                    right.push(Node::text(tail));
                    remaining = 0;
                }
            }
            other if remaining > 0 => left.push(other),
            other => right.push(other),
        }
    }
    (left, right)
}

/// Concatenate inline runs, merging the text nodes that meet at the seam.
fn join_inline(mut left: Vec<Node>, right: Vec<Node>) -> Vec<Node> {
    let mut right = right.into_iter().peekable();
    if let (Some(Node::Text(head)), Some(Node::Text(tail))) = (left.last_mut(), right.peek()) {
        head.push_str(tail);
        right.next();
    }
    left.extend(right);
    left
}

fn delete_range(root: &mut Node, from: usize, to: usize) {
    let blocks = textblocks_of(root);
    let (Some(first), Some(last)) = (locate(&blocks, from), locate(&blocks, to)) else {
        return;
    };
    let from_local = from - blocks[first].start;
    let to_local = to - blocks[last].start;

    if first == last {
        let inline = take_inline(root, &blocks[first].path);
        let (head, rest) = split_inline(inline, from_local);
        let (_, tail) = split_inline(rest, to_local - from_local);
        set_inline(root, &blocks[first].path, join_inline(head, tail));
        return;
    }

    // Join the first and last touched textblocks; everything between goes.
    let (_, tail) = split_inline(take_inline(root, &blocks[last].path), to_local);
    let (head, _) = split_inline(take_inline(root, &blocks[first].path), from_local);
    for block in blocks[first + 1..=last].iter().rev() {
        remove_pruning(root, &block.path);
    }
    set_inline(root, &blocks[first].path, join_inline(head, tail));
}

fn insert_text(root: &mut Node, at: usize, text: &str) {
    let blocks = textblocks_of(root);
    let Some(index) = locate(&blocks, at) else {
        return;
    };
    let local = at - blocks[index].start;
    let Some(Node::Block { children, .. }) = node_at_mut(root, &blocks[index].path) else {
        return;
    };

    let mut offset = 0;
    for child in children.iter_mut() {
        if let Node::Text(existing) = child {
            let len = existing.chars().count();
            if local <= offset + len {
                let byte = char_to_byte(existing, local - offset);
                existing.insert_str(byte, text);
                return;
            }
            offset += len;
        }
    }
    children.push(Node::text(text));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockKind, RangeError};
    use pretty_assertions::assert_eq;

    fn two_paragraphs() -> Document {
        Document::from_paragraphs(["Hello world", "Second note"])
    }

    // ============ Insertion ============

    #[test]
    fn test_insert_into_text() {
        let doc = two_paragraphs();
        let (edited, map) = apply_edit(&doc, &EditOp::insert(5, ",")).unwrap();
        assert_eq!(edited.text(), "Hello, world Second note");
        assert_eq!(edited.version(), 1);
        assert_eq!(map.steps(), &[StepMap::new(5, 0, 1)]);
    }

    #[test]
    fn test_insert_at_block_end_and_start() {
        let doc = two_paragraphs();
        let (edited, _) = apply_edit(&doc, &EditOp::insert(11, ".")).unwrap();
        assert_eq!(edited.text(), "Hello world. Second note");
        let (edited, _) = apply_edit(&edited, &EditOp::insert(13, "A ")).unwrap();
        assert_eq!(edited.text(), "Hello world. A Second note");
        assert_eq!(edited.root().children().len(), 2);
    }

    #[test]
    fn test_insert_into_empty_block() {
        let doc = Document::from_paragraphs(["a", "", "b"]);
        let (edited, _) = apply_edit(&doc, &EditOp::insert(2, "middle")).unwrap();
        assert_eq!(edited.text(), "a middle b");
        assert_eq!(edited.root().children()[1], Node::paragraph("middle"));
    }

    #[test]
    fn test_insert_multibyte_text() {
        let doc = Document::from_paragraphs(["Temp 39C"]);
        let (edited, map) = apply_edit(&doc, &EditOp::insert(7, "°")).unwrap();
        assert_eq!(edited.text(), "Temp 39°C");
        assert_eq!(edited.len(), 9);
        assert_eq!(map.delta(), 1);
    }

    // ============ Deletion ============

    #[test]
    fn test_delete_within_block() {
        let doc = two_paragraphs();
        let (edited, map) = apply_edit(&doc, &EditOp::delete(5..11)).unwrap();
        assert_eq!(edited.text(), "Hello Second note");
        assert_eq!(map.steps(), &[StepMap::new(5, 6, 0)]);
    }

    #[test]
    fn test_delete_across_blocks_joins_them() {
        let doc = two_paragraphs();
        let (edited, _) = apply_edit(&doc, &EditOp::delete(6..19)).unwrap();
        assert_eq!(edited.text(), "Hello note");
        assert_eq!(edited.root().children().len(), 1);
        assert_eq!(edited.root().children()[0], Node::paragraph("Hello note"));
    }

    #[test]
    fn test_delete_separator_only_merges_blocks() {
        let doc = two_paragraphs();
        let (edited, _) = apply_edit(&doc, &EditOp::delete(11..12)).unwrap();
        assert_eq!(edited.text(), "Hello worldSecond note");
        assert_eq!(edited.len(), 22);
    }

    #[test]
    fn test_delete_prunes_emptied_containers() {
        let doc = Document::new(vec![
            Node::paragraph("Start"),
            Node::block(
                BlockKind::List,
                vec![Node::block(BlockKind::ListItem, vec![Node::paragraph("item")])],
            ),
            Node::paragraph("End"),
        ])
        .unwrap();
        assert_eq!(doc.text(), "Start item End");
        let (edited, _) = apply_edit(&doc, &EditOp::delete(5..11)).unwrap();
        assert_eq!(edited.text(), "StartEnd");
        assert_eq!(edited.root().children(), &[Node::paragraph("StartEnd")]);
    }

    #[test]
    fn test_delete_spanning_text_nodes() {
        let doc = Document::new(vec![Node::block(
            BlockKind::Paragraph,
            vec![Node::text("Patient has "), Node::text("high fever.")],
        )])
        .unwrap();
        let (edited, _) = apply_edit(&doc, &EditOp::delete(8..17)).unwrap();
        assert_eq!(edited.text(), "Patient fever.");
        assert_eq!(edited.len(), 14);
    }

    // ============ Replace / select ============

    #[test]
    fn test_replace_is_single_step() {
        let doc = two_paragraphs();
        let (edited, map) = apply_edit(&doc, &EditOp::replace(6..11, "there")).unwrap();
        assert_eq!(edited.text(), "Hello there Second note");
        assert_eq!(map.steps(), &[StepMap::new(6, 5, 5)]);
        assert_eq!(edited.version(), 1);
    }

    #[test]
    fn test_select_keeps_document() {
        let doc = two_paragraphs();
        let (edited, map) = apply_edit(&doc, &EditOp::select(0..5)).unwrap();
        assert_eq!(edited, doc);
        assert!(map.is_identity());
    }

    // ============ Errors ============

    #[test]
    fn test_out_of_range_edit_fails_fast() {
        let doc = two_paragraphs();
        let result = apply_edit(&doc, &EditOp::delete(20..30));
        assert_eq!(
            result,
            Err(EditError::Range(RangeError::OutOfBounds {
                from: 20,
                to: 30,
                len: 23
            }))
        );
    }

    #[test]
    fn test_input_document_is_untouched() {
        let doc = two_paragraphs();
        let _ = apply_edit(&doc, &EditOp::delete(0..12)).unwrap();
        assert_eq!(doc.text(), "Hello world Second note");
        assert_eq!(doc.version(), 0);
    }
}
