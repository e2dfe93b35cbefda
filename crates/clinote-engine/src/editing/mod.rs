/*!
 * # Edit/Diff Adapter
 *
 * Translates edits from the presentation layer into a new
 * [`Document`](crate::document::Document) plus
 * a [`PositionMap`] that the overlay tracker uses to carry spans across the
 * edit.
 *
 * ## Edit model
 *
 * - Every edit is an [`EditOp`]: insert, delete, replace, or a pure
 *   selection move.
 * - Ranges are validated against the current document before anything is
 *   touched. A bad range is an [`EditError`], never a silent clamp.
 * - Deleting across a block boundary joins the two blocks and prunes
 *   containers the deletion emptied, so the document shrinks by exactly the
 *   deleted length.
 *
 * ## Position mapping
 *
 * A [`PositionMap`] is a list of [`StepMap`]s `{at, deleted, inserted}`.
 * Positions before a step are untouched, positions after it shift by the
 * length delta, positions inside a deleted range collapse onto the step
 * point. [`Assoc`] decides which side of an insertion a boundary position
 * lands on.
 *
 * ## Usage
 *
 * ```rust
 * use clinote_engine::document::Document;
 * use clinote_engine::editing::{apply_edit, Assoc, EditOp};
 *
 * let doc = Document::from_paragraphs(["Patient has fever."]);
 * let (edited, map) = apply_edit(&doc, &EditOp::insert(12, "high ")).unwrap();
 *
 * assert_eq!(edited.text(), "Patient has high fever.");
 * assert_eq!(map.map(12, Assoc::After), 17);
 * ```
 */

pub mod apply;
pub mod ops;
pub mod position_map;

pub use apply::apply_edit;
pub use ops::{EditError, EditOp};
pub use position_map::{Assoc, PositionMap, StepMap};
