pub mod config;
pub mod debounce;
pub mod document;
pub mod editing;
pub mod engine;
pub mod lexicon;
pub mod overlay;
pub mod segment;
pub mod tasks;

// Re-export key types for easier usage
pub use config::{
    EngineConfig, HighlightMode, KeywordEntry, LexiconError, Medicine, RecomputePolicy,
};
pub use document::{BlockKind, Document, DocumentError, Node, RangeError, Span};
pub use editing::{EditError, EditOp, PositionMap, apply_edit};
pub use engine::AnnotationEngine;
pub use lexicon::{Lexicon, MatchResult, MedicineMatch};
pub use overlay::{
    Classification, Decoration, DecorationSet, DisplayHint, TrackerState, term_highlights,
};
pub use segment::{Sentence, segment};
pub use tasks::{TaskDeriver, TaskSet};
