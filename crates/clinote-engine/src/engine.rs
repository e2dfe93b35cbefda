//! The per-document annotation engine.
//!
//! An [`AnnotationEngine`] owns one live [`Document`] together with its
//! highlight overlay and task list. Edits go in through
//! [`AnnotationEngine::apply_edit`]; the overlay follows immediately, task
//! derivation is debounced and runs from [`AnnotationEngine::poll`].

use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::debounce::Debouncer;
use crate::document::Document;
use crate::editing::{self, Assoc, EditError, EditOp, PositionMap};
use crate::lexicon::Lexicon;
use crate::overlay::{DecorationSet, OverlayTracker, TrackerState, term_highlights};
use crate::tasks::{TaskDeriver, TaskSet};

#[derive(Debug)]
pub struct AnnotationEngine {
    document: Document,
    selection: Range<usize>,
    tracker: OverlayTracker,
    deriver: TaskDeriver,
    tasks: TaskSet,
    timer: Debouncer,
    task_runs: usize,
}

impl AnnotationEngine {
    pub fn new(config: &EngineConfig, document: Document) -> Self {
        Self::with_lexicon(config, Arc::new(Lexicon::from_config(config)), document)
    }

    /// Build with an already constructed lexicon, shared between documents.
    pub fn with_lexicon(config: &EngineConfig, lexicon: Arc<Lexicon>, document: Document) -> Self {
        let mut tracker =
            OverlayTracker::new(lexicon.clone(), config.highlight_mode, config.recompute);
        tracker.init(&document);
        let end = document.len();
        let mut engine = Self {
            document,
            selection: end..end,
            tracker,
            deriver: TaskDeriver::new(lexicon),
            tasks: TaskSet::new(),
            timer: Debouncer::new(config.task_debounce()),
            task_runs: 0,
        };
        engine.run_tasks();
        engine
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Apply an edit and return its position map.
    ///
    /// Content changes restart the task debounce window from `now`. A failed
    /// edit leaves the engine untouched.
    pub fn apply_edit(&mut self, op: EditOp, now: Instant) -> Result<PositionMap, EditError> {
        let (document, map) = editing::apply_edit(&self.document, &op)?;
        let changed = op.changes_content();

        self.selection = match &op {
            EditOp::Select { range } => range.clone(),
            _ => {
                let caret = map.map(op.range().end, Assoc::After);
                caret..caret
            }
        };
        self.document = document;
        self.tracker.on_edit(&self.document, &map, changed);
        if changed {
            self.timer.schedule(now);
        }
        Ok(map)
    }

    /// The overlay for the current document, recomputed if out of date.
    pub fn decorations(&mut self) -> &DecorationSet {
        self.tracker.decorations(&self.document)
    }

    /// The previous overlay carried across pending edits, while stale.
    pub fn provisional_decorations(&self) -> Option<&DecorationSet> {
        self.tracker.provisional()
    }

    pub fn tracker_state(&self) -> TrackerState {
        self.tracker.state()
    }

    /// Highlights for externally supplied terms in the current document.
    pub fn term_highlights<S: AsRef<str>>(&self, terms: &[S]) -> DecorationSet {
        term_highlights(&self.document, terms)
    }

    /// Tasks from the last derivation.
    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    pub fn tasks_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn next_task_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// How many times tasks have been derived, including at creation.
    pub fn task_runs(&self) -> usize {
        self.task_runs
    }

    /// Run task derivation if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.timer.fire_if_due(now) {
            return false;
        }
        self.run_tasks();
        true
    }

    /// Run a pending task derivation now instead of waiting.
    pub fn flush_tasks(&mut self) -> bool {
        if !self.timer.cancel() {
            return false;
        }
        self.run_tasks();
        true
    }

    /// Tear down, discarding any pending derivation.
    pub fn close(mut self) -> TaskSet {
        if self.timer.cancel() {
            log::debug!("pending task derivation cancelled on close");
        }
        std::mem::take(&mut self.tasks)
    }

    fn run_tasks(&mut self) {
        self.tasks = self.deriver.derive(self.document.text());
        self.task_runs += 1;
    }
}

impl Drop for AnnotationEngine {
    fn drop(&mut self) {
        if self.timer.cancel() {
            log::debug!("pending task derivation cancelled on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecomputePolicy;
    use crate::document::Span;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn config() -> EngineConfig {
        EngineConfig::builtin().expect("Should parse builtin lexicon")
    }

    fn engine() -> AnnotationEngine {
        AnnotationEngine::new(
            &config(),
            Document::from_paragraphs(["Patient has a fever.", "Feeling okay today."]),
        )
    }

    #[test]
    fn test_new_engine_is_annotated() {
        let mut engine = engine();
        assert_eq!(engine.tracker_state(), TrackerState::Current);
        assert_eq!(engine.decorations().spans(), vec![Span::new(21, 40)]);
        assert_eq!(engine.tasks().len(), 2);
        assert_eq!(engine.task_runs(), 1);
        assert_eq!(engine.selection(), 40..40);
        assert!(!engine.tasks_pending());
    }

    #[test]
    fn test_edit_moves_caret_and_schedules_tasks() {
        let mut engine = engine();
        let now = Instant::now();
        engine
            .apply_edit(EditOp::insert(20, " Mild cough."), now)
            .unwrap();
        assert_eq!(engine.selection(), 32..32);
        assert!(engine.tasks_pending());
        assert_eq!(
            engine.next_task_deadline(),
            Some(now + Duration::from_millis(700))
        );
        // Tasks only change once the window elapses.
        assert_eq!(engine.tasks().len(), 2);
        assert!(engine.poll(now + Duration::from_millis(700)));
        assert_eq!(engine.tasks().len(), 5);
    }

    #[test]
    fn test_selection_does_not_schedule_tasks() {
        let mut engine = engine();
        let map = engine
            .apply_edit(EditOp::select(2..5), Instant::now())
            .unwrap();
        assert!(map.is_identity());
        assert_eq!(engine.selection(), 2..5);
        assert!(!engine.tasks_pending());
    }

    #[test]
    fn test_failed_edit_leaves_state() {
        let mut engine = engine();
        let result = engine.apply_edit(EditOp::delete(10..99), Instant::now());
        assert!(result.is_err());
        assert_eq!(engine.document().version(), 0);
        assert_eq!(engine.selection(), 40..40);
    }

    #[test]
    fn test_flush_runs_pending_derivation() {
        let mut engine = engine();
        assert!(!engine.flush_tasks());
        engine
            .apply_edit(EditOp::delete(0..21), Instant::now())
            .unwrap();
        assert!(engine.flush_tasks());
        assert!(engine.tasks().is_empty());
        assert_eq!(engine.task_runs(), 2);
    }

    #[test]
    fn test_close_discards_pending_derivation() {
        let mut engine = engine();
        engine
            .apply_edit(EditOp::delete(0..21), Instant::now())
            .unwrap();
        let tasks = engine.close();
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn test_lazy_engine_serves_provisional_overlay() {
        let config = EngineConfig {
            recompute: RecomputePolicy::Lazy,
            ..config()
        };
        let doc = Document::from_paragraphs(["Feeling okay today."]);
        let mut engine = AnnotationEngine::new(&config, doc);
        assert_eq!(engine.decorations().len(), 1);
        engine
            .apply_edit(EditOp::insert(0, "Note: "), Instant::now())
            .unwrap();
        assert_eq!(engine.tracker_state(), TrackerState::Stale);
        assert_eq!(
            engine.provisional_decorations().map(DecorationSet::spans),
            Some(vec![Span::new(6, 25)])
        );
        assert_eq!(engine.decorations().spans(), vec![Span::new(0, 25)]);
    }
}
