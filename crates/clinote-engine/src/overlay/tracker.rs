use std::sync::Arc;

use crate::config::{HighlightMode, RecomputePolicy};
use crate::document::Document;
use crate::editing::PositionMap;
use crate::lexicon::Lexicon;
use crate::overlay::{DecorationSet, compute_decorations};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Created, nothing computed yet.
    Initialized,
    /// Content changed since the last computation.
    Stale,
    /// Decorations describe the latest document.
    Current,
}

/// Keeps the decoration set of one live document in step with its edits.
#[derive(Debug)]
pub struct OverlayTracker {
    lexicon: Arc<Lexicon>,
    mode: HighlightMode,
    policy: RecomputePolicy,
    state: TrackerState,
    decorations: DecorationSet,
    /// Text the current decorations were computed from.
    source: String,
    provisional: Option<DecorationSet>,
    recomputations: usize,
}

impl OverlayTracker {
    pub fn new(lexicon: Arc<Lexicon>, mode: HighlightMode, policy: RecomputePolicy) -> Self {
        Self {
            lexicon,
            mode,
            policy,
            state: TrackerState::Initialized,
            decorations: DecorationSet::default(),
            source: String::new(),
            provisional: None,
            recomputations: 0,
        }
    }

    /// Compute the overlay for a freshly created document. Under the lazy
    /// policy this is deferred to the first read.
    pub fn init(&mut self, doc: &Document) {
        self.state = TrackerState::Initialized;
        self.provisional = None;
        if self.policy == RecomputePolicy::Eager {
            self.recompute(doc);
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Number of full recomputations so far.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// React to an edit that produced `doc` through `map`.
    ///
    /// Without a content change the current set is carried over and the
    /// state is kept. A content change discards the set and recomputes it,
    /// immediately or on the next read depending on the policy.
    pub fn on_edit(&mut self, doc: &Document, map: &PositionMap, content_changed: bool) {
        if !content_changed {
            if self.state == TrackerState::Current {
                self.decorations = self.decorations.map(map, doc.version());
            }
            if let Some(provisional) = &self.provisional {
                self.provisional = Some(provisional.map(map, doc.version()));
            }
            return;
        }

        let previous = match self.state {
            TrackerState::Current => Some(&self.decorations),
            TrackerState::Stale | TrackerState::Initialized => self.provisional.as_ref(),
        };
        self.provisional = previous.map(|set| set.map(map, doc.version()));
        self.decorations = DecorationSet::empty(doc.version());
        self.state = TrackerState::Stale;
        log::debug!("overlay stale at generation {}", doc.version());

        if self.policy == RecomputePolicy::Eager {
            self.recompute(doc);
        }
    }

    /// The overlay for `doc`, recomputed first if it is out of date.
    ///
    /// The set is reused only when it was computed for the same version and
    /// the same text, so passing an unrelated document never returns a
    /// foreign overlay.
    pub fn decorations(&mut self, doc: &Document) -> &DecorationSet {
        if !self.is_current_for(doc) {
            self.recompute(doc);
        }
        &self.decorations
    }

    fn is_current_for(&self, doc: &Document) -> bool {
        self.state == TrackerState::Current
            && self.decorations.generation() == doc.version()
            && self.source == doc.text()
    }

    /// The last overlay carried through the edits since it was computed.
    /// Only present while stale.
    pub fn provisional(&self) -> Option<&DecorationSet> {
        match self.state {
            TrackerState::Stale => self.provisional.as_ref(),
            TrackerState::Initialized | TrackerState::Current => None,
        }
    }

    fn recompute(&mut self, doc: &Document) {
        self.decorations = compute_decorations(doc, &self.lexicon, self.mode);
        self.source = doc.text().to_string();
        self.provisional = None;
        self.state = TrackerState::Current;
        self.recomputations += 1;
        log::debug!(
            "overlay recomputed: {} decorations at generation {}",
            self.decorations.len(),
            doc.version()
        );
    }
}
