use crate::document::Span;

/// Which side a position sticks to when an insertion lands exactly on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// Stay before inserted content.
    Before,
    /// Move past inserted content.
    After,
}

/// One replaced region: `deleted` characters at `at` became `inserted` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepMap {
    pub at: usize,
    pub deleted: usize,
    pub inserted: usize,
}

impl StepMap {
    pub fn new(at: usize, deleted: usize, inserted: usize) -> Self {
        Self {
            at,
            deleted,
            inserted,
        }
    }

    /// Signed change in document length caused by this step.
    pub fn delta(&self) -> isize {
        self.inserted as isize - self.deleted as isize
    }

    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        let end = self.at + self.deleted;
        if pos < self.at {
            return pos;
        }
        if pos > end {
            return pos - self.deleted + self.inserted;
        }
        // Inside [at, end]: the boundaries of a replaced range keep their side,
        // anything strictly inside collapses onto the step point.
        let side = if self.deleted == 0 {
            assoc
        } else if pos == self.at {
            Assoc::Before
        } else if pos == end {
            Assoc::After
        } else {
            assoc
        };
        match side {
            Assoc::Before => self.at,
            Assoc::After => self.at + self.inserted,
        }
    }
}

/// Position remapping produced by an edit, applied step by step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap {
    steps: Vec<StepMap>,
}

impl PositionMap {
    /// The mapping of an edit that left content untouched.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn from_step(step: StepMap) -> Self {
        Self { steps: vec![step] }
    }

    pub fn push(&mut self, step: StepMap) {
        if step.deleted > 0 || step.inserted > 0 {
            self.steps.push(step);
        }
    }

    pub fn steps(&self) -> &[StepMap] {
        &self.steps
    }

    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn delta(&self) -> isize {
        self.steps.iter().map(StepMap::delta).sum()
    }

    pub fn map(&self, pos: usize, assoc: Assoc) -> usize {
        self.steps
            .iter()
            .fold(pos, |pos, step| step.map(pos, assoc))
    }

    /// Map a span: the start sticks after insertions at its edge, the end
    /// before them. Returns `None` when the span collapses.
    pub fn map_span(&self, span: Span) -> Option<Span> {
        let from = self.map(span.from, Assoc::After);
        let to = self.map(span.to, Assoc::Before);
        (from < to).then(|| Span::new(from, to))
    }
}
