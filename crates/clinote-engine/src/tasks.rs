//! Task derivation from the full text of a note.
//!
//! One combined pattern scans the text for configured keyword phrases and for
//! capitalised words (optionally followed by a dose such as `500 mg`) that
//! may name a medicine. Keywords contribute their configured tasks; medicine
//! candidates that the fuzzy index accepts contribute one verification task.

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;

use crate::lexicon::Lexicon;

/// Deduplicated tasks in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSet {
    tasks: Vec<String>,
    seen: HashSet<String>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `task` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, task: impl Into<String>) -> bool {
        let task = task.into();
        if self.seen.contains(&task) {
            return false;
        }
        self.seen.insert(task.clone());
        self.tasks.push(task);
        true
    }

    pub fn extend<I, S>(&mut self, tasks: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for task in tasks {
            self.insert(task);
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, task: &str) -> bool {
        self.seen.contains(task)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tasks
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tasks
    }
}

/// Builds task lists from note text against a shared lexicon.
#[derive(Debug, Clone)]
pub struct TaskDeriver {
    lexicon: Arc<Lexicon>,
    pattern: Option<Regex>,
}

const KEYWORD_GROUP: usize = 1;
const MEDICINE_GROUP: usize = 2;

impl TaskDeriver {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        let pattern = build_pattern(&lexicon);
        Self { lexicon, pattern }
    }

    pub fn derive(&self, text: &str) -> TaskSet {
        let mut tasks = TaskSet::new();
        let Some(pattern) = &self.pattern else {
            return tasks;
        };

        for caps in pattern.captures_iter(text) {
            if let Some(keyword) = caps.get(KEYWORD_GROUP) {
                tasks.extend(self.lexicon.tasks_for(keyword.as_str()).iter().cloned());
            } else if let Some(candidate) = caps.get(MEDICINE_GROUP) {
                let matched = candidate.as_str().trim();
                let name = matched
                    .split(|c: char| c.is_whitespace() || c.is_ascii_digit())
                    .next()
                    .unwrap_or_default();
                if name.chars().count() <= 2 {
                    continue;
                }
                if let Some(medicine) = self.lexicon.medicines().search(name) {
                    log::trace!("medicine candidate {matched:?} -> {}", medicine.name);
                    tasks.insert(format!(
                        "Verify order for {} (found based on \"{}\"). Check dosage.",
                        medicine.name, matched
                    ));
                }
            }
        }
        log::debug!(
            "derived {} tasks from {} chars",
            tasks.len(),
            text.chars().count()
        );
        tasks
    }
}

fn build_pattern(lexicon: &Lexicon) -> Option<Regex> {
    let mut phrases: Vec<&str> = lexicon.keywords().phrases().collect();
    phrases.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
    let alternation = phrases
        .iter()
        .map(|p| {
            p.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");
    // Always a valid group, even with no keywords.
    let keywords = if alternation.is_empty() {
        r"[^\s\S]".to_string()
    } else {
        alternation
    };

    let unicode = format!(
        r"(?i:\b({keywords})\b)|(\p{{Lu}}\p{{Ll}}+(?:\s*\d{{1,4}}\s?(?i:mg|ml|mcg|units?)\b)?)"
    );
    match Regex::new(&unicode) {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::warn!("task pattern falling back to ASCII classes: {e}");
            let ascii = format!(
                r"(?i:\b({keywords})\b)|([A-Z][a-z]+(?:\s*[0-9]{{1,4}}\s?(?i:mg|ml|mcg|units?)\b)?)"
            );
            Regex::new(&ascii)
                .inspect_err(|e| log::warn!("task derivation disabled: {e}"))
                .ok()
        }
    }
}
