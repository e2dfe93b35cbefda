use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_LEXICON: &str = include_str!("builtin_lexicon.toml");

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to parse lexicon: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A keyword phrase and the tasks it suggests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub phrase: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// A catalog medicine. Only `name` is used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    #[serde(default)]
    pub dosages: Vec<String>,
}

/// Which sentences get a decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// Only sentences nothing in the lexicon recognises.
    #[default]
    UnmatchedOnly,
    /// Every sentence, tagged with its classification.
    AllSentences,
}

/// When decorations are rebuilt after a content change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecomputePolicy {
    /// Inside the edit.
    #[default]
    Eager,
    /// On the next read of the decorations.
    Lazy,
}

/// Everything the engine needs, passed in at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub keywords: Vec<KeywordEntry>,
    pub medicines: Vec<Medicine>,
    pub fuzzy_threshold: f64,
    pub task_debounce_ms: u64,
    pub highlight_mode: HighlightMode,
    pub recompute: RecomputePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            medicines: Vec::new(),
            fuzzy_threshold: 0.4,
            task_debounce_ms: 700,
            highlight_mode: HighlightMode::default(),
            recompute: RecomputePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// The sample dictionary and medicine catalog shipped with the crate.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_toml_str(BUILTIN_LEXICON)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, LexiconError> {
        Ok(toml::from_str(content)?)
    }

    pub fn task_debounce(&self) -> Duration {
        Duration::from_millis(self.task_debounce_ms)
    }
}
