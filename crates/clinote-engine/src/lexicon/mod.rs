//! Lexical matching against the clinical keyword dictionary and the
//! medicine catalog.
//!
//! A [`Lexicon`] is built once from an [`EngineConfig`] and is read-only
//! afterwards; matching is a pure function of the lexicon and the input.
//! An empty dictionary or catalog is not an error, it simply never matches.

pub mod fuzzy;
pub mod keywords;
pub mod tokenize;

pub use fuzzy::{MIN_QUERY_CHARS, MedicineIndex, MedicineMatch};
pub use keywords::KeywordSet;
pub use tokenize::WordTokenizer;

use std::collections::HashMap;

use serde::Serialize;

use crate::config::{EngineConfig, KeywordEntry, Medicine};

/// Outcome of matching a word or a sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchResult {
    pub matched_keyword: Option<String>,
    pub matched_medicine: Option<MedicineMatch>,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        self.matched_keyword.is_some() || self.matched_medicine.is_some()
    }

    fn keyword(phrase: &str) -> Self {
        Self {
            matched_keyword: Some(phrase.to_string()),
            matched_medicine: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    keywords: KeywordSet,
    keyword_tasks: HashMap<String, Vec<String>>,
    medicines: MedicineIndex,
    tokenizer: WordTokenizer,
}

impl Lexicon {
    pub fn new(keywords: &[KeywordEntry], medicines: &[Medicine], fuzzy_threshold: f64) -> Self {
        let mut keyword_tasks: HashMap<String, Vec<String>> = HashMap::new();
        for entry in keywords {
            keyword_tasks
                .entry(normalize(&entry.phrase))
                .or_insert_with(|| entry.tasks.clone());
        }
        let names = medicines.iter().map(|m| m.name.clone());
        let lexicon = Self {
            keywords: KeywordSet::new(keywords.iter().map(|k| k.phrase.as_str())),
            keyword_tasks,
            medicines: MedicineIndex::new(names, fuzzy_threshold),
            tokenizer: WordTokenizer::new(),
        };
        log::debug!(
            "lexicon built: {} keywords, {} medicines, threshold {}",
            lexicon.keywords.len(),
            lexicon.medicines.len(),
            fuzzy_threshold
        );
        lexicon
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.keywords, &config.medicines, config.fuzzy_threshold)
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn medicines(&self) -> &MedicineIndex {
        &self.medicines
    }

    pub fn tokenizer(&self) -> &WordTokenizer {
        &self.tokenizer
    }

    /// Tasks configured for a keyword, ignoring case and runs of whitespace.
    pub fn tasks_for(&self, keyword: &str) -> &[String] {
        self.keyword_tasks
            .get(&normalize(keyword))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Keyword first, then the medicine catalog.
    pub fn match_word(&self, word: &str) -> MatchResult {
        if let Some(phrase) = self.keywords.lookup(word) {
            return MatchResult::keyword(phrase);
        }
        MatchResult {
            matched_keyword: None,
            matched_medicine: self.medicines.search(word),
        }
    }

    /// Any word of the sentence matching, or any multi-word keyword phrase
    /// contained in it.
    pub fn match_sentence(&self, text: &str) -> MatchResult {
        for word in self.tokenizer.words(text) {
            let result = self.match_word(word);
            if result.is_match() {
                return result;
            }
        }
        self.keywords
            .find_phrase_in(text)
            .map(MatchResult::keyword)
            .unwrap_or_default()
    }
}

fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
