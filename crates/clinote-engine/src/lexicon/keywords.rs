use std::collections::HashMap;

/// Case-insensitive keyword dictionary, kept in declaration order.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    phrases: Vec<String>,
    /// Lowercased phrase -> index into `phrases`.
    index: HashMap<String, usize>,
}

impl KeywordSet {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for phrase in phrases {
            let phrase = phrase.as_ref().trim();
            if phrase.is_empty() {
                continue;
            }
            let key = phrase.to_lowercase();
            if set.index.contains_key(&key) {
                continue;
            }
            set.index.insert(key, set.phrases.len());
            set.phrases.push(phrase.to_string());
        }
        set
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Phrases as declared.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    /// The declared phrase equal to `word`, ignoring case.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.index
            .get(&word.to_lowercase())
            .map(|&i| self.phrases[i].as_str())
    }

    /// First multi-word phrase contained in `text`, ignoring case.
    pub fn find_phrase_in(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.phrases
            .iter()
            .filter(|p| p.split_whitespace().nth(1).is_some())
            .find(|p| haystack.contains(&p.to_lowercase()))
            .map(String::as_str)
    }
}
