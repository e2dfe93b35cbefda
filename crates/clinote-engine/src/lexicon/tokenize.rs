use regex::Regex;

/// Splits text into words on Unicode letter/number boundaries.
///
/// If the Unicode word pattern cannot be built, words are split on ASCII
/// alphanumerics instead.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    unicode: Option<Regex>,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self::with_pattern(r"[\p{L}\p{N}]+")
    }

    pub(crate) fn with_pattern(pattern: &str) -> Self {
        let unicode = match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                log::warn!("word tokenizer falling back to ASCII splitting: {e}");
                None
            }
        };
        Self { unicode }
    }

    pub fn is_unicode(&self) -> bool {
        self.unicode.is_some()
    }

    /// Words of `text` in order of appearance.
    pub fn words<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match &self.unicode {
            Some(regex) => regex.find_iter(text).map(|m| m.as_str()).collect(),
            None => ascii_words(text),
        }
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn ascii_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = None;
    for (idx, b) in text.bytes().enumerate() {
        if b.is_ascii_alphanumeric() {
            if start.is_none() {
                start = Some(idx);
            }
        } else if let Some(s) = start.take() {
            words.push(&text[s..idx]);
        }
    }
    if let Some(s) = start {
        words.push(&text[s..]);
    }
    words
}
