use serde::Serialize;

/// Shortest query that is ever looked up.
pub const MIN_QUERY_CHARS: usize = 3;

/// Best catalog entry for a query. `score` is in `[0, 1]`, 0 being exact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineMatch {
    pub name: String,
    pub score: f64,
}

/// Approximate-match index over medicine names.
#[derive(Debug, Clone, Default)]
pub struct MedicineIndex {
    names: Vec<String>,
    /// Lowercased names as char vectors, same order as `names`.
    folded: Vec<Vec<char>>,
    threshold: f64,
}

impl MedicineIndex {
    pub fn new<I, S>(names: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|n: &String| !n.trim().is_empty())
            .collect();
        let folded = names
            .iter()
            .map(|n| n.to_lowercase().chars().collect())
            .collect();
        Self {
            names,
            folded,
            threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Best-scoring name for `query` if it is within the threshold.
    ///
    /// Queries shorter than [`MIN_QUERY_CHARS`] never match. Ties keep the
    /// earlier catalog entry.
    pub fn search(&self, query: &str) -> Option<MedicineMatch> {
        let query: Vec<char> = query.trim().to_lowercase().chars().collect();
        if query.len() < MIN_QUERY_CHARS {
            return None;
        }
        let (index, score) = self
            .folded
            .iter()
            .enumerate()
            .map(|(i, name)| (i, normalized_distance(&query, name)))
            .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
                Some((_, best_score)) if best_score <= score => best,
                _ => Some((i, score)),
            })?;
        (score <= self.threshold).then(|| MedicineMatch {
            name: self.names[index].clone(),
            score,
        })
    }
}

/// Levenshtein distance divided by the longer length.
fn normalized_distance(a: &[char], b: &[char]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 0.0;
    }
    levenshtein(a, b) as f64 / longest as f64
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            row[j + 1] = substitution.min(prev[j + 1] + 1).min(row[j] + 1);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}
