//! Significant-term extraction shared by résumé and job analysis.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of frequency-ranked terms kept for a job description.
pub const JOB_KEYWORD_LIMIT: usize = 20;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").unwrap());

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "with", "this", "that", "have", "from", "they", "been", "will",
    "would", "could", "should", "may", "might", "must", "can", "shall", "your", "about", "their",
    "there", "what", "when", "which", "into", "also", "more", "than", "them", "were", "other",
    "such", "each", "over", "only", "well", "able", "including",
];

fn is_significant(word: &str) -> bool {
    word.len() > 3 && !STOP_WORDS.contains(&word)
}

/// Lower-cased significant terms in order of appearance, repeats included.
fn significant_terms(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| is_significant(w))
}

/// Every significant term in the text.
pub fn keyword_set(text: &str) -> BTreeSet<String> {
    significant_terms(text).collect()
}

/// Terms ranked by frequency, highest first. Equal counts keep first-occurrence order.
pub fn ranked_keywords(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, term) in significant_terms(text).enumerate() {
        counts.entry(term).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().map(|(term, count, _)| (term, count)).collect()
}

/// The `limit` most frequent terms.
pub fn top_keywords(text: &str, limit: usize) -> Vec<String> {
    ranked_keywords(text)
        .into_iter()
        .take(limit)
        .map(|(term, _)| term)
        .collect()
}
