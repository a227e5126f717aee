//! Lightweight text insights: word count, key terms and a summary line.

use serde::Serialize;
use std::collections::HashMap;

/// Words never reported as key terms.
const COMMON_WORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "they", "have", "not", "from", "was", "were",
    "are", "will", "been", "there", "their", "what", "when", "which", "would", "could", "should",
    "into", "about", "your", "than", "then", "them", "these", "those", "some",
];

/// Terms shorter than this are ignored.
const MIN_TERM_LEN: usize = 4;

/// Below this many characters there is nothing worth analysing.
const MIN_TEXT_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyTerm {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Insights {
    pub word_count: usize,
    pub key_terms: Vec<KeyTerm>,
    pub summary: String,
}

/// Analysis collaborator. Input is plain text, never markup.
pub trait Analyzer {
    fn analyze(&self, text: &str) -> Insights;
}

/// Frequency-based analyzer.
#[derive(Debug, Clone)]
pub struct KeywordAnalyzer {
    max_terms: usize,
}

impl KeywordAnalyzer {
    pub fn new(max_terms: usize) -> Self {
        Self { max_terms }
    }
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Analyzer for KeywordAnalyzer {
    fn analyze(&self, text: &str) -> Insights {
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();

        if text.trim().chars().count() < MIN_TEXT_LEN {
            return Insights {
                word_count: words.len(),
                key_terms: Vec::new(),
                summary: text.trim().to_string(),
            };
        }

        // first occurrence index keeps ordering deterministic on ties
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, word) in words.iter().enumerate() {
            let lower = word.to_lowercase();
            if lower.chars().count() < MIN_TERM_LEN || COMMON_WORDS.contains(&lower.as_str()) {
                continue;
            }
            counts.entry(lower).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(term, (count, first))| (term, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let key_terms = ranked
            .into_iter()
            .take(self.max_terms)
            .map(|(term, count, _)| KeyTerm { term, count })
            .collect();

        Insights {
            word_count: words.len(),
            key_terms,
            summary: first_sentence(text),
        }
    }
}

fn first_sentence(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.find(['.', '!', '?']) {
        Some(end) => trimmed[..=end].to_string(),
        None => trimmed.to_string(),
    }
}
