//! Keyword extraction.
//!
//! Keywords are the most frequent nouns of a text:
//!
//! 1. lower-case the text and delete everything that is neither a word character nor whitespace
//! 2. split on whitespace
//! 3. part-of-speech tag each token ([`Tagger`])
//! 4. keep alphabetic nouns that are not stopwords ([`StopwordSet`])
//! 5. rank by frequency, ties broken by first occurrence
//!
//! The linguistic resources are built once by [`KeywordExtractor::new`]; callers are expected to
//! construct a single extractor at startup and share it.

mod stopwords;
mod tagger;

pub use stopwords::StopwordSet;
pub use tagger::{Tag, Tagger};

use regex::Regex;
use std::collections::HashMap;

/// Extracts ranked keywords from free text.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    strip_pattern: Regex,
    tagger: Tagger,
    stopwords: StopwordSet,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            // Literal pattern; compilation cannot fail.
            strip_pattern: Regex::new(r"[^\w\s]").expect("keyword strip pattern is valid"),
            tagger: Tagger::new(),
            stopwords: StopwordSet::english(),
        }
    }

    /// Return up to `count` keywords of `text`, most frequent first.
    ///
    /// Equal counts keep the order in which the words first appear. Empty or keyword-free input
    /// yields an empty list, as does `count == 0`.
    pub fn extract_keywords(&self, text: &str, count: usize) -> Vec<String> {
        if count == 0 {
            return Vec::new();
        }

        let normalised = self.normalise(text);
        let tokens: Vec<&str> = normalised.split_whitespace().collect();
        let tagged = self.tagger.tag(&tokens);

        let nouns = tagged.into_iter().filter_map(|(word, tag)| {
            let keep = tag.is_noun()
                && word.chars().all(char::is_alphabetic)
                && !self.stopwords.contains(word);
            keep.then_some(word)
        });

        most_common(nouns, count)
    }

    fn normalise(&self, text: &str) -> String {
        self.strip_pattern
            .replace_all(&text.to_lowercase(), "")
            .into_owned()
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Count occurrences and return the `n` most common, ties in first-seen order.
fn most_common<'a>(words: impl Iterator<Item = &'a str>, n: usize) -> Vec<String> {
    let mut positions: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for word in words {
        match positions.get(word) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(n)
        .map(|(word, _)| word.to_string())
        .collect()
}
