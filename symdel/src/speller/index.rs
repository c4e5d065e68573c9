//! Precalculated delete index.
use hashbrown::HashMap;
use smol_str::SmolStr;

use super::edits::edits_prefix;
use crate::lexicon::UnigramLexicon;

/// Maps every bounded-distance deletion of a dictionary word (truncated to
/// the prefix length) to the dictionary words producing it.
///
/// The index is built once and never changed afterwards.
#[derive(Debug, Default)]
pub struct DeleteIndex {
    deletes: HashMap<SmolStr, Vec<SmolStr>>,
    max_word_length: usize,
}

impl DeleteIndex {
    /// Expands every word of `lexicon` into its deletes.
    pub fn build(lexicon: &UnigramLexicon, max_distance: usize, prefix_length: usize) -> DeleteIndex {
        let mut deletes: HashMap<SmolStr, Vec<SmolStr>> = HashMap::new();
        let mut max_word_length = 0;

        for word in lexicon.keys() {
            for delete in edits_prefix(word, max_distance, prefix_length) {
                deletes.entry(delete).or_default().push(word.clone());
            }

            max_word_length = max_word_length.max(word.chars().count());
        }

        log::debug!(
            "Built delete index: {} words, {} deletes, longest word {}",
            lexicon.len(),
            deletes.len(),
            max_word_length
        );

        DeleteIndex {
            deletes,
            max_word_length,
        }
    }

    /// gets the dictionary words that produce `delete`
    pub fn get(&self, delete: &str) -> Option<&[SmolStr]> {
        self.deletes.get(delete).map(|words| words.as_slice())
    }

    /// whether `delete` is a key of the index
    pub fn contains(&self, delete: &str) -> bool {
        self.deletes.contains_key(delete)
    }

    /// number of distinct deletes
    pub fn len(&self) -> usize {
        self.deletes.len()
    }

    /// whether the index holds no deletes at all
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
    }

    /// length in characters of the longest dictionary word
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// iterates over all deletes and the words producing them
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SmolStr])> {
        self.deletes
            .iter()
            .map(|(delete, words)| (delete.as_str(), words.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon(entries: &[(&str, u64)]) -> UnigramLexicon {
        entries.iter().map(|(w, f)| (SmolStr::new(w), *f)).collect()
    }

    #[test]
    fn shared_deletes() {
        let index = DeleteIndex::build(&lexicon(&[("abcde", 100), ("abcdef", 90)]), 2, 7);

        let mut words: Vec<&str> = index.get("abcd").unwrap().iter().map(|w| w.as_str()).collect();
        words.sort();
        assert_eq!(words, vec!["abcde", "abcdef"]);
        assert_eq!(index.max_word_length(), 6);
    }

    #[test]
    fn words_map_to_themselves() {
        let index = DeleteIndex::build(&lexicon(&[("where", 1), ("is", 2)]), 2, 7);

        assert!(index.get("where").unwrap().iter().any(|w| w == "where"));
        assert!(index.get("is").unwrap().iter().any(|w| w == "is"));
        assert!(index.get("").unwrap().iter().any(|w| w == "is"));
        assert!(index.get("").unwrap().iter().all(|w| w != "where"));
    }

    #[test]
    fn words_are_distinct_per_delete() {
        let index = DeleteIndex::build(&lexicon(&[("aaa", 1), ("aab", 1)]), 2, 7);

        for (_, words) in index.iter() {
            let mut sorted = words.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), words.len());
        }
    }

    #[test]
    fn long_words_are_truncated() {
        let index = DeleteIndex::build(&lexicon(&[("questionnaire", 1)]), 1, 7);

        assert!(index.contains("questio"));
        assert!(index.contains("qestio"));
        assert!(!index.contains("questionnaire"));
        assert_eq!(index.max_word_length(), 13);
        assert_eq!(index.len(), 8);
    }

    #[test]
    fn empty_lexicon() {
        let index = DeleteIndex::build(&UnigramLexicon::new(), 2, 7);
        assert!(index.is_empty());
        assert_eq!(index.max_word_length(), 0);
    }
}
