//! Spelling correction against a symmetric delete index.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use self::index::DeleteIndex;
use self::worker::LookupWorker;
use crate::constants::{DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_PREFIX_LENGTH};
use crate::distance::{DamerauOsa, StringDistance};
use crate::lexicon::{Bigram, BigramLexicon, UnigramLexicon};
use crate::speller::error::SpellerError;
use crate::speller::suggestion::Suggestion;

mod compound;
pub mod edits;
pub mod error;
pub mod index;
pub mod suggestion;
mod worker;

/// Parameters the delete index is built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellerConfig {
    /// largest edit distance a lookup may ask for
    pub max_dictionary_edit_distance: usize,
    /// number of leading characters of a word used for generating deletes
    pub prefix_length: usize,
}

impl SpellerConfig {
    /// the default configuration: edit distance 2, prefix length 7
    pub const fn default() -> SpellerConfig {
        SpellerConfig {
            max_dictionary_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            prefix_length: DEFAULT_PREFIX_LENGTH,
        }
    }
}

/// Controls how many suggestions a lookup returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// The suggestion with the highest frequency among those of the smallest
    /// edit distance found
    Top,
    /// All suggestions of the smallest edit distance found
    Closest,
    /// All suggestions within the maximum edit distance
    All,
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Verbosity::Top),
            "closest" => Ok(Verbosity::Closest),
            "all" => Ok(Verbosity::All),
            _ => Err(format!("unknown verbosity {:?}, expected top, closest or all", s)),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verbosity::Top => "top",
            Verbosity::Closest => "closest",
            Verbosity::All => "all",
        };
        f.write_str(s)
    }
}

/// Spelling correction operations.
pub trait Speller {
    /// Suggestions for `input` within the dictionary max edit distance.
    fn lookup(
        &self,
        input: &str,
        verbosity: Verbosity,
        include_unknown: bool,
    ) -> Result<Vec<Suggestion>, SpellerError>;

    /// Suggestions for `input` within `max_edit_distance`.
    ///
    /// The result is sorted by ascending distance and descending frequency.
    /// When nothing is found and `include_unknown` is set, the input itself
    /// is returned with distance `max_edit_distance + 1` and frequency 0.
    fn lookup_with_max_distance(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
        include_unknown: bool,
    ) -> Result<Vec<Suggestion>, SpellerError>;

    /// Corrects a whitespace separated phrase as a whole, merging and
    /// splitting words where that gives a likelier result. Always returns
    /// exactly one suggestion.
    fn lookup_compound(
        &self,
        phrase: &str,
        max_edit_distance: usize,
        include_unknown: bool,
    ) -> Result<Vec<Suggestion>, SpellerError>;

    /// the edit distance the dictionary was precalculated for
    fn max_dictionary_edit_distance(&self) -> usize;
}

/// Speller over an immutable unigram/bigram vocabulary and its delete index.
///
/// Built once with a [`SymSpellBuilder`]; every lookup afterwards only reads
/// it, so a shared `Arc<SymSpell>` can serve any number of threads.
pub struct SymSpell {
    config: SpellerConfig,
    unigrams: UnigramLexicon,
    bigrams: BigramLexicon,
    deletes: DeleteIndex,
    string_distance: Box<dyn StringDistance + Send + Sync>,
    total_count: u64,
}

impl fmt::Debug for SymSpell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymSpell")
            .field("config", &self.config)
            .field("unigrams", &self.unigrams.len())
            .field("bigrams", &self.bigrams.len())
            .field("deletes", &self.deletes.len())
            .field("total_count", &self.total_count)
            .finish()
    }
}

impl Speller for SymSpell {
    #[inline]
    fn lookup(
        &self,
        input: &str,
        verbosity: Verbosity,
        include_unknown: bool,
    ) -> Result<Vec<Suggestion>, SpellerError> {
        self.lookup_with_max_distance(
            input,
            verbosity,
            self.config.max_dictionary_edit_distance,
            include_unknown,
        )
    }

    fn lookup_with_max_distance(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
        include_unknown: bool,
    ) -> Result<Vec<Suggestion>, SpellerError> {
        self.check_lookup(max_edit_distance)?;

        let worker = LookupWorker::new(self, input, verbosity, max_edit_distance, include_unknown);
        Ok(worker.suggest())
    }

    fn lookup_compound(
        &self,
        phrase: &str,
        max_edit_distance: usize,
        include_unknown: bool,
    ) -> Result<Vec<Suggestion>, SpellerError> {
        self.check_lookup(max_edit_distance)?;

        Ok(vec![self.correct_compound(phrase, max_edit_distance, include_unknown)])
    }

    #[inline]
    fn max_dictionary_edit_distance(&self) -> usize {
        self.config.max_dictionary_edit_distance
    }
}

impl SymSpell {
    /// Builds the delete index for `unigrams` and wraps the result for sharing.
    pub fn new(
        config: SpellerConfig,
        unigrams: UnigramLexicon,
        bigrams: BigramLexicon,
        string_distance: Box<dyn StringDistance + Send + Sync>,
    ) -> Result<Arc<SymSpell>, SpellerError> {
        if config.prefix_length < 1 {
            return Err(SpellerError::InvalidPrefixLength(config.prefix_length));
        }

        let total_count = unigrams
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count));
        if total_count == 0 && !unigrams.is_empty() {
            return Err(SpellerError::ZeroTotalCount);
        }

        let deletes = DeleteIndex::build(
            &unigrams,
            config.max_dictionary_edit_distance,
            config.prefix_length,
        );

        Ok(Arc::new(SymSpell {
            config,
            unigrams,
            bigrams,
            deletes,
            string_distance,
            total_count,
        }))
    }

    fn check_lookup(&self, max_edit_distance: usize) -> Result<(), SpellerError> {
        if max_edit_distance > self.config.max_dictionary_edit_distance {
            return Err(SpellerError::InvalidMaxEditDistance {
                requested: max_edit_distance,
                max: self.config.max_dictionary_edit_distance,
            });
        }

        if self.unigrams.is_empty() {
            return Err(SpellerError::NotInitialized);
        }

        Ok(())
    }

    /// Deletes of `word` as generated for the index, continuing from
    /// `edit_distance` up to the dictionary max edit distance.
    pub fn edits(
        &self,
        word: &str,
        edit_distance: usize,
        deletes: HashSet<SmolStr>,
    ) -> HashSet<SmolStr> {
        edits::edits(
            word,
            edit_distance,
            self.config.max_dictionary_edit_distance,
            deletes,
        )
    }

    /// All index keys generated for the dictionary word `key`.
    pub fn edits_prefix(&self, key: &str) -> HashSet<SmolStr> {
        edits::edits_prefix(
            key,
            self.config.max_dictionary_edit_distance,
            self.config.prefix_length,
        )
    }

    /// the configuration the index was built with
    pub fn config(&self) -> &SpellerConfig {
        &self.config
    }

    /// the number of leading characters used for generating deletes
    pub fn prefix_length(&self) -> usize {
        self.config.prefix_length
    }

    /// the word frequencies
    pub fn unigram_lexicon(&self) -> &UnigramLexicon {
        &self.unigrams
    }

    /// the word pair frequencies
    pub fn bigram_lexicon(&self) -> &BigramLexicon {
        &self.bigrams
    }

    /// the precalculated delete index
    pub fn deletes(&self) -> &DeleteIndex {
        &self.deletes
    }

    /// sum of all word frequencies
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// length in characters of the longest dictionary word
    pub fn max_word_length(&self) -> usize {
        self.deletes.max_word_length()
    }

    /// the metric used to verify candidates
    pub fn string_distance(&self) -> &(dyn StringDistance + Send + Sync) {
        &*self.string_distance
    }
}

/// Collects the vocabulary and configuration of a [`SymSpell`].
pub struct SymSpellBuilder {
    config: SpellerConfig,
    unigrams: UnigramLexicon,
    bigrams: BigramLexicon,
    string_distance: Box<dyn StringDistance + Send + Sync>,
}

impl Default for SymSpellBuilder {
    fn default() -> Self {
        SymSpellBuilder::new()
    }
}

impl SymSpellBuilder {
    /// starts with the default configuration, empty lexicons and the
    /// optimal string alignment metric
    pub fn new() -> SymSpellBuilder {
        SymSpellBuilder {
            config: SpellerConfig::default(),
            unigrams: UnigramLexicon::new(),
            bigrams: BigramLexicon::new(),
            string_distance: Box::new(DamerauOsa),
        }
    }

    /// replaces the whole configuration
    pub fn config(mut self, config: SpellerConfig) -> Self {
        self.config = config;
        self
    }

    /// sets the largest edit distance lookups may use
    pub fn max_dictionary_edit_distance(mut self, max_dictionary_edit_distance: usize) -> Self {
        self.config.max_dictionary_edit_distance = max_dictionary_edit_distance;
        self
    }

    /// sets the number of leading characters used for generating deletes
    pub fn prefix_length(mut self, prefix_length: usize) -> Self {
        self.config.prefix_length = prefix_length;
        self
    }

    /// sets the word frequencies, replacing earlier ones
    pub fn unigram_lexicon<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<SmolStr>,
    {
        self.unigrams = entries
            .into_iter()
            .map(|(word, count)| (word.into(), count))
            .collect();
        self
    }

    /// sets the word pair frequencies, replacing earlier ones
    pub fn bigram_lexicon<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (Bigram, u64)>,
    {
        self.bigrams = entries.into_iter().collect();
        self
    }

    /// sets the metric used to verify candidates
    pub fn string_distance<D>(mut self, string_distance: D) -> Self
    where
        D: StringDistance + Send + Sync + 'static,
    {
        self.string_distance = Box::new(string_distance);
        self
    }

    /// Builds the delete index.
    pub fn build(self) -> Result<Arc<SymSpell>, SpellerError> {
        SymSpell::new(
            self.config,
            self.unigrams,
            self.bigrams,
            self.string_distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_str() {
        assert_eq!("top".parse::<Verbosity>(), Ok(Verbosity::Top));
        assert_eq!("closest".parse::<Verbosity>(), Ok(Verbosity::Closest));
        assert_eq!("all".parse::<Verbosity>(), Ok(Verbosity::All));
        assert!("some".parse::<Verbosity>().is_err());
        assert_eq!(Verbosity::Closest.to_string(), "closest");
    }

    #[test]
    fn config_json() {
        let cfg: SpellerConfig =
            serde_json::from_str(r#"{"max_dictionary_edit_distance":3,"prefix_length":10}"#)
                .unwrap();
        assert_eq!(cfg.max_dictionary_edit_distance, 3);
        assert_eq!(cfg.prefix_length, 10);
        assert_eq!(
            serde_json::to_string(&Verbosity::All).unwrap(),
            r#""all""#
        );
    }

    #[test]
    fn zero_prefix_length() {
        let err = SymSpellBuilder::new().prefix_length(0).build().unwrap_err();
        assert_eq!(err, SpellerError::InvalidPrefixLength(0));
    }

    #[test]
    fn zero_total_count() {
        let err = SymSpellBuilder::new()
            .unigram_lexicon(vec![("a", 0u64), ("b", 0)])
            .build()
            .unwrap_err();
        assert_eq!(err, SpellerError::ZeroTotalCount);

        let speller = SymSpellBuilder::new()
            .unigram_lexicon(vec![("a", 0u64), ("b", 1)])
            .build()
            .unwrap();
        assert_eq!(speller.total_count(), 1);
    }

    #[test]
    fn check_order() {
        let speller = SymSpellBuilder::new().build().unwrap();
        assert_eq!(
            speller.lookup_with_max_distance("word", Verbosity::Top, 3, false),
            Err(SpellerError::InvalidMaxEditDistance { requested: 3, max: 2 })
        );
        assert_eq!(
            speller.lookup("word", Verbosity::Top, false),
            Err(SpellerError::NotInitialized)
        );
    }

    #[test]
    fn total_count() {
        let speller = SymSpellBuilder::new()
            .unigram_lexicon(vec![("a", 3u64), ("b", 4)])
            .build()
            .unwrap();
        assert_eq!(speller.total_count(), 7);
        assert_eq!(speller.max_word_length(), 1);
    }
}
