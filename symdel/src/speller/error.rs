//! Error types for lookup and construction.

/// Errors that can occur while building a speller or looking up words.
///
/// A word without any suggestion is not an error; see the `include_unknown`
/// flag of the lookup operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpellerError {
    /// The unigram lexicon is empty, so there is nothing to look up against
    #[error("There are no words in the lexicon")]
    NotInitialized,

    /// A lookup requested a larger edit distance than the index was built for
    #[error("Max edit distance {requested} exceeds the dictionary max edit distance {max}")]
    InvalidMaxEditDistance {
        /// edit distance requested by the caller
        requested: usize,
        /// edit distance the delete index was built with
        max: usize,
    },

    /// Every word of a non-empty lexicon has count 0, so no word has a
    /// probability to rank by
    #[error("The word counts of the lexicon sum to 0")]
    ZeroTotalCount,

    /// The prefix length must be at least one character
    #[error("Invalid prefix length {0}, must be at least 1")]
    InvalidPrefixLength(usize),
}
