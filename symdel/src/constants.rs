/// Maximum edit distance used for dictionary precalculation when none is given.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;
/// Length to which words are truncated before their deletes are generated.
pub const DEFAULT_PREFIX_LENGTH: usize = 7;
/// Upper bound of a naive Bayes estimated bigram count.
pub const BIGRAM_COUNT_MIN: u64 = u64::MAX;
/// Numerator of the estimated occurrence probability of an unknown word.
pub const UNKNOWN_WORD_PROBABILITY_BASE: f64 = 10.0;
