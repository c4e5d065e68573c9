//! Word and word-pair frequency tables, and reading them from word lists.
use std::fmt;
use std::io::Read;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Mapping from a word to its frequency count.
pub type UnigramLexicon = HashMap<SmolStr, u64>;

/// Mapping from a word pair to its frequency count.
pub type BigramLexicon = HashMap<Bigram, u64>;

/// Ordered pair of words, displayed as `"word1 word2"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bigram {
    word1: SmolStr,
    word2: SmolStr,
}

impl Bigram {
    /// creates a word pair
    pub fn new(word1: impl Into<SmolStr>, word2: impl Into<SmolStr>) -> Bigram {
        Bigram {
            word1: word1.into(),
            word2: word2.into(),
        }
    }

    /// gets the first word of the pair
    pub fn word1(&self) -> &str {
        &self.word1
    }

    /// gets the second word of the pair
    pub fn word2(&self) -> &str {
        &self.word2
    }
}

impl fmt::Display for Bigram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.word1, self.word2)
    }
}

/// Errors that can occur while reading a lexicon.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// The word list could not be read or split into records
    #[error("Failed to read lexicon")]
    Csv(#[from] csv::Error),

    /// A frequency column did not hold a non-negative integer
    #[error("Invalid frequency {value:?} on line {line}")]
    InvalidCount {
        /// line of the offending record, starting from 1
        line: u64,
        /// the unparsable column content
        value: String,
    },
}

fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .comment(Some(b'#'))
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false);
    builder
}

fn parse_count(record: &csv::StringRecord, index: usize) -> Result<u64, LexiconError> {
    let value = &record[index];
    value.trim().parse::<u64>().map_err(|_| LexiconError::InvalidCount {
        line: record.position().map(|p| p.line()).unwrap_or(0),
        value: value.to_string(),
    })
}

/// Reads `term<delimiter>count` records into a unigram lexicon.
///
/// Lines starting with `#` are ignored, rows with fewer than two columns are
/// skipped, and a repeated term keeps the last count.
pub fn read_unigrams<R: Read>(reader: R, delimiter: u8) -> Result<UnigramLexicon, LexiconError> {
    let mut rdr = reader_builder(delimiter).from_reader(reader);
    let mut lexicon = UnigramLexicon::new();

    for record in rdr.records() {
        let record = record?;
        if record.len() < 2 || record[0].is_empty() {
            log::warn!("Skipping unigram record {:?}", record);
            continue;
        }

        let count = parse_count(&record, 1)?;
        lexicon.insert(SmolStr::new(&record[0]), count);
    }

    log::debug!("Read {} unigrams", lexicon.len());
    Ok(lexicon)
}

/// Reads `word1<delimiter>word2<delimiter>count` records into a bigram lexicon.
pub fn read_bigrams<R: Read>(reader: R, delimiter: u8) -> Result<BigramLexicon, LexiconError> {
    let mut rdr = reader_builder(delimiter).from_reader(reader);
    let mut lexicon = BigramLexicon::new();

    for record in rdr.records() {
        let record = record?;
        if record.len() < 3 || record[0].is_empty() || record[1].is_empty() {
            log::warn!("Skipping bigram record {:?}", record);
            continue;
        }

        let count = parse_count(&record, 2)?;
        lexicon.insert(Bigram::new(&record[0], &record[1]), count);
    }

    log::debug!("Read {} bigrams", lexicon.len());
    Ok(lexicon)
}

/// Opens the file at `path` and reads it with [`read_unigrams`].
pub fn load_unigrams<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
) -> Result<UnigramLexicon, LexiconError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    read_unigrams(file, delimiter)
}

/// Opens the file at `path` and reads it with [`read_bigrams`].
pub fn load_bigrams<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<BigramLexicon, LexiconError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    read_bigrams(file, delimiter)
}
