//! Correction of whole phrases, including missing and superfluous spaces.
use itertools::Itertools;

use super::worker::LookupWorker;
use super::{SymSpell, Verbosity};
use crate::constants::{BIGRAM_COUNT_MIN, UNKNOWN_WORD_PROBABILITY_BASE};
use crate::lexicon::Bigram;
use crate::speller::error::SpellerError;
use crate::speller::suggestion::Suggestion;

/// Frequency assumed for a word not found in the lexicon, decaying tenfold
/// with every character.
fn estimated_frequency(word: &str) -> f64 {
    let len = word.chars().count() as i32;
    (UNKNOWN_WORD_PROBABILITY_BASE / 10f64.powi(len)).trunc()
}

impl SymSpell {
    fn lookup_top(
        &self,
        input: &str,
        max_edit_distance: usize,
        include_unknown: bool,
    ) -> Vec<Suggestion> {
        LookupWorker::new(self, input, Verbosity::Top, max_edit_distance, include_unknown)
            .suggest()
    }

    /// Tests whether `previous_token` and `token` were wrongly separated.
    ///
    /// The concatenation of both is looked up, and its best suggestion is
    /// returned when it is closer than the two separate corrections together,
    /// or equally close but likelier than the pair. `best_previous` is the
    /// correction already chosen for `previous_token`, `token_suggestion` the
    /// best correction of `token` if there is one.
    pub fn combine_words(
        &self,
        max_edit_distance: usize,
        include_unknown: bool,
        token: &str,
        previous_token: &str,
        best_previous: &Suggestion,
        token_suggestion: Option<&Suggestion>,
    ) -> Result<Option<Suggestion>, SpellerError> {
        self.check_lookup(max_edit_distance)?;

        Ok(self.combine(
            max_edit_distance,
            include_unknown,
            token,
            previous_token,
            best_previous,
            token_suggestion,
        ))
    }

    fn combine(
        &self,
        max_edit_distance: usize,
        include_unknown: bool,
        token: &str,
        previous_token: &str,
        best_previous: &Suggestion,
        token_suggestion: Option<&Suggestion>,
    ) -> Option<Suggestion> {
        let combined = format!("{}{}", previous_token, token);
        let suggestions = self.lookup_top(&combined, max_edit_distance, include_unknown);
        let best = suggestions.first()?;

        let second = match token_suggestion {
            Some(s) => s.clone(),
            None => Suggestion::new(token, max_edit_distance + 1, estimated_frequency(token)),
        };

        let separate_distance = best_previous.distance + second.distance;
        let separate_frequency =
            best_previous.frequency / self.total_count() as f64 * second.frequency;

        if best.distance + 1 < separate_distance
            || (best.distance + 1 == separate_distance && best.frequency > separate_frequency)
        {
            log::trace!(
                "Combining {:?} and {:?} into {:?}",
                previous_token,
                token,
                best.value
            );
            return Some(best.clone());
        }

        None
    }

    /// Finds the likeliest way of correcting `word` as two words, falling
    /// back to its best unsplit suggestion and finally to the word itself.
    fn split_word(&self, max_edit_distance: usize, word: &str, suggestions: &[Suggestion]) -> Suggestion {
        let unsplit = suggestions.first();
        let mut best = unsplit.cloned();
        let n = self.total_count() as f64;

        for (offset, _) in word.char_indices().skip(1) {
            let (part1, part2) = word.split_at(offset);

            let suggestions1 = self.lookup_top(part1, max_edit_distance, false);
            let first = match suggestions1.first() {
                Some(s) => s,
                None => continue,
            };

            let suggestions2 = self.lookup_top(part2, max_edit_distance, false);
            let second = match suggestions2.first() {
                Some(s) => s,
                None => continue,
            };

            let pair = Bigram::new(first.value.clone(), second.value.clone());
            let value = pair.to_string();
            let distance = self
                .string_distance()
                .distance_with_early_stop(word, &value, max_edit_distance)
                .unwrap_or(max_edit_distance + 1);

            if let Some(current) = &best {
                if distance > current.distance {
                    continue;
                }
                if distance < current.distance {
                    best = None;
                }
            }

            let frequency = match self.bigram_lexicon().get(&pair) {
                Some(&count) => {
                    let mut frequency = count as f64;
                    let joined = first.value.len() + second.value.len() == word.len()
                        && word.starts_with(first.value.as_str())
                        && word.ends_with(second.value.as_str());

                    match unsplit {
                        Some(unsplit) => {
                            if joined {
                                // the split only inserts a space, rank it above the unsplit word
                                frequency = frequency.max(unsplit.frequency + 2.0);
                            } else if first.value == unsplit.value || second.value == unsplit.value
                            {
                                frequency = frequency.max(unsplit.frequency + 1.0);
                            }
                        }
                        None => {
                            if joined {
                                frequency = frequency.max(first.frequency.max(second.frequency));
                            }
                        }
                    }

                    frequency
                }
                None => {
                    let estimate = (first.frequency / n * second.frequency) as u64;
                    estimate.min(BIGRAM_COUNT_MIN) as f64
                }
            };

            let split = Suggestion::new(value, distance, frequency);
            if best.as_ref().map_or(true, |b| split.frequency > b.frequency) {
                log::trace!("Best split of {:?} is now {:?}", word, split.value);
                best = Some(split);
            }
        }

        best.unwrap_or_else(|| {
            Suggestion::new(word, max_edit_distance + 1, estimated_frequency(word))
        })
    }

    pub(super) fn correct_compound(
        &self,
        phrase: &str,
        max_edit_distance: usize,
        include_unknown: bool,
    ) -> Suggestion {
        let terms: Vec<&str> = phrase.split_whitespace().collect();
        let mut parts: Vec<Suggestion> = Vec::with_capacity(terms.len());
        let mut last_combination = false;

        for (i, &token) in terms.iter().enumerate() {
            let suggestions = self.lookup_top(token, max_edit_distance, include_unknown);

            if i > 0 && !last_combination {
                let combined = parts.last().and_then(|previous| {
                    self.combine(
                        max_edit_distance,
                        include_unknown,
                        token,
                        terms[i - 1],
                        previous,
                        suggestions.first(),
                    )
                });

                if let Some(combined) = combined {
                    if let Some(last) = parts.last_mut() {
                        *last = combined;
                    }
                    last_combination = true;
                    continue;
                }
            }

            last_combination = false;

            match suggestions.first() {
                Some(first) if first.distance == 0 || token.chars().count() == 1 => {
                    parts.push(first.clone())
                }
                _ => parts.push(self.split_word(max_edit_distance, token, &suggestions)),
            }
        }

        let n = self.total_count() as f64;
        let frequency = parts
            .iter()
            .fold(n, |frequency, part| frequency * (part.frequency / n));
        let value = parts.iter().map(|part| part.value()).join(" ");
        let value = value.trim();
        let distance = self
            .string_distance()
            .distance_with_early_stop(phrase, value, usize::MAX)
            .unwrap_or_else(|| self.string_distance().distance(phrase, value));

        log::trace!("Corrected {:?} to {:?}", phrase, value);
        Suggestion::new(value, distance, frequency)
    }
}
