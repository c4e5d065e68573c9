use std::cmp::{max, min};

use hashbrown::HashSet;
use smol_str::SmolStr;

use super::edits::{char_prefix, delete_char};
use super::{SymSpell, Verbosity};
use crate::speller::suggestion::Suggestion;

/// Whether the characters of `delete` occur in order within the first
/// `prefix_length` characters of `suggestion`.
fn delete_in_suggestion_prefix(delete: &str, suggestion: &str, prefix_length: usize) -> bool {
    if delete.is_empty() {
        return true;
    }

    let prefix: Vec<char> = suggestion.chars().take(prefix_length).collect();
    let mut j = 0;

    for ch in delete.chars() {
        while j < prefix.len() && ch != prefix[j] {
            j += 1;
        }

        if j == prefix.len() {
            return false;
        }
    }

    true
}

/// Per-call state of a single word lookup. Everything mutable lives here, the
/// speller itself is only read.
pub(crate) struct LookupWorker<'a> {
    speller: &'a SymSpell,
    input: &'a str,
    input_chars: Vec<char>,
    verbosity: Verbosity,
    max_edit_distance: usize,
    include_unknown: bool,
}

impl<'a> LookupWorker<'a> {
    pub(crate) fn new(
        speller: &'a SymSpell,
        input: &'a str,
        verbosity: Verbosity,
        max_edit_distance: usize,
        include_unknown: bool,
    ) -> LookupWorker<'a> {
        LookupWorker {
            speller,
            input,
            input_chars: input.chars().collect(),
            verbosity,
            max_edit_distance,
            include_unknown,
        }
    }

    fn unknown(&self) -> Suggestion {
        Suggestion::new(self.input, self.max_edit_distance + 1, 0.0)
    }

    fn finish(&self, mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        if suggestions.is_empty() && self.include_unknown {
            suggestions.push(self.unknown());
        }

        log::trace!("{}: {} suggestions", self.input, suggestions.len());
        suggestions
    }

    /// When every allowed edit was spent inside the prefix, the parts of the
    /// input and the word beyond the prefix have to be equal up to a final
    /// transposition.
    fn tail_mismatch(&self, word: &[char], candidate_len: usize) -> bool {
        let prefix_length = self.speller.prefix_length();

        if prefix_length < self.max_edit_distance
            || prefix_length - self.max_edit_distance != candidate_len
        {
            return false;
        }

        let input = &self.input_chars;
        let (input_len, word_len) = (input.len(), word.len());
        let shortest = min(input_len, word_len);

        if shortest <= prefix_length {
            return false;
        }

        let m = shortest - prefix_length;

        if m > 1 && input[input_len + 1 - m..] != word[word_len + 1 - m..] {
            return true;
        }

        input[input_len - m] != word[word_len - m]
            && (input[input_len - m - 1] != word[word_len - m]
                || input[input_len - m] != word[word_len - m - 1])
    }

    pub(crate) fn suggest(&self) -> Vec<Suggestion> {
        log::trace!("Beginning lookup of {}", self.input);

        let speller = self.speller;
        let input = self.input;
        let input_len = self.input_chars.len();
        let prefix_length = speller.prefix_length();
        let max_edit_distance = self.max_edit_distance;
        let mut suggestions: Vec<Suggestion> = vec![];

        if input_len > speller.max_word_length() + max_edit_distance {
            return self.finish(suggestions);
        }

        if let Some(&count) = speller.unigram_lexicon().get(input) {
            suggestions.push(Suggestion::new(input, 0, count as f64));

            if self.verbosity != Verbosity::All {
                return suggestions;
            }
        }

        if max_edit_distance == 0 {
            return self.finish(suggestions);
        }

        let mut deletes_considered: HashSet<SmolStr> = HashSet::new();
        let mut suggestions_considered: HashSet<SmolStr> = HashSet::new();
        suggestions_considered.insert(SmolStr::new(input));

        let mut candidates: Vec<SmolStr> = Vec::new();
        let input_prefix_len = if input_len > prefix_length {
            candidates.push(SmolStr::new(char_prefix(input, prefix_length)));
            prefix_length
        } else {
            input_len
        };
        candidates.push(SmolStr::new(input));

        let mut max_edit_distance2 = max_edit_distance;
        let mut pointer = 0;

        while pointer < candidates.len() {
            let candidate = candidates[pointer].clone();
            pointer += 1;

            let candidate_len = candidate.chars().count();
            let length_diff = input_prefix_len as isize - candidate_len as isize;

            // candidates only get shorter, nothing better is left to find
            if length_diff > max_edit_distance2 as isize {
                if self.verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            if let Some(words) = speller.deletes().get(&candidate) {
                for word in words {
                    if word == input {
                        continue;
                    }

                    let word_len = word.chars().count();

                    if max(word_len, input_len) - min(word_len, input_len) > max_edit_distance2
                        || word_len < candidate_len
                        || (word_len == candidate_len && word != &candidate)
                    {
                        continue;
                    }

                    let word_prefix_len = min(word_len, prefix_length);
                    if word_prefix_len > input_prefix_len
                        && word_prefix_len as isize - candidate_len as isize
                            > max_edit_distance2 as isize
                    {
                        continue;
                    }

                    let distance = if candidate_len == 0 {
                        let distance = max(input_len, word_len);
                        if distance > max_edit_distance2
                            || !suggestions_considered.insert(word.clone())
                        {
                            continue;
                        }
                        distance
                    } else if word_len == 1 {
                        let contained = word.chars().all(|ch| self.input_chars.contains(&ch));
                        let distance = if contained { input_len - 1 } else { input_len };
                        if distance > max_edit_distance2
                            || !suggestions_considered.insert(word.clone())
                        {
                            continue;
                        }
                        distance
                    } else {
                        let word_chars: Vec<char> = word.chars().collect();
                        if self.tail_mismatch(&word_chars, candidate_len) {
                            continue;
                        }

                        if (self.verbosity != Verbosity::All
                            && !delete_in_suggestion_prefix(&candidate, word, prefix_length))
                            || !suggestions_considered.insert(word.clone())
                        {
                            continue;
                        }

                        match speller.string_distance().distance_with_early_stop(
                            input,
                            word,
                            max_edit_distance2,
                        ) {
                            Some(distance) => distance,
                            None => continue,
                        }
                    };

                    if distance > max_edit_distance2 {
                        continue;
                    }

                    let count = speller.unigram_lexicon().get(word).copied().unwrap_or(0);
                    let suggestion = Suggestion::new(word.clone(), distance, count as f64);

                    if !suggestions.is_empty() {
                        match self.verbosity {
                            Verbosity::Closest => {
                                if distance < max_edit_distance2 {
                                    suggestions.clear();
                                }
                            }
                            Verbosity::Top => {
                                if distance < max_edit_distance2
                                    || suggestion.frequency > suggestions[0].frequency
                                {
                                    max_edit_distance2 = distance;
                                    suggestions[0] = suggestion;
                                }
                                continue;
                            }
                            Verbosity::All => {}
                        }
                    }

                    if self.verbosity != Verbosity::All {
                        max_edit_distance2 = distance;
                    }

                    suggestions.push(suggestion);
                }
            }

            if length_diff < max_edit_distance as isize && candidate_len <= prefix_length {
                // no deletes needed below the distance already found
                if self.verbosity != Verbosity::All && length_diff >= max_edit_distance2 as isize {
                    continue;
                }

                for i in 0..candidate_len {
                    let delete = delete_char(&candidate, i);

                    if deletes_considered.insert(delete.clone()) {
                        candidates.push(delete);
                    }
                }
            }
        }

        if suggestions.len() > 1 {
            suggestions.sort();
        }

        self.finish(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_prefix() {
        assert!(delete_in_suggestion_prefix("", "anything", 7));
        assert!(delete_in_suggestion_prefix("sumr", "summarized", 7));
        assert!(!delete_in_suggestion_prefix("sumz", "summarized", 7));
        assert!(!delete_in_suggestion_prefix("xyz", "summarized", 7));
    }
}
