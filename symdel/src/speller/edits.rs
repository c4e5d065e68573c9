//! Generation of bounded-distance deletions.
use std::collections::VecDeque;

use hashbrown::HashSet;
use smol_str::SmolStr;

/// Returns `word` with the `index`th character removed.
pub(crate) fn delete_char(word: &str, index: usize) -> SmolStr {
    word.chars()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, ch)| ch)
        .collect()
}

/// Returns the first `len` characters of `word`.
pub(crate) fn char_prefix(word: &str, len: usize) -> &str {
    match word.char_indices().nth(len) {
        Some((offset, _)) => &word[..offset],
        None => word,
    }
}

/// Adds to `deletes` every string reachable from `word` by deleting one or
/// more characters, where `word` already sits `edit_distance` deletions away
/// from its origin and no string may be more than `max_distance` deletions
/// away. Words of a single character are not reduced further.
///
/// The expansion is breadth-first: all single deletions of `word` are
/// produced before any of their own deletions.
pub fn edits(
    word: &str,
    edit_distance: usize,
    max_distance: usize,
    mut deletes: HashSet<SmolStr>,
) -> HashSet<SmolStr> {
    let mut queue = VecDeque::new();
    queue.push_back((SmolStr::new(word), edit_distance));

    while let Some((current, distance)) = queue.pop_front() {
        let distance = distance + 1;
        let len = current.chars().count();

        if len <= 1 || distance > max_distance {
            continue;
        }

        for i in 0..len {
            let delete = delete_char(&current, i);
            if deletes.insert(delete.clone()) && distance < max_distance {
                queue.push_back((delete, distance));
            }
        }
    }

    deletes
}

/// All deletions of `key` within `max_distance`, after truncating `key` to
/// `prefix_length` characters. The truncated key itself is included, and so
/// is the empty string when the key is short enough to be deleted entirely.
pub fn edits_prefix(key: &str, max_distance: usize, prefix_length: usize) -> HashSet<SmolStr> {
    let mut deletes = HashSet::new();

    if key.chars().count() <= max_distance {
        deletes.insert(SmolStr::new(""));
    }

    let key = char_prefix(key, prefix_length);
    deletes.insert(SmolStr::new(key));

    edits(key, 0, max_distance, deletes)
}
